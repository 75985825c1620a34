//! JSON persistence for a single `SessionMemory`.
//!
//! Loading merges: keys present in the document overwrite the current
//! values, keys absent from it leave the current values alone.

use serde_json::{Map, Value};
use solace_core::state::{MOOD_MAX, MOOD_MIN, RELATIONSHIP_MAX};
use solace_core::SessionMemory;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access memory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("memory document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("memory document must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole record as pretty JSON. Goes through a sibling temp
    /// file so a crash mid-write never leaves a truncated document.
    pub async fn save(&self, memory: &SessionMemory) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(memory)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        tracing::info!(
            path = %self.path.display(),
            turns = memory.turn_count,
            "Memory saved"
        );
        Ok(())
    }

    /// Merge the stored document into `memory`.
    ///
    /// Returns `Ok(false)` when there is no file yet.
    pub async fn load_into(&self, memory: &mut SessionMemory) -> Result<bool, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No memory file yet");
                return Ok(false);
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let doc: Value = serde_json::from_str(&raw)?;
        merge_document(memory, doc)?;
        tracing::info!(
            path = %self.path.display(),
            username = ?memory.username,
            mood = memory.mood_score,
            "Memory restored"
        );
        Ok(true)
    }

    /// Move an unreadable document out of the way so the next save cannot
    /// overwrite it. Returns where it went.
    pub async fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        let backup = PathBuf::from(name);
        tokio::fs::rename(&self.path, &backup)
            .await
            .map_err(|source| self.io_error(source))?;
        tracing::warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            "Unreadable memory file set aside"
        );
        Ok(backup)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Overlay the known top-level keys of `doc` onto `memory`, then re-check bounds.
pub fn merge_document(memory: &mut SessionMemory, doc: Value) -> Result<(), StoreError> {
    let Value::Object(mut incoming) = doc else {
        return Err(StoreError::NotAnObject);
    };
    clamp_numbers(&mut incoming);

    let mut current = serde_json::to_value(&*memory)?;
    let Value::Object(fields) = &mut current else {
        return Err(StoreError::NotAnObject);
    };

    for (key, value) in incoming {
        if fields.contains_key(&key) {
            fields.insert(key, value);
        } else {
            tracing::debug!(key = %key, "Ignoring unknown memory field");
        }
    }

    let mut merged: SessionMemory = serde_json::from_value(current)?;
    merged.sanitize();
    *memory = merged;
    Ok(())
}

/// Bring numeric fields into range while they are still JSON, so a value
/// too large for its field is clamped instead of failing the whole load.
fn clamp_numbers(fields: &mut Map<String, Value>) {
    clamp_field(fields, "mood_score", i64::from(MOOD_MIN), i64::from(MOOD_MAX));
    clamp_field(fields, "relationship_level", 0, i64::from(RELATIONSHIP_MAX));
    clamp_field(fields, "turn_count", 0, i64::MAX);
}

fn clamp_field(fields: &mut Map<String, Value>, key: &str, min: i64, max: i64) {
    let Some(value) = fields.get_mut(key) else {
        return;
    };
    let n = if let Some(i) = value.as_i64() {
        i
    } else if value.as_u64().is_some() {
        i64::MAX
    } else if let Some(f) = value.as_f64() {
        f as i64
    } else {
        return;
    };
    let clamped = n.clamp(min, max);
    if clamped != n {
        tracing::warn!(key, value = n, clamped, "Out-of-range memory field clamped");
    }
    *value = Value::from(clamped);
}
