//! Per-session engines behind a shared map.
//!
//! Each session has its own lock, so turns on one memory are serialized
//! while different sessions answer concurrently. The map holds at most
//! `max_sessions` entries; opening one more evicts the least recently used.

use crate::engine::{Engine, EngineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use solace_core::Lexicons;
use solace_memory::ConversationLog;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub const DEFAULT_SESSION: &str = "default";
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug)]
pub struct Session {
    pub engine: Engine,
    pub log: ConversationLog,
}

struct Slot {
    session: Arc<Mutex<Session>>,
    /// Tick of the last lookup, for LRU eviction.
    last_used: AtomicU64,
}

pub struct SessionStore {
    lexicons: Arc<Lexicons>,
    config: EngineConfig,
    max_sessions: usize,
    clock: AtomicU64,
    sessions: RwLock<HashMap<String, Slot>>,
}

fn session_key(id: Option<&str>) -> &str {
    id.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
}

impl SessionStore {
    pub fn new(lexicons: Arc<Lexicons>, config: EngineConfig) -> Self {
        Self::with_capacity(lexicons, config, DEFAULT_MAX_SESSIONS)
    }

    /// A store holding at most `max_sessions` sessions (at least one).
    pub fn with_capacity(lexicons: Arc<Lexicons>, config: EngineConfig, max_sessions: usize) -> Self {
        Self {
            lexicons,
            config,
            max_sessions: max_sessions.max(1),
            clock: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Session for `id` (or the default one), created on first use.
    pub async fn session(&self, id: Option<&str>) -> Arc<Mutex<Session>> {
        let id = session_key(id);

        if let Some(slot) = self.sessions.read().await.get(id) {
            slot.last_used.store(self.tick(), Ordering::Relaxed);
            return slot.session.clone();
        }

        let mut sessions = self.sessions.write().await;
        if let Some(slot) = sessions.get(id) {
            slot.last_used.store(self.tick(), Ordering::Relaxed);
            return slot.session.clone();
        }

        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, slot)| slot.last_used.load(Ordering::Relaxed))
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::info!(session = %oldest, "Evicted least recently used session");
            }
        }

        tracing::info!(session = id, "Opening session");
        let session = Arc::new(Mutex::new(Session {
            engine: Engine::with_parts(
                self.lexicons.clone(),
                self.config.clone(),
                Box::new(StdRng::from_entropy()),
            ),
            log: ConversationLog::new(),
        }));
        sessions.insert(
            id.to_string(),
            Slot {
                session: session.clone(),
                last_used: AtomicU64::new(self.tick()),
            },
        );
        session
    }

    /// The session for `id` if it has been opened.
    pub async fn get(&self, id: Option<&str>) -> Option<Arc<Mutex<Session>>> {
        let sessions = self.sessions.read().await;
        let slot = sessions.get(session_key(id))?;
        slot.last_used.store(self.tick(), Ordering::Relaxed);
        Some(slot.session.clone())
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Lexicons::shared().unwrap(), EngineConfig::default())
    }

    #[tokio::test]
    async fn test_missing_id_maps_to_default() {
        let store = store();
        let a = store.session(None).await;
        let b = store.session(Some(DEFAULT_SESSION)).await;
        let c = store.session(Some("  ")).await;
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = store();
        {
            let alice = store.session(Some("alice")).await;
            let mut s = alice.lock().await;
            s.engine.respond("my name is alice", None);
        }
        let bob = store.session(Some("bob")).await;
        assert!(bob.lock().await.engine.memory().username.is_none());

        let alice = store.get(Some("alice")).await.unwrap();
        assert_eq!(alice.lock().await.engine.memory().username.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_store_never_exceeds_capacity() {
        let store = SessionStore::with_capacity(Lexicons::shared().unwrap(), EngineConfig::default(), 8);
        for i in 0..100 {
            let id = format!("visitor-{i}");
            let session = store.session(Some(id.as_str())).await;
            session.lock().await.engine.respond("hello", None);
            assert!(store.len().await <= 8);
        }
        assert_eq!(store.len().await, 8);
        assert!(store.get(Some("visitor-0")).await.is_none());
        assert!(store.get(Some("visitor-99")).await.is_some());
    }

    #[tokio::test]
    async fn test_eviction_spares_recently_used_sessions() {
        let store = SessionStore::with_capacity(Lexicons::shared().unwrap(), EngineConfig::default(), 2);
        store.session(Some("regular")).await;
        store.session(Some("one-off")).await;
        store.session(Some("regular")).await;
        store.session(Some("newcomer")).await;

        assert!(store.get(Some("regular")).await.is_some());
        assert!(store.get(Some("newcomer")).await.is_some());
        assert!(store.get(Some("one-off")).await.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store();
        store.session(Some("temp")).await;
        assert!(store.remove("temp").await);
        assert!(!store.remove("temp").await);
        assert!(store.is_empty().await);
        assert!(store.get(Some("temp")).await.is_none());
    }
}
