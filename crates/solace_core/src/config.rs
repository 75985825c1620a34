use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SolaceConfig {
    pub persona: PersonaConfig,
    pub engine: EngineSettings,
    pub memory: MemoryConfig,
    pub gateway: GatewayConfig,
}

impl SolaceConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: SolaceConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SOLACE_BOT_NAME") {
            self.persona.name = v;
        }
        if let Ok(v) = std::env::var("SOLACE_MEMORY_PATH") {
            self.memory.path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SOLACE_GATEWAY_HOST") {
            self.gateway.host = v;
        }
        if let Ok(v) = std::env::var("SOLACE_GATEWAY_PORT") {
            if let Ok(n) = v.parse() {
                self.gateway.port = n;
            }
        }
        if let Ok(v) = std::env::var("SOLACE_GATEWAY_MAX_SESSIONS") {
            if let Ok(n) = v.parse() {
                self.gateway.max_sessions = n;
            }
        }
        if let Ok(v) = std::env::var("SOLACE_EXPOSE_FAULTS") {
            if let Ok(b) = v.parse() {
                self.engine.expose_fault_detail = b;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Name the companion introduces itself with.
    pub name: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Solace".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Show the raw fault description in apology replies.
    /// Turn off when the engine faces untrusted input.
    pub expose_fault_detail: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            expose_fault_detail: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// JSON document the console session is saved to and restored from.
    pub path: PathBuf,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("solace_memory.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Sessions held in memory at once; the least recently used is dropped.
    pub max_sessions: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_sessions: 1024,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = SolaceConfig::default();
        assert_eq!(cfg.persona.name, "Solace");
        assert!(cfg.engine.expose_fault_detail);
        assert_eq!(cfg.memory.path, PathBuf::from("solace_memory.json"));
        assert_eq!(cfg.gateway.port, 5000);
        assert_eq!(cfg.gateway.max_sessions, 1024);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[persona]
name = "Willow"
"#;
        let cfg: SolaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.persona.name, "Willow");
        // Defaults for unspecified fields
        assert_eq!(cfg.gateway.host, "127.0.0.1");
        assert!(cfg.engine.expose_fault_detail);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[persona]
name = "Willow"

[engine]
expose_fault_detail = false

[memory]
path = "data/session.json"

[gateway]
host = "0.0.0.0"
port = 8080
max_sessions = 64
"#;
        let cfg: SolaceConfig = toml::from_str(toml_str).unwrap();
        assert!(!cfg.engine.expose_fault_detail);
        assert_eq!(cfg.memory.path, PathBuf::from("data/session.json"));
        assert_eq!(cfg.gateway.host, "0.0.0.0");
        assert_eq!(cfg.gateway.port, 8080);
        assert_eq!(cfg.gateway.max_sessions, 64);
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("SOLACE_BOT_NAME", "Juniper");
        std::env::set_var("SOLACE_GATEWAY_PORT", "9090");

        let mut cfg = SolaceConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.persona.name, "Juniper");
        assert_eq!(cfg.gateway.port, 9090);

        std::env::remove_var("SOLACE_BOT_NAME");
        std::env::remove_var("SOLACE_GATEWAY_PORT");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = SolaceConfig::load_or_default("/nonexistent/solace.toml");
        assert_eq!(cfg.persona.name, "Solace");
    }
}
