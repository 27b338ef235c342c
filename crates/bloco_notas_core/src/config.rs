//! Engine configuration resolved from defaults and environment.
//!
//! # Invariants
//! - Blank environment values are ignored.
//! - Resolution never fails; invalid log levels are reported by
//!   `init_logging`, not here.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "BLOCO_NOTAS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "BLOCO_NOTAS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BLOCO_NOTAS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "bloco_notas.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Device store file.
    pub db_path: PathBuf,
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// File logging directory; `None` leaves logging to the host.
    pub log_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl EngineConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn empty_environment_uses_defaults() {
        let config = EngineConfig::from_lookup(|_| None);
        assert_eq!(config, EngineConfig::default());
        assert!(config.db_path.ends_with("bloco_notas.sqlite3"));
    }

    #[test]
    fn environment_overrides_and_blank_values_are_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (DB_PATH_ENV, " /data/notes.sqlite3 "),
            (LOG_LEVEL_ENV, "   "),
            (LOG_DIR_ENV, "/data/logs"),
        ]);
        let config = EngineConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/data/notes.sqlite3"));
        assert_eq!(config.log_level, EngineConfig::default().log_level);
        assert_eq!(config.log_dir, Some(PathBuf::from("/data/logs")));
    }
}
