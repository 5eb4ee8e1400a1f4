//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client runs with zero configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use nexus_shared::constants::DEFAULT_NOTIFY_CAPACITY;

use crate::error::ClientError;

/// Where durable state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// SQLite file on disk.
    #[default]
    Sqlite,
    /// Process memory; everything is lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ClientError::Config(format!(
                "unknown storage backend '{other}' (expected sqlite or memory)"
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite => f.write_str("sqlite"),
            StorageBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Storage backend.
    /// Env: `NEXUS_STORAGE` (`sqlite` | `memory`)
    /// Default: `sqlite`
    pub storage: StorageBackend,

    /// Explicit SQLite database path.
    /// Env: `NEXUS_DB_PATH`
    /// Default: platform data directory (`nexus.db`)
    pub db_path: Option<PathBuf>,

    /// Buffer size of the change-notification channel.
    /// Env: `NEXUS_NOTIFY_CAPACITY`
    /// Default: `64`
    pub notify_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Sqlite,
            db_path: None,
            notify_capacity: DEFAULT_NOTIFY_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("NEXUS_STORAGE") {
            match value.parse::<StorageBackend>() {
                Ok(backend) => config.storage = backend,
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid NEXUS_STORAGE, using default");
                }
            }
        }

        if let Some(path) = lookup("NEXUS_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(value) = lookup("NEXUS_NOTIFY_CAPACITY") {
            match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.notify_capacity = n,
                _ => {
                    tracing::warn!(
                        value = %value,
                        "Invalid NEXUS_NOTIFY_CAPACITY, using default"
                    );
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.notify_capacity, 64);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("NEXUS_STORAGE", "Memory"),
            ("NEXUS_DB_PATH", "/tmp/nexus-test.db"),
            ("NEXUS_NOTIFY_CAPACITY", "8"),
        ]));
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/nexus-test.db")));
        assert_eq!(config.notify_capacity, 8);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("NEXUS_STORAGE", "floppy"),
            ("NEXUS_DB_PATH", "  "),
            ("NEXUS_NOTIFY_CAPACITY", "0"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}
