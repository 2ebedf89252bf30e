//! Shared configuration structures.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where persisted records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One JSON file per key under a directory
    File,
    /// Process-local map, lost on exit
    Memory,
    /// Redis GET/SET (requires the `redis` feature)
    Redis,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Key-value store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Directory for the file backend
    pub dir: PathBuf,
    /// Key namespace; "starmaker" keeps the legacy key names
    pub namespace: String,
    /// Connection URL for the redis backend
    pub redis_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            dir: PathBuf::from(".starmaker"),
            namespace: "starmaker".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

impl StoreConfig {
    /// Keys of the three persisted values
    pub fn keys(&self) -> StoreKeys {
        StoreKeys::new(&self.namespace)
    }
}

/// Names of the persisted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub singers: String,
    pub judges: String,
    pub session: String,
}

impl StoreKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            singers: format!("{}_v4_records", namespace),
            judges: format!("{}_v4_judges", namespace),
            session: format!("{}_session", namespace),
        }
    }
}

impl Default for StoreKeys {
    fn default() -> Self {
        StoreConfig::default().keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_match_legacy_names() {
        let keys = StoreKeys::default();
        assert_eq!(keys.singers, "starmaker_v4_records");
        assert_eq!(keys.judges, "starmaker_v4_judges");
        assert_eq!(keys.session, "starmaker_session");
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("FILE".parse::<StoreBackend>(), Ok(StoreBackend::File));
        assert_eq!(" memory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }
}
