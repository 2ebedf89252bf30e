//! Registry configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use common::{AppError, AppResult, StoreBackend, StoreConfig};

/// Development-only admin password, used when `ADMIN_PASSWORD` is unset in
/// debug builds.
const DEV_ADMIN_PASSWORD: &str = "dev-admin";

/// Registry configuration.
#[derive(Clone)]
pub struct RegistryConfig {
    pub store: StoreConfig,
    admin_password: Option<String>,
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("store", &self.store)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// In release builds a missing `ADMIN_PASSWORD` leaves admin login
    /// disabled instead of falling back to a built-in value.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = StoreConfig::default();
        let backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse::<StoreBackend>().map_err(AppError::validation)?,
            Err(_) => defaults.backend,
        };

        let store = StoreConfig {
            backend,
            dir: env::var("STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            namespace: env::var("STORE_NAMESPACE").unwrap_or(defaults.namespace),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
        };

        let admin_password = match env::var("ADMIN_PASSWORD") {
            Ok(password) if !password.is_empty() => Some(password),
            _ if cfg!(debug_assertions) => {
                tracing::warn!("ADMIN_PASSWORD not set, using insecure default for development");
                Some(DEV_ADMIN_PASSWORD.to_string())
            }
            _ => {
                tracing::warn!("ADMIN_PASSWORD not set, admin login is disabled");
                None
            }
        };

        Ok(Self {
            store,
            admin_password,
        })
    }

    /// Build a configuration directly (tests and embedding).
    pub fn new(store: StoreConfig, admin_password: Option<String>) -> Self {
        Self {
            store,
            admin_password,
        }
    }

    /// Secret the admin role is checked against, if any.
    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_admin_password() {
        let config = RegistryConfig::new(StoreConfig::default(), Some("hunter2".to_string()));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("[REDACTED]"));
    }
}
