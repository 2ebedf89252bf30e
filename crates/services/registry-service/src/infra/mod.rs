//! Infrastructure layer - key-value stores.

#[cfg(feature = "redis")]
mod redis_store;
mod store;

use std::sync::Arc;

use common::{AppResult, StoreBackend, StoreConfig};

#[cfg(feature = "redis")]
pub use redis_store::RedisStore;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Open the store selected by configuration.
pub async fn open_store(config: &StoreConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    match config.backend {
        StoreBackend::File => Ok(Arc::new(FileStore::open(&config.dir).await?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "redis")]
        StoreBackend::Redis => Ok(Arc::new(RedisStore::connect(&config.redis_url).await?)),
        #[cfg(not(feature = "redis"))]
        StoreBackend::Redis => Err(common::AppError::validation(
            "redis backend requires building with the `redis` feature",
        )),
    }
}
