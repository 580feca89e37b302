// Registry selection for the nickname server

use std::sync::Arc;

use nickreg::{MemoryRegistry, Registry, RegistryError, SqliteRegistry};
use tracing::{error, info};

use crate::config::StorageConfig;

/// Initialize the registry engine named in the configuration
///
/// # Arguments
///
/// * `config` - Storage configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn Registry>)` if the engine is known and could be opened
/// * `Err(RegistryError::StorageUnavailable)` otherwise
pub fn init_registry(config: &StorageConfig) -> Result<Arc<dyn Registry>, RegistryError> {
    match config.engine.as_str() {
        "sqlite" => {
            info!(
                "Initializing SQLite registry at {}",
                config.database_path
            );
            Ok(Arc::new(SqliteRegistry::open(&config.database_path)?))
        }
        "memory" => {
            info!("Initializing in-memory registry");
            Ok(Arc::new(MemoryRegistry::new()))
        }
        other => {
            error!("Unsupported storage engine: {}", other);
            Err(RegistryError::StorageUnavailable(format!(
                "unsupported storage engine: {}",
                other
            )))
        }
    }
}
