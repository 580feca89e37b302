// Nickname server library
//
// HTTP front end for the nickname registry: configuration, routes, error
// mapping and registry selection. The binary in main.rs wires them together.

pub mod api;
pub mod config;
pub mod error;
pub mod storage;

pub use api::{create_router, AppState};
pub use config::{load_config, ServerConfig};
pub use error::ApiError;
pub use storage::init_registry;
