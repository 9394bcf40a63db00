pub mod config;
pub mod local;

pub use config::{Config, ConfigError, DemoConfig, SessionConfig, StoreConfig};
pub use local::{LocalStorage, StorageError};
