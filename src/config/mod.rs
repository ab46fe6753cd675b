/// Compiled-in shop identity for invoice headers
pub mod business;

/// Settings loading from config.toml and environment variables
pub mod settings;

pub use business::{BusinessProfile, YASH_HOME_DECORS};
pub use settings::{AppConfig, Credentials, load_app_configuration};
