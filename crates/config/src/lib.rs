pub mod models;

pub use models::{AppConfig, LogLevel, LoggingConfig, OutputFormat, RefreshConfig, ServerConfig};
