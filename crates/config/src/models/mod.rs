mod app_config;
mod logging;

pub use app_config::{AppConfig, RefreshConfig, ServerConfig};
pub use logging::{LogLevel, LoggingConfig, OutputFormat};
