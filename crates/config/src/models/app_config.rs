use std::path::Path;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

/// 控制台应用配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 远端调度服务的命令端点
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub url: String,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/commands".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// 周期刷新设置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 30,
        }
    }
}

impl AppConfig {
    /// 加载配置：TOML文件（可选）叠加 CONSOLE_ 前缀的环境变量
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/console.toml", "console.toml"];
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    break;
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CONSOLE")
                .separator("_")
                .try_parsing(true),
        );

        let defaults = AppConfig::default();
        let config: AppConfig = builder
            .set_default("server.url", defaults.server.url.as_str())?
            .set_default(
                "server.request_timeout_seconds",
                defaults.server.request_timeout_seconds,
            )?
            .set_default("refresh.enabled", defaults.refresh.enabled)?
            .set_default("refresh.interval_seconds", defaults.refresh.interval_seconds)?
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(anyhow::anyhow!("server.url 不能为空"));
        }
        if !self.server.url.starts_with("http://") && !self.server.url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "server.url 必须以 http:// 或 https:// 开头: {}",
                self.server.url
            ));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("server.request_timeout_seconds 必须大于0"));
        }
        if self.refresh.enabled && self.refresh.interval_seconds == 0 {
            return Err(anyhow::anyhow!("refresh.interval_seconds 必须大于0"));
        }
        Ok(())
    }
}
