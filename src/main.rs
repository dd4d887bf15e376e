use anyhow::{Context, Result};
use clap::{Arg, Command};
use console_config::{AppConfig, LogLevel, OutputFormat};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod shutdown;

use app::Application;
use shutdown::ShutdownManager;

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let matches = Command::new("scheduler-console")
        .version("1.0.0")
        .about("后台任务调度器的监控控制台")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径"),
        )
        .arg(
            Arg::new("server-url")
                .short('s')
                .long("server-url")
                .value_name("URL")
                .help("调度服务命令端点，覆盖配置文件"),
        )
        .arg(
            Arg::new("refresh-interval")
                .long("refresh-interval")
                .value_name("SECONDS")
                .help("快照刷新间隔（秒），0表示禁用")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式")
                .value_parser(["json", "pretty"]),
        )
        .get_matches();

    // 加载配置
    let config_path = matches.get_one::<String>("config");
    let mut config =
        AppConfig::load(config_path.map(String::as_str)).context("加载配置失败")?;

    // 命令行参数覆盖配置文件
    if let Some(url) = matches.get_one::<String>("server-url") {
        config.server.url = url.clone();
    }
    if let Some(interval) = matches.get_one::<u64>("refresh-interval") {
        config.refresh.enabled = *interval > 0;
        if *interval > 0 {
            config.refresh.interval_seconds = *interval;
        }
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level
            .parse::<LogLevel>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.logging.format = format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    config.validate()?;

    // 初始化日志系统
    init_logging(&config);

    info!("启动调度器监控控制台");
    info!("命令端点: {}", config.server.url);

    // 创建应用实例
    let app = Application::new(&config);

    // 创建优雅关闭管理器
    let shutdown_manager = ShutdownManager::new();

    // 启动应用
    let app_handle = {
        let shutdown_rx = shutdown_manager.subscribe();
        tokio::spawn(async move {
            if let Err(e) = app.run(shutdown_rx).await {
                error!("应用运行失败: {e}");
            }
        })
    };

    // 等待关闭信号
    wait_for_shutdown_signal().await;

    info!("收到关闭信号，开始优雅关闭...");
    shutdown_manager.shutdown().await;
    let _ = app_handle.await;

    info!("控制台已退出");
    Ok(())
}

fn init_logging(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_string()));

    match config.logging.format {
        OutputFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        OutputFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
