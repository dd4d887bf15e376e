use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console_app::{ApplicationModel, Bootstrapper, DataLoader, SchedulerController};
use console_config::AppConfig;
use console_dispatcher::{CommandDispatcher, HttpTransport};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// 控制台应用
///
/// 显式装配：模型、调度器、控制器与启动序列全部在这里构造并按
/// 引用传递，组件之间没有环境查找。
pub struct Application {
    model: Arc<ApplicationModel>,
    dispatcher: Arc<CommandDispatcher>,
    controller: Arc<SchedulerController>,
    refresh_interval: Option<Duration>,
}

impl Application {
    pub fn new(config: &AppConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(config.server.url.clone()));
        let dispatcher = Arc::new(CommandDispatcher::with_timeout(
            transport,
            Duration::from_secs(config.server.request_timeout_seconds),
        ));
        let model = Arc::new(ApplicationModel::new());
        let controller = Arc::new(SchedulerController::new(
            Arc::clone(&model),
            Arc::clone(&dispatcher),
        ));
        let refresh_interval = config
            .refresh
            .enabled
            .then(|| Duration::from_secs(config.refresh.interval_seconds));

        Self {
            model,
            dispatcher,
            controller,
            refresh_interval,
        }
    }

    /// 运行应用程序：启动序列完成后进入周期刷新，直到收到关闭信号
    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        // 失败广播观察者：每个命令失败统一记录
        let mut failures = self.dispatcher.subscribe_failures();
        tokio::spawn(async move {
            while let Ok(failure) = failures.recv().await {
                warn!(
                    code = failure.code,
                    execution_id = %failure.execution_id,
                    "{}: {}",
                    failure.label,
                    failure.error
                );
            }
        });

        // 变更观察者：记录每份新快照的概要
        let mut changes = self.model.subscribe();
        tokio::spawn(async move {
            while let Ok(snapshot) = changes.recv().await {
                info!(
                    scheduler = %snapshot.name,
                    status = %snapshot.status,
                    groups = snapshot.job_groups.len(),
                    jobs = snapshot.jobs_total,
                    executed = snapshot.jobs_executed,
                    "scheduler state updated"
                );
            }
        });

        // 两阶段启动序列
        let bootstrapper =
            Bootstrapper::new(Arc::clone(&self.model), Arc::clone(&self.dispatcher));
        let environment = bootstrapper.run().await?;
        info!(
            console_version = %environment.self_version,
            scheduler_version = %environment.scheduler_version,
            "connected to scheduler"
        );

        // 周期刷新直到关闭
        if let Some(interval) = self.refresh_interval {
            let loader = DataLoader::new(Arc::clone(&self.controller), interval);
            loader.run(shutdown_rx).await;
        } else {
            let mut shutdown_rx = shutdown_rx;
            let _ = shutdown_rx.recv().await;
        }

        Ok(())
    }
}
