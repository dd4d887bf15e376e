use std::sync::Arc;

use console_commands::CommandRequest;
use console_dispatcher::CommandDispatcher;
use console_domain::EnvironmentData;
use console_errors::{ConsoleError, ConsoleResult};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::model::ApplicationModel;

/// 启动序列状态
///
/// 失败是显式终态：状态指示器不允许永远停留在加载中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// 两阶段启动序列
///
/// 先加载环境描述，成功后才加载首份调度器快照；两个阶段都完成后
/// 模型才收到第一次 set_data。阶段进度通过 watch 通道对外可见。
pub struct Bootstrapper {
    model: Arc<ApplicationModel>,
    dispatcher: Arc<CommandDispatcher>,
    state_tx: watch::Sender<BootstrapState>,
    status_message_tx: watch::Sender<String>,
}

impl Bootstrapper {
    pub fn new(model: Arc<ApplicationModel>, dispatcher: Arc<CommandDispatcher>) -> Self {
        let (state_tx, _) = watch::channel(BootstrapState::Idle);
        let (status_message_tx, _) = watch::channel(String::new());
        Self {
            model,
            dispatcher,
            state_tx,
            status_message_tx,
        }
    }

    pub fn state(&self) -> watch::Receiver<BootstrapState> {
        self.state_tx.subscribe()
    }

    pub fn status_message(&self) -> watch::Receiver<String> {
        self.status_message_tx.subscribe()
    }

    pub async fn run(&self) -> ConsoleResult<EnvironmentData> {
        self.state_tx.send_replace(BootstrapState::Loading);

        let env_request = CommandRequest::get_environment_data();
        self.status_message_tx
            .send_replace(env_request.message().to_string());
        let environment = match self.dispatcher.execute(env_request).await {
            Ok(environment) => environment,
            Err(e) => return Err(self.fail("environment", e)),
        };

        let data_request = CommandRequest::get_data();
        self.status_message_tx
            .send_replace(data_request.message().to_string());
        let data = match self.dispatcher.execute(data_request).await {
            Ok(data) => data,
            Err(e) => return Err(self.fail("scheduler-data", e)),
        };
        if let Err(e) = data.validate() {
            return Err(self.fail("scheduler-data", e));
        }

        self.model.set_data(data).await;
        self.state_tx.send_replace(BootstrapState::Ready);
        self.status_message_tx.send_replace("Ready".to_string());
        info!(
            scheduler_version = %environment.scheduler_version,
            "bootstrap sequence completed"
        );
        Ok(environment)
    }

    fn fail(&self, phase: &'static str, source: ConsoleError) -> ConsoleError {
        let error = ConsoleError::bootstrap_failure(phase, source);
        warn!("{error}");
        self.state_tx
            .send_replace(BootstrapState::Failed(error.to_string()));
        self.status_message_tx
            .send_replace("Load failed".to_string());
        error
    }
}
