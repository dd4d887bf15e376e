use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use console_commands::CommandRequest;
use console_errors::{ConsoleError, ConsoleResult};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tokio::time::timeout;
use tracing::{debug, error};
use uuid::Uuid;

use crate::transport::CommandTransport;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const FAILURE_CHANNEL_CAPACITY: usize = 64;

/// 命令失败事件
///
/// 每个传输类失败（网络、服务端报错、响应解码失败、超时）在返回
/// 给调用方之前都会先发布到失败广播，订阅方据此统一记录和展示。
#[derive(Debug, Clone)]
pub struct CommandFailure {
    pub execution_id: Uuid,
    pub code: &'static str,
    pub label: &'static str,
    pub error: String,
    pub occurred_at: DateTime<Utc>,
}

/// 命令调度器：一次调用恰好一个终态结果
///
/// 多个命令可以同时在途，调用之间不共享可变游标，完成顺序不做
/// 任何保证；快照应用顺序由上层的 SchedulerController 仲裁。
pub struct CommandDispatcher {
    transport: Arc<dyn CommandTransport>,
    failure_tx: broadcast::Sender<CommandFailure>,
    request_timeout: Duration,
}

impl CommandDispatcher {
    pub fn new(transport: Arc<dyn CommandTransport>) -> Self {
        Self::with_timeout(transport, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(transport: Arc<dyn CommandTransport>, request_timeout: Duration) -> Self {
        let (failure_tx, _) = broadcast::channel(FAILURE_CHANNEL_CAPACITY);
        Self {
            transport,
            failure_tx,
            request_timeout,
        }
    }

    /// 订阅失败广播
    pub fn subscribe_failures(&self) -> broadcast::Receiver<CommandFailure> {
        self.failure_tx.subscribe()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// 执行一个命令，成功时按请求约定的类型解码响应
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: CommandRequest<R>,
    ) -> ConsoleResult<R> {
        // 本地参数校验失败立即返回，不进入失败广播
        request.command().validate()?;

        let execution_id = Uuid::new_v4();
        let code = request.code();
        debug!(%execution_id, code, "{}", request.message());

        let exchange = self.transport.exchange(code, request.payload());
        let outcome = match timeout(self.request_timeout, exchange).await {
            Ok(Ok(value)) => serde_json::from_value::<R>(value)
                .map_err(|e| ConsoleError::malformed_response(format!("{code}: {e}"))),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ConsoleError::Timeout {
                command: code.to_string(),
                timeout_seconds: self.request_timeout.as_secs(),
            }),
        };

        match &outcome {
            Ok(_) => debug!(%execution_id, code, "command completed"),
            Err(e) => {
                error!(%execution_id, code, "command failed: {e}");
                if e.is_transport_failure() {
                    // 忽略发送错误（可能没有订阅者）
                    let _ = self.failure_tx.send(CommandFailure {
                        execution_id,
                        code,
                        label: request.message(),
                        error: e.to_string(),
                        occurred_at: Utc::now(),
                    });
                }
            }
        }

        outcome
    }
}
