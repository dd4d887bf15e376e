use thiserror::Error;

mod tests;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("未知的状态码: {code}")]
    UnknownStatusCode { code: String },
    #[error("命令参数无效: {command} 缺少 {field}")]
    InvalidCommandPayload {
        command: &'static str,
        field: &'static str,
    },
    #[error("网络错误: {0}")]
    Network(String),
    #[error("服务端错误: {0}")]
    ServerFailure(String),
    #[error("响应格式错误: {0}")]
    MalformedResponse(String),
    #[error("命令执行超时: {command} ({timeout_seconds}秒)")]
    Timeout {
        command: String,
        timeout_seconds: u64,
    },
    #[error("启动序列失败: 阶段 {phase}: {source}")]
    BootstrapSequence {
        phase: &'static str,
        #[source]
        source: Box<ConsoleError>,
    },
    #[error("快照数据不一致: {0}")]
    SnapshotIntegrity(String),
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl ConsoleError {
    pub fn unknown_status_code<S: Into<String>>(code: S) -> Self {
        Self::UnknownStatusCode { code: code.into() }
    }
    pub fn invalid_payload(command: &'static str, field: &'static str) -> Self {
        Self::InvalidCommandPayload { command, field }
    }
    pub fn network_error<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }
    pub fn server_failure<S: Into<String>>(msg: S) -> Self {
        Self::ServerFailure(msg.into())
    }
    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        Self::MalformedResponse(msg.into())
    }
    pub fn bootstrap_failure(phase: &'static str, source: ConsoleError) -> Self {
        Self::BootstrapSequence {
            phase,
            source: Box::new(source),
        }
    }
    pub fn snapshot_integrity<S: Into<String>>(msg: S) -> Self {
        Self::SnapshotIntegrity(msg.into())
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// 判断是否属于命令传输失败（必须通过失败广播上报）
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ConsoleError::Network(_)
                | ConsoleError::ServerFailure(_)
                | ConsoleError::MalformedResponse(_)
                | ConsoleError::Timeout { .. }
        )
    }
    pub fn is_retryable(&self) -> bool {
        matches!(self, ConsoleError::Network(_) | ConsoleError::Timeout { .. })
    }
    /// 本地校验错误在构造阶段立即返回，不进入失败广播
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ConsoleError::InvalidCommandPayload { .. }
                | ConsoleError::UnknownStatusCode { .. }
                | ConsoleError::Configuration(_)
        )
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}
