use async_trait::async_trait;
use console_errors::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 与远端调度服务的一次请求/响应交换
///
/// 传输封装（HTTP方法、端点、序列化格式）全部收敛在实现内部，
/// 上层只提供命令码和参数对象。
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn exchange(&self, code: &str, payload: Value) -> ConsoleResult<Value>;
}

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    code: &'a str,
    data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error_message: Option<String>,
}

/// HTTP传输：POST `{code, data}` 到调度服务的命令端点
pub struct HttpTransport {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CommandTransport for HttpTransport {
    async fn exchange(&self, code: &str, payload: Value) -> ConsoleResult<Value> {
        let envelope = RequestEnvelope {
            code,
            data: payload,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| ConsoleError::network_error(format!("{code}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConsoleError::server_failure(format!(
                "HTTP {status} - {body}"
            )));
        }

        let envelope: ResponseEnvelope = response
            .json()
            .await
            .map_err(|e| ConsoleError::malformed_response(format!("{code}: {e}")))?;

        if !envelope.success {
            return Err(ConsoleError::server_failure(
                envelope
                    .error_message
                    .unwrap_or_else(|| "unspecified server error".to_string()),
            ));
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }
}
