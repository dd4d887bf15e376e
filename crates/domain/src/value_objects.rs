use std::fmt;

use console_errors::{ConsoleError, ConsoleResult};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// 节点状态，由服务端聚合计算
///
/// 客户端只保存服务端下发的值，从不重新计算。分组的状态由其任务
/// 聚合得出（全部 Active 为 Active，全部 Paused 为 Paused，否则为
/// Mixed），任务相对其触发器同理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Paused,
    Mixed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Active, Status::Paused, Status::Mixed];

    /// 线上协议中的稳定标识
    pub fn code(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Paused => "paused",
            Status::Mixed => "mixed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Paused => "Paused",
            Status::Mixed => "Mixed",
        }
    }

    /// 按状态码查找。未知状态码显式报错，不允许退化为默认值。
    pub fn by_code(code: &str) -> ConsoleResult<Status> {
        match code {
            "active" => Ok(Status::Active),
            "paused" => Ok(Status::Paused),
            "mixed" => Ok(Status::Mixed),
            other => Err(ConsoleError::unknown_status_code(other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Status::by_code(&code).map_err(de::Error::custom)
    }
}

/// 时间戳的三种表示，三个字段要么同时存在要么整体缺失
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateData {
    pub ticks: i64,
    pub utc_date_str: String,
    pub server_date_str: String,
}

/// 可空时间戳的空对象包装
///
/// `date_string` 和 `ticks` 只允许在非空时调用，对空值调用属于调用方
/// 的编程错误，直接 panic 而不是返回可恢复错误。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NullableDate(Option<DateData>);

impl NullableDate {
    pub fn new(date: Option<DateData>) -> Self {
        Self(date)
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// 服务端本地时区的展示字符串
    pub fn date_string(&self) -> &str {
        &self
            .0
            .as_ref()
            .expect("date_string called on an empty NullableDate")
            .server_date_str
    }

    pub fn ticks(&self) -> i64 {
        self.0
            .as_ref()
            .expect("ticks called on an empty NullableDate")
            .ticks
    }

    pub fn as_date(&self) -> Option<&DateData> {
        self.0.as_ref()
    }
}

impl From<DateData> for NullableDate {
    fn from(date: DateData) -> Self {
        Self(Some(date))
    }
}
