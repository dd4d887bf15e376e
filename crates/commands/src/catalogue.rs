use std::marker::PhantomData;

use console_domain::{EnvironmentData, JobDetails, SchedulerData};
use console_errors::{ConsoleError, ConsoleResult};
use serde_json::{json, Value};

/// 命令目录（封闭集合）
///
/// 每个变体携带自己的必填参数；命令只是数据加标识，不含行为。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetEnvironmentData,
    GetData,
    StartScheduler,
    StopScheduler,
    PauseGroup { group: String },
    ResumeGroup { group: String },
    PauseJob { group: String, job: String },
    ResumeJob { group: String, job: String },
    PauseTrigger { group: String, trigger: String },
    ResumeTrigger { group: String, trigger: String },
    GetJobDetails { group: String, job: String },
}

impl Command {
    /// 服务端路由用的稳定命令码
    pub fn code(&self) -> &'static str {
        match self {
            Command::GetEnvironmentData => "get_env",
            Command::GetData => "get_data",
            Command::StartScheduler => "start_scheduler",
            Command::StopScheduler => "stop_scheduler",
            Command::PauseGroup { .. } => "pause_group",
            Command::ResumeGroup { .. } => "resume_group",
            Command::PauseJob { .. } => "pause_job",
            Command::ResumeJob { .. } => "resume_job",
            Command::PauseTrigger { .. } => "pause_trigger",
            Command::ResumeTrigger { .. } => "resume_trigger",
            Command::GetJobDetails { .. } => "get_job_details",
        }
    }

    /// 进度展示用的动作描述，不参与正确性
    pub fn message(&self) -> &'static str {
        match self {
            Command::GetEnvironmentData => "Loading environment settings",
            Command::GetData => "Loading scheduler data",
            Command::StartScheduler => "Starting the scheduler",
            Command::StopScheduler => "Stopping the scheduler",
            Command::PauseGroup { .. } => "Pausing group",
            Command::ResumeGroup { .. } => "Resuming group",
            Command::PauseJob { .. } => "Pausing job",
            Command::ResumeJob { .. } => "Resuming job",
            Command::PauseTrigger { .. } => "Pausing trigger",
            Command::ResumeTrigger { .. } => "Resuming trigger",
            Command::GetJobDetails { .. } => "Loading job details",
        }
    }

    /// 命令参数渲染为JSON对象
    pub fn payload(&self) -> Value {
        match self {
            Command::GetEnvironmentData
            | Command::GetData
            | Command::StartScheduler
            | Command::StopScheduler => json!({}),
            Command::PauseGroup { group } | Command::ResumeGroup { group } => {
                json!({ "group": group })
            }
            Command::PauseJob { group, job }
            | Command::ResumeJob { group, job }
            | Command::GetJobDetails { group, job } => {
                json!({ "group": group, "job": job })
            }
            Command::PauseTrigger { group, trigger }
            | Command::ResumeTrigger { group, trigger } => {
                json!({ "group": group, "trigger": trigger })
            }
        }
    }

    /// 必填参数不允许为空白，构造阶段即失败
    pub fn validate(&self) -> ConsoleResult<()> {
        match self {
            Command::GetEnvironmentData
            | Command::GetData
            | Command::StartScheduler
            | Command::StopScheduler => Ok(()),
            Command::PauseGroup { group } | Command::ResumeGroup { group } => {
                require(group, self.code(), "group")
            }
            Command::PauseJob { group, job }
            | Command::ResumeJob { group, job }
            | Command::GetJobDetails { group, job } => {
                require(group, self.code(), "group")?;
                require(job, self.code(), "job")
            }
            Command::PauseTrigger { group, trigger }
            | Command::ResumeTrigger { group, trigger } => {
                require(group, self.code(), "group")?;
                require(trigger, self.code(), "trigger")
            }
        }
    }
}

fn require(value: &str, command: &'static str, field: &'static str) -> ConsoleResult<()> {
    if value.trim().is_empty() {
        return Err(ConsoleError::invalid_payload(command, field));
    }
    Ok(())
}

/// 响应类型在构造时即固定的命令请求
///
/// `R` 是该命令约定的响应负载类型，由各构造函数静态决定，
/// 调度器按此类型解码，不在运行期猜测。
#[derive(Debug, Clone)]
pub struct CommandRequest<R> {
    command: Command,
    _response: PhantomData<fn() -> R>,
}

impl<R> CommandRequest<R> {
    fn unchecked(command: Command) -> Self {
        Self {
            command,
            _response: PhantomData,
        }
    }

    fn checked(command: Command) -> ConsoleResult<Self> {
        command.validate()?;
        Ok(Self::unchecked(command))
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn code(&self) -> &'static str {
        self.command.code()
    }

    pub fn message(&self) -> &'static str {
        self.command.message()
    }

    pub fn payload(&self) -> Value {
        self.command.payload()
    }
}

impl CommandRequest<EnvironmentData> {
    pub fn get_environment_data() -> Self {
        Self::unchecked(Command::GetEnvironmentData)
    }
}

impl CommandRequest<SchedulerData> {
    pub fn get_data() -> Self {
        Self::unchecked(Command::GetData)
    }

    pub fn start_scheduler() -> Self {
        Self::unchecked(Command::StartScheduler)
    }

    pub fn stop_scheduler() -> Self {
        Self::unchecked(Command::StopScheduler)
    }

    pub fn pause_group(group: impl Into<String>) -> ConsoleResult<Self> {
        Self::checked(Command::PauseGroup {
            group: group.into(),
        })
    }

    pub fn resume_group(group: impl Into<String>) -> ConsoleResult<Self> {
        Self::checked(Command::ResumeGroup {
            group: group.into(),
        })
    }

    pub fn pause_job(group: impl Into<String>, job: impl Into<String>) -> ConsoleResult<Self> {
        Self::checked(Command::PauseJob {
            group: group.into(),
            job: job.into(),
        })
    }

    pub fn resume_job(group: impl Into<String>, job: impl Into<String>) -> ConsoleResult<Self> {
        Self::checked(Command::ResumeJob {
            group: group.into(),
            job: job.into(),
        })
    }

    pub fn pause_trigger(
        group: impl Into<String>,
        trigger: impl Into<String>,
    ) -> ConsoleResult<Self> {
        Self::checked(Command::PauseTrigger {
            group: group.into(),
            trigger: trigger.into(),
        })
    }

    pub fn resume_trigger(
        group: impl Into<String>,
        trigger: impl Into<String>,
    ) -> ConsoleResult<Self> {
        Self::checked(Command::ResumeTrigger {
            group: group.into(),
            trigger: trigger.into(),
        })
    }
}

impl CommandRequest<JobDetails> {
    pub fn get_job_details(group: impl Into<String>, job: impl Into<String>) -> ConsoleResult<Self> {
        Self::checked(Command::GetJobDetails {
            group: group.into(),
            job: job.into(),
        })
    }
}
