use std::collections::HashSet;

use console_errors::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};

use crate::value_objects::{NullableDate, Status};

/// 可管理节点（分组/任务/触发器）的统一视图
///
/// `can_start`/`can_pause` 是服务端计算的操作许可，客户端不做推断。
pub trait ManagedActivity {
    fn name(&self) -> &str;
    fn status(&self) -> Status;
    fn can_start(&self) -> bool;
    fn can_pause(&self) -> bool;
}

macro_rules! impl_managed_activity {
    ($ty:ty) => {
        impl ManagedActivity for $ty {
            fn name(&self) -> &str {
                &self.name
            }
            fn status(&self) -> Status {
                self.status
            }
            fn can_start(&self) -> bool {
                self.can_start
            }
            fn can_pause(&self) -> bool {
                self.can_pause
            }
        }
    };
}

/// 调度器状态快照，每次快照整树替换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchedulerData {
    pub name: String,
    pub status: Status,
    pub instance_id: String,
    #[serde(default)]
    pub running_since: NullableDate,
    pub jobs_total: u32,
    pub jobs_executed: u32,
    pub can_start: bool,
    pub can_shutdown: bool,
    pub is_remote: bool,
    pub scheduler_type_name: String,
    pub job_groups: Vec<JobGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobGroup {
    pub name: String,
    pub status: Status,
    pub can_start: bool,
    pub can_pause: bool,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Job {
    pub name: String,
    pub status: Status,
    pub can_start: bool,
    pub can_pause: bool,
    /// 所属分组名，仅用于反查，不表示所有权
    pub group_name: String,
    /// 服务端生成的复合键（分组名+任务名）
    pub unique_name: String,
    pub has_triggers: bool,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trigger {
    pub name: String,
    pub status: Status,
    pub can_start: bool,
    pub can_pause: bool,
    #[serde(default)]
    pub start_date: NullableDate,
    #[serde(default)]
    pub end_date: NullableDate,
    #[serde(default)]
    pub next_fire_date: NullableDate,
    #[serde(default)]
    pub previous_fire_date: NullableDate,
}

impl_managed_activity!(JobGroup);
impl_managed_activity!(Job);
impl_managed_activity!(Trigger);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Property {
    pub name: String,
    pub type_name: String,
    pub value: String,
}

/// 任务详情（数据映射 + 属性），由 get_job_details 命令返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDetails {
    pub job_data_map: Vec<Property>,
    pub job_properties: Vec<Property>,
}

/// 环境描述，启动序列第一阶段返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentData {
    pub self_version: String,
    pub scheduler_version: String,
    pub runtime_version: String,
    #[serde(default)]
    pub custom_css_url: Option<String>,
}

impl SchedulerData {
    /// 校验快照内部一致性：作用域内键唯一、任务反查分组名一致
    ///
    /// 状态聚合值由服务端下发，这里不做校验也不做重算。
    pub fn validate(&self) -> ConsoleResult<()> {
        let mut group_names = HashSet::new();
        for group in &self.job_groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(ConsoleError::snapshot_integrity(format!(
                    "duplicate group name: {}",
                    group.name
                )));
            }
            let mut job_names = HashSet::new();
            for job in &group.jobs {
                if !job_names.insert(job.name.as_str()) {
                    return Err(ConsoleError::snapshot_integrity(format!(
                        "duplicate job name in group {}: {}",
                        group.name, job.name
                    )));
                }
                if job.group_name != group.name {
                    return Err(ConsoleError::snapshot_integrity(format!(
                        "job {} carries group name {} inside group {}",
                        job.name, job.group_name, group.name
                    )));
                }
                let mut trigger_names = HashSet::new();
                for trigger in &job.triggers {
                    if !trigger_names.insert(trigger.name.as_str()) {
                        return Err(ConsoleError::snapshot_integrity(format!(
                            "duplicate trigger name in job {}: {}",
                            job.unique_name, trigger.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn job_group(&self, name: &str) -> Option<&JobGroup> {
        self.job_groups.iter().find(|group| group.name == name)
    }

    pub fn find_job(&self, group: &str, job: &str) -> Option<&Job> {
        self.job_group(group)
            .and_then(|g| g.jobs.iter().find(|j| j.name == job))
    }

    pub fn is_running(&self) -> bool {
        !self.running_since.is_empty()
    }
}

impl JobGroup {
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
