use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use console_commands::CommandRequest;
use console_dispatcher::CommandDispatcher;
use console_domain::{JobDetails, SchedulerData};
use console_errors::ConsoleResult;
use tokio::sync::Mutex;
use tracing::debug;

use crate::model::ApplicationModel;

/// 命令到模型的调和管道
///
/// 变更类命令都返回完整快照。每次管道运行在发起命令前领取一个
/// 递增序号票据，返回的快照只有在没有更新票据已经应用时才写入
/// 模型；乱序完成的旧快照被丢弃（后发命令胜出），失败时模型不动。
pub struct SchedulerController {
    model: Arc<ApplicationModel>,
    dispatcher: Arc<CommandDispatcher>,
    issued_seq: AtomicU64,
    applied_seq: Mutex<u64>,
}

impl SchedulerController {
    pub fn new(model: Arc<ApplicationModel>, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self {
            model,
            dispatcher,
            issued_seq: AtomicU64::new(0),
            applied_seq: Mutex::new(0),
        }
    }

    /// 重新拉取整树快照
    pub async fn refresh(&self) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::get_data()).await
    }

    pub async fn start_scheduler(&self) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::start_scheduler())
            .await
    }

    pub async fn stop_scheduler(&self) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::stop_scheduler())
            .await
    }

    pub async fn pause_group(&self, group: &str) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::pause_group(group)?)
            .await
    }

    pub async fn resume_group(&self, group: &str) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::resume_group(group)?)
            .await
    }

    pub async fn pause_job(
        &self,
        group: &str,
        job: &str,
    ) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::pause_job(group, job)?)
            .await
    }

    pub async fn resume_job(
        &self,
        group: &str,
        job: &str,
    ) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::resume_job(group, job)?)
            .await
    }

    pub async fn pause_trigger(
        &self,
        group: &str,
        trigger: &str,
    ) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::pause_trigger(group, trigger)?)
            .await
    }

    pub async fn resume_trigger(
        &self,
        group: &str,
        trigger: &str,
    ) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        self.execute_and_apply(CommandRequest::resume_trigger(group, trigger)?)
            .await
    }

    /// 任务详情查询，不经过模型
    pub async fn job_details(&self, group: &str, job: &str) -> ConsoleResult<JobDetails> {
        self.dispatcher
            .execute(CommandRequest::get_job_details(group, job)?)
            .await
    }

    async fn execute_and_apply(
        &self,
        request: CommandRequest<SchedulerData>,
    ) -> ConsoleResult<Option<Arc<SchedulerData>>> {
        let ticket = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let code = request.code();

        let data = self.dispatcher.execute(request).await?;
        data.validate()?;

        // 应用顺序在锁内裁决，写入顺序与票据顺序一致
        let mut applied = self.applied_seq.lock().await;
        if ticket <= *applied {
            debug!(code, ticket, applied = *applied, "discarding stale snapshot");
            return Ok(None);
        }
        *applied = ticket;
        let snapshot = self.model.set_data(data).await;
        debug!(code, ticket, "snapshot applied");
        Ok(Some(snapshot))
    }
}
