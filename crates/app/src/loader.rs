use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::controller::SchedulerController;

/// 周期刷新循环
///
/// 按固定间隔重新拉取整树快照；单次失败只记录并等待下一轮，
/// 失败详情已经由调度器的失败广播统一上报。
pub struct DataLoader {
    controller: Arc<SchedulerController>,
    refresh_interval: Duration,
}

impl DataLoader {
    pub fn new(controller: Arc<SchedulerController>, refresh_interval: Duration) -> Self {
        Self {
            controller,
            refresh_interval,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// 循环刷新直到关闭信号到来
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 第一拍立即完成，跳过以避免和启动序列重复加载
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.controller.refresh().await {
                        Ok(Some(snapshot)) => {
                            debug!(scheduler = %snapshot.name, "refreshed scheduler data");
                        }
                        Ok(None) => debug!("refresh result discarded as stale"),
                        Err(e) => warn!("scheduled refresh failed: {e}"),
                    }
                }
                _ = shutdown_rx.recv() => {
                    debug!("data loader stopping");
                    break;
                }
            }
        }
    }
}
