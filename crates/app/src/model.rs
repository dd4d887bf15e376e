use std::sync::Arc;

use console_domain::SchedulerData;
use tokio::sync::{broadcast, RwLock};

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// 当前快照的持有者
///
/// 整树替换：快照在发布前冻结为 Arc，观察者不可能看到半更新的
/// 树；每次 set_data 恰好发出一次变更通知，所有订阅者收到同一份
/// 快照。模型实例由应用装配层显式构造并传引用，没有全局单例。
pub struct ApplicationModel {
    current: RwLock<Option<Arc<SchedulerData>>>,
    changes_tx: broadcast::Sender<Arc<SchedulerData>>,
}

impl ApplicationModel {
    pub fn new() -> Self {
        let (changes_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            current: RwLock::new(None),
            changes_tx,
        }
    }

    /// 原子替换快照并广播一次变更通知
    pub async fn set_data(&self, data: SchedulerData) -> Arc<SchedulerData> {
        let snapshot = Arc::new(data);
        {
            let mut current = self.current.write().await;
            *current = Some(Arc::clone(&snapshot));
        }
        // 忽略发送错误（可能没有订阅者）
        let _ = self.changes_tx.send(Arc::clone(&snapshot));
        snapshot
    }

    pub async fn current(&self) -> Option<Arc<SchedulerData>> {
        self.current.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SchedulerData>> {
        self.changes_tx.subscribe()
    }
}

impl Default for ApplicationModel {
    fn default() -> Self {
        Self::new()
    }
}
