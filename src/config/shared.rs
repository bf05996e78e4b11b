// 多线程共享的配置存储

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::store::{ConfigStore, SaveOutcome, StoreState};
use super::user_agent::UserAgentSink;
use super::PcsConfig;
use crate::account::BaiduAccount;
use crate::error::Result;

/// 线程安全的配置存储
///
/// 配置记录和当前帐号由同一把锁保护，save / reload 的读改写过程不会交错
#[derive(Debug, Clone)]
pub struct SharedConfigStore {
    inner: Arc<Mutex<ConfigStore>>,
}

impl SharedConfigStore {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// 获取锁，在一次加锁内完成多个操作
    pub fn lock(&self) -> MutexGuard<'_, ConfigStore> {
        self.inner.lock()
    }

    pub fn initialize(&self, sink: &dyn UserAgentSink) -> StoreState {
        self.inner.lock().initialize(sink)
    }

    pub fn load(&self) -> Result<()> {
        self.inner.lock().load()
    }

    pub fn reload(&self) -> Result<()> {
        self.inner.lock().reload()
    }

    pub fn save(&self) -> Result<SaveOutcome> {
        self.inner.lock().save()
    }

    pub fn update_active_account(&self) -> Result<BaiduAccount> {
        self.inner.lock().update_active_account().cloned()
    }

    /// 修改配置后保存，修改和保存在同一次加锁内完成
    ///
    /// 修改在副本上进行，`updater` 返回错误时内存配置保持不变
    pub fn update<F>(&self, updater: F) -> Result<SaveOutcome>
    where
        F: FnOnce(&mut PcsConfig) -> Result<()>,
    {
        let mut store = self.inner.lock();
        let mut next = store.config().clone();
        updater(&mut next)?;
        *store.config_mut() = next;
        store.save()
    }

    /// 当前配置快照
    pub fn config(&self) -> PcsConfig {
        self.inner.lock().config().clone()
    }

    /// 当前百度帐号快照
    pub fn active_account(&self) -> Option<BaiduAccount> {
        self.inner.lock().active_account().cloned()
    }
}
