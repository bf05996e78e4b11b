//! 浏览器标识
//!
//! 加载配置只负责解析，自定义浏览器标识由调用方通过 [`UserAgentSink`] 显式应用

use parking_lot::RwLock;
use std::sync::Arc;

/// 浏览器标识接收方（如网盘 HTTP 客户端）
pub trait UserAgentSink {
    fn set_user_agent(&self, user_agent: &str);

    /// 恢复默认标识
    fn reset_user_agent(&self);
}

/// 进程内共享的浏览器标识
///
/// 克隆后共享同一份数据，HTTP 客户端构建请求时读取
#[derive(Debug, Clone, Default)]
pub struct SharedUserAgent {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedUserAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前自定义标识，`None` 表示使用默认标识
    pub fn current(&self) -> Option<String> {
        self.inner.read().clone()
    }
}

impl UserAgentSink for SharedUserAgent {
    fn set_user_agent(&self, user_agent: &str) {
        tracing::debug!("设置浏览器标识: {}", user_agent);
        *self.inner.write() = Some(user_agent.to_string());
    }

    fn reset_user_agent(&self) {
        *self.inner.write() = None;
    }
}
