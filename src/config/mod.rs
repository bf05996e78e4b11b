// 配置管理模块

pub mod paths;
pub mod shared;
pub mod store;
pub mod user_agent;

use crate::account::{self, BaiduAccount};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use paths::{default_save_dir, executable_path_join, CONFIG_FILE_NAME};
pub use shared::SharedConfigStore;
pub use store::{ConfigStore, SaveOutcome, StoreState};
pub use user_agent::{SharedUserAgent, UserAgentSink};

/// 默认 appid
pub const DEFAULT_APP_ID: i64 = 260149;

/// 默认下载缓存大小（字节）
pub const DEFAULT_CACHE_SIZE: i64 = 1024;

/// 默认最大下载并发量
pub const DEFAULT_MAX_PARALLEL: i64 = 100;

/// 旧版本配置中表示"未设置"的下载目录
pub const LEGACY_SAVE_DIR: &str = "download";

/// 配置详情
///
/// `Default` 为全零值，对应配置文件中缺失字段的取值；
/// 进程启动时的默认配置使用 [`PcsConfig::with_defaults`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcsConfig {
    /// 当前百度帐号 UID，0 表示未选择
    pub baidu_active_uid: u64,
    /// 百度帐号列表
    pub baidu_user_list: Vec<BaiduAccount>,

    /// appid
    #[serde(rename = "appid")]
    pub app_id: i64,

    /// 下载缓存
    pub cache_size: i64,
    /// 最大下载并发量
    pub max_parallel: i64,

    /// 浏览器标识，空表示使用默认标识
    pub user_agent: String,
    /// 下载储存路径
    #[serde(rename = "savedir")]
    pub save_dir: String,
}

impl PcsConfig {
    /// 创建默认配置
    pub fn with_defaults(default_save_dir: &Path) -> Self {
        Self {
            baidu_active_uid: 0,
            baidu_user_list: Vec::new(),
            app_id: DEFAULT_APP_ID,
            cache_size: DEFAULT_CACHE_SIZE,
            max_parallel: DEFAULT_MAX_PARALLEL,
            user_agent: String::new(),
            save_dir: default_save_dir.to_string_lossy().into_owned(),
        }
    }

    /// 修正缺失值和旧版本遗留值
    ///
    /// 返回被修正的字段名
    pub fn normalize(&mut self, default_save_dir: &Path) -> Vec<&'static str> {
        let mut fixed = Vec::new();

        // 下载目录为空处理, 旧版本兼容
        if self.save_dir.is_empty() || self.save_dir == LEGACY_SAVE_DIR {
            self.save_dir = default_save_dir.to_string_lossy().into_owned();
            fixed.push("savedir");
        }

        if self.app_id <= 0 {
            self.app_id = DEFAULT_APP_ID;
            fixed.push("appid");
        }

        fixed
    }

    /// 按 UID 获取百度帐号
    pub fn get_user_by_uid(&self, uid: u64) -> Result<&BaiduAccount> {
        account::find_by_uid(&self.baidu_user_list, uid).ok_or(ConfigError::AccountNotFound { uid })
    }

    /// 添加或更新百度帐号，返回是否替换了已有帐号
    pub fn upsert_user(&mut self, user: BaiduAccount) -> bool {
        account::upsert(&mut self.baidu_user_list, user)
    }

    /// 删除百度帐号
    pub fn remove_user_by_uid(&mut self, uid: u64) -> Result<BaiduAccount> {
        account::remove_by_uid(&mut self.baidu_user_list, uid)
    }

    /// 设置 appid
    pub fn set_app_id(&mut self, app_id: i64) -> Result<()> {
        if app_id <= 0 {
            return Err(invalid("appid", format!("必须大于 0，当前值: {}", app_id)));
        }
        self.app_id = app_id;
        Ok(())
    }

    /// 设置下载缓存大小
    pub fn set_cache_size(&mut self, cache_size: i64) -> Result<()> {
        if cache_size <= 0 {
            return Err(invalid("cache_size", format!("必须大于 0，当前值: {}", cache_size)));
        }
        self.cache_size = cache_size;
        Ok(())
    }

    /// 设置最大下载并发量
    pub fn set_max_parallel(&mut self, max_parallel: i64) -> Result<()> {
        if max_parallel <= 0 {
            return Err(invalid(
                "max_parallel",
                format!("必须大于 0，当前值: {}", max_parallel),
            ));
        }
        self.max_parallel = max_parallel;
        Ok(())
    }

    /// 设置浏览器标识，空字符串恢复默认标识
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// 设置下载储存路径
    pub fn set_save_dir(&mut self, save_dir: &str) -> Result<()> {
        let save_dir = save_dir.trim();
        if save_dir.is_empty() {
            return Err(invalid("savedir", "下载目录不能为空".to_string()));
        }
        self.save_dir = save_dir.to_string();
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
