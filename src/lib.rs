// BaiduPCS 配置管理库
// 百度网盘命令行客户端的持久化配置

// 百度帐号模块
pub mod account;

// 配置管理模块
pub mod config;

// 错误类型
pub mod error;

// 日志模块
pub mod logging;

// 导出常用类型
pub use account::BaiduAccount;
pub use config::{
    ConfigStore, PcsConfig, SaveOutcome, SharedConfigStore, SharedUserAgent, StoreState,
    UserAgentSink,
};
pub use error::ConfigError;
