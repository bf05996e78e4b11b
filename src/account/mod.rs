// 百度帐号模块

pub mod registry;
pub mod types;

pub use registry::{find_by_uid, remove_by_uid, upsert};
pub use types::BaiduAccount;
