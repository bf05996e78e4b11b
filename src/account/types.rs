// 百度帐号数据类型定义

use serde::{Deserialize, Serialize};

/// 百度帐号信息
///
/// 配置模块只按 UID 查找帐号，不解析也不修改其余字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaiduAccount {
    /// 用户ID
    pub uid: u64,
    /// 用户名
    pub name: String,
    /// 性别
    pub sex: String,
    /// 帐号年龄（年）
    pub age: f64,
    /// BDUSS凭证
    pub bduss: String,
    /// PTOKEN凭证
    pub ptoken: String,
    /// STOKEN凭证
    pub stoken: String,
    /// 网盘工作目录
    pub workdir: String,
}

impl Default for BaiduAccount {
    fn default() -> Self {
        Self {
            uid: 0,
            name: String::new(),
            sex: String::new(),
            age: 0.0,
            bduss: String::new(),
            ptoken: String::new(),
            stoken: String::new(),
            workdir: "/".to_string(),
        }
    }
}

impl BaiduAccount {
    /// 创建新的帐号记录
    pub fn new(uid: u64, name: impl Into<String>, bduss: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            bduss: bduss.into(),
            ..Default::default()
        }
    }

    /// 显示名称（用户名为空时回退到 UID）
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("uid:{}", self.uid)
        } else {
            self.name.clone()
        }
    }
}
