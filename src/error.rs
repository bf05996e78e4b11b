// 配置错误类型

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 配置模块错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在、不可读或不可写
    #[error("配置文件读写失败: {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 配置文件内容格式错误
    #[error("配置文件解析失败: {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 配置序列化失败
    #[error("配置序列化失败: {0}")]
    Serialize(#[source] serde_json::Error),

    /// 帐号列表中不存在该 UID
    #[error("百度帐号不存在: uid={uid}")]
    AccountNotFound { uid: u64 },

    /// 配置项取值非法
    #[error("配置项 {field} 取值非法: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为文件不存在（首次启动）
    pub fn is_not_found_file(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found_file() {
        let err = ConfigError::io("pcs_config.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found_file());

        let err = ConfigError::io(
            "pcs_config.json",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_not_found_file());

        assert!(!ConfigError::AccountNotFound { uid: 1 }.is_not_found_file());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidValue {
            field: "appid",
            reason: "必须大于 0".to_string(),
        };
        assert_eq!(err.to_string(), "配置项 appid 取值非法: 必须大于 0");

        let err = ConfigError::AccountNotFound { uid: 42 };
        assert_eq!(err.to_string(), "百度帐号不存在: uid=42");
    }
}
