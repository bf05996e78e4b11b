// 路径解析

use std::path::{Path, PathBuf};

/// 配置文件名（位于可执行文件同级目录）
pub const CONFIG_FILE_NAME: &str = "pcs_config.json";

/// 默认下载目录名
pub const DOWNLOAD_DIR_NAME: &str = "download";

/// 将文件名拼接到可执行文件所在目录
///
/// 无法获取可执行文件路径时回退为相对路径
pub fn executable_path_join(name: impl AsRef<Path>) -> PathBuf {
    match std::env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(exe_dir) => exe_dir.join(name),
            None => PathBuf::from(name.as_ref()),
        },
        Err(e) => {
            tracing::warn!("获取可执行文件路径失败，使用相对路径: {}", e);
            PathBuf::from(name.as_ref())
        }
    }
}

/// 默认配置文件路径
pub fn config_file_path() -> PathBuf {
    executable_path_join(CONFIG_FILE_NAME)
}

/// 默认下载目录
pub fn default_save_dir() -> PathBuf {
    executable_path_join(DOWNLOAD_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_next_to_executable() {
        let exe_dir = std::env::current_exe()
            .unwrap()
            .parent()
            .unwrap()
            .to_path_buf();

        assert_eq!(config_file_path(), exe_dir.join("pcs_config.json"));
        assert_eq!(default_save_dir(), exe_dir.join("download"));
        assert!(default_save_dir().is_absolute());
    }
}
