//! 配置存储
//!
//! 负责配置文件的加载、修正、保存和重载，并维护当前百度帐号
//!
//! ## 状态流转
//!
//! ```text
//! Uninitialized --load 成功--> Loaded <--save/reload--> Loaded
//! Uninitialized --load 失败--> DefaultsOnly --save 成功--> Loaded
//! ```
//!
//! 每次操作都独立打开并关闭配置文件，不持有文件句柄

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::paths;
use super::user_agent::UserAgentSink;
use super::PcsConfig;
use crate::account::BaiduAccount;
use crate::error::{ConfigError, Result};

/// 配置存储状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// 尚未加载
    Uninitialized,
    /// 内存配置来自配置文件
    Loaded,
    /// 配置文件不可用，内存中为默认配置
    DefaultsOnly,
}

/// 保存结果
///
/// 写入成功后会立即重载，重载结果单独记录，不影响保存本身的成功
#[derive(Debug)]
pub struct SaveOutcome {
    /// 保存后重载的结果
    pub reload: Result<()>,
}

impl SaveOutcome {
    /// 重载是否成功（配置和当前帐号均已刷新）
    pub fn is_reloaded(&self) -> bool {
        self.reload.is_ok()
    }
}

/// 配置存储
///
/// 持有唯一的配置记录和由 `baidu_active_uid` 派生出的当前帐号
#[derive(Debug)]
pub struct ConfigStore {
    /// 配置文件路径
    path: PathBuf,
    /// 默认下载目录
    default_save_dir: PathBuf,
    /// 当前配置
    config: PcsConfig,
    /// 当前百度帐号
    active: Option<BaiduAccount>,
    state: StoreState,
}

impl ConfigStore {
    /// 创建配置存储，内存中为默认配置
    pub fn new(path: impl Into<PathBuf>, default_save_dir: impl Into<PathBuf>) -> Self {
        let default_save_dir = default_save_dir.into();
        Self {
            path: path.into(),
            config: PcsConfig::with_defaults(&default_save_dir),
            default_save_dir,
            active: None,
            state: StoreState::Uninitialized,
        }
    }

    /// 使用可执行文件同级目录下的配置文件和下载目录
    pub fn at_executable_dir() -> Self {
        Self::new(paths::config_file_path(), paths::default_save_dir())
    }

    /// 初始化配置
    ///
    /// 加载失败时使用默认配置并尝试创建配置文件，所有失败只记录日志，
    /// 返回后内存中始终有可用的配置
    pub fn initialize(&mut self, sink: &dyn UserAgentSink) -> StoreState {
        if let Err(e) = self.load() {
            if e.is_not_found_file() {
                info!("首次启动, 配置文件不存在, 自动初始化配置文件: {:?}", self.path);
            } else {
                warn!("错误: {}, 自动初始化配置文件", e);
            }
            self.state = StoreState::DefaultsOnly;

            if let Err(e) = self.save() {
                error!("创建默认配置文件失败: {}", e);
            }
        }

        if let Err(e) = self.update_active_account() {
            warn!("更新当前百度帐号失败: {}", e);
        }

        self.apply_user_agent(sink);

        info!(
            "配置初始化完成: 状态={:?}, 路径={:?}",
            self.state, self.path
        );
        self.state
    }

    /// 从配置文件加载配置
    ///
    /// 读取或解析失败时内存中的配置保持不变
    pub fn load(&mut self) -> Result<()> {
        let data = fs::read(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;

        let mut config: PcsConfig =
            serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let fixed = config.normalize(&self.default_save_dir);
        if !fixed.is_empty() {
            debug!("已修正配置项: {:?}", fixed);
        }

        self.config = config;
        self.state = StoreState::Loaded;

        info!("配置文件加载成功: {:?}", self.path);
        Ok(())
    }

    /// 从配置文件重载配置并更新当前百度帐号
    ///
    /// 任一步失败时当前帐号保持原值
    pub fn reload(&mut self) -> Result<()> {
        self.load()?;
        self.update_active_account()?;
        Ok(())
    }

    /// 保存配置到配置文件, 并重载配置
    ///
    /// 先写入临时文件再重命名，写入中断不会破坏原配置文件
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let data = self.to_json()?;
        write_atomic(&self.path, &data)?;

        info!("✓ 配置已保存: {:?}", self.path);

        let reload = self.reload();
        if let Err(e) = &reload {
            warn!("配置已保存，但重载失败: {}", e);
        }

        Ok(SaveOutcome { reload })
    }

    /// 更新当前百度帐号
    ///
    /// 找不到时当前帐号保持原值
    pub fn update_active_account(&mut self) -> Result<&BaiduAccount> {
        let account = self
            .config
            .get_user_by_uid(self.config.baidu_active_uid)?
            .clone();

        debug!("当前百度帐号: {}", account.display_name());
        let active = self.active.insert(account);
        Ok(&*active)
    }

    /// 切换当前百度帐号
    pub fn switch_active_user(&mut self, uid: u64) -> Result<&BaiduAccount> {
        self.config.get_user_by_uid(uid)?;
        self.config.baidu_active_uid = uid;
        self.update_active_account()
    }

    /// 删除百度帐号
    ///
    /// 删除的是当前帐号时，当前帐号 UID 重置为 0
    pub fn remove_user(&mut self, uid: u64) -> Result<BaiduAccount> {
        let removed = self.config.remove_user_by_uid(uid)?;

        if self.config.baidu_active_uid == uid {
            self.config.baidu_active_uid = 0;
            self.active = None;
            info!("已删除当前百度帐号: {}", removed.display_name());
        }

        Ok(removed)
    }

    /// 应用自定义浏览器标识
    ///
    /// 未设置时让接收方恢复默认标识，返回是否应用了自定义标识
    pub fn apply_user_agent(&self, sink: &dyn UserAgentSink) -> bool {
        if self.config.user_agent.is_empty() {
            sink.reset_user_agent();
            return false;
        }
        sink.set_user_agent(&self.config.user_agent);
        true
    }

    /// 当前配置
    pub fn config(&self) -> &PcsConfig {
        &self.config
    }

    /// 可变配置
    ///
    /// 修改 `baidu_active_uid` 后需调用 [`Self::update_active_account`] 或 [`Self::save`]
    pub fn config_mut(&mut self) -> &mut PcsConfig {
        &mut self.config
    }

    /// 当前百度帐号
    pub fn active_account(&self) -> Option<&BaiduAccount> {
        self.active.as_ref()
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_save_dir(&self) -> &Path {
        &self.default_save_dir
    }

    /// 序列化为以 Tab 缩进的 JSON
    fn to_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.config
            .serialize(&mut serializer)
            .map_err(ConfigError::Serialize)?;
        Ok(buf)
    }
}

/// 写入临时文件后原子重命名
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            debug!("已创建目录: {:?}", parent);
        }
    }

    let temp_path = path.with_extension("json.tmp");

    // 沿用原配置文件的权限，避免保存后凭证文件权限被放宽
    let permissions = fs::metadata(path).ok().map(|metadata| metadata.permissions());

    let write = || -> std::io::Result<()> {
        let file = File::create(&temp_path)?;
        if let Some(permissions) = &permissions {
            file.set_permissions(permissions.clone())?;
        }
        let mut writer = BufWriter::new(file);
        writer.write_all(data)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    };

    if let Err(e) = write() {
        let _ = fs::remove_file(&temp_path);
        return Err(ConfigError::io(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ConfigError::io(path, e)
    })
}
