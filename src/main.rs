use anyhow::{Context, Result};
use baidupcs_config::{
    logging::{self, LogConfig},
    ConfigStore, SharedUserAgent,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "baidupcs-config")]
#[command(about = "查看和修改 BaiduPCS 命令行客户端的配置")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 配置文件路径（默认位于可执行文件同级目录）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// 日志文件目录（不指定则只输出到控制台）
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 显示当前配置
    Show,
    /// 修改配置并保存
    Set(SetArgs),
    /// 列出百度帐号
    Users,
    /// 切换当前百度帐号
    Switch { uid: u64 },
    /// 删除百度帐号
    Remove { uid: u64 },
}

#[derive(Debug, Args)]
struct SetArgs {
    #[arg(long)]
    appid: Option<i64>,
    /// 下载缓存（字节）
    #[arg(long)]
    cache_size: Option<i64>,
    /// 最大下载并发量
    #[arg(long)]
    max_parallel: Option<i64>,
    /// 浏览器标识，传空字符串恢复默认
    #[arg(long)]
    user_agent: Option<String>,
    /// 下载储存路径
    #[arg(long)]
    savedir: Option<String>,
}

impl SetArgs {
    fn is_empty(&self) -> bool {
        self.appid.is_none()
            && self.cache_size.is_none()
            && self.max_parallel.is_none()
            && self.user_agent.is_none()
            && self.savedir.is_none()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init_logging(&LogConfig {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    });

    let mut store = match &cli.config {
        Some(path) => ConfigStore::new(path, baidupcs_config::config::default_save_dir()),
        None => ConfigStore::at_executable_dir(),
    };
    let user_agent = SharedUserAgent::new();
    store.initialize(&user_agent);

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => print_config(&store),
        Commands::Set(args) => {
            if args.is_empty() {
                anyhow::bail!("未指定要修改的配置项");
            }
            apply_set(&mut store, args)?;
            save(&mut store)?;
            store.apply_user_agent(&user_agent);
            print_config(&store);
        }
        Commands::Users => print_users(&store),
        Commands::Switch { uid } => {
            let account = store
                .switch_active_user(uid)
                .with_context(|| format!("切换百度帐号失败: uid={}", uid))?;
            info!("切换百度帐号: {}", account.display_name());
            save(&mut store)?;
            print_users(&store);
        }
        Commands::Remove { uid } => {
            let removed = store
                .remove_user(uid)
                .with_context(|| format!("删除百度帐号失败: uid={}", uid))?;
            info!("已删除百度帐号: {}", removed.display_name());
            save(&mut store)?;
            print_users(&store);
        }
    }

    Ok(())
}

fn apply_set(store: &mut ConfigStore, args: SetArgs) -> Result<()> {
    let config = store.config_mut();
    if let Some(appid) = args.appid {
        config.set_app_id(appid)?;
    }
    if let Some(cache_size) = args.cache_size {
        config.set_cache_size(cache_size)?;
    }
    if let Some(max_parallel) = args.max_parallel {
        config.set_max_parallel(max_parallel)?;
    }
    if let Some(user_agent) = args.user_agent {
        config.set_user_agent(user_agent);
    }
    if let Some(savedir) = args.savedir {
        config.set_save_dir(&savedir)?;
    }
    Ok(())
}

/// 保存配置，重载失败只提示
fn save(store: &mut ConfigStore) -> Result<()> {
    let outcome = store.save().context("保存配置失败")?;
    if let Err(e) = outcome.reload {
        eprintln!("warning: {}", e);
    }
    Ok(())
}

fn print_config(store: &ConfigStore) {
    let config = store.config();
    let active = store
        .active_account()
        .map(|account| format!("{} (uid: {})", account.display_name(), account.uid))
        .unwrap_or_else(|| "未登录".to_string());
    let user_agent = if config.user_agent.is_empty() {
        "默认"
    } else {
        config.user_agent.as_str()
    };

    println!("配置文件: {}", store.path().display());
    println!("当前帐号: {}", active);
    println!("appid: {}", config.app_id);
    println!("cache_size: {}", config.cache_size);
    println!("max_parallel: {}", config.max_parallel);
    println!("user_agent: {}", user_agent);
    println!("savedir: {}", config.save_dir);
}

fn print_users(store: &ConfigStore) {
    let config = store.config();
    if config.baidu_user_list.is_empty() {
        println!("帐号列表为空");
        return;
    }

    for (index, account) in config.baidu_user_list.iter().enumerate() {
        let marker = if account.uid == config.baidu_active_uid {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:>2}  uid: {:<12} {}",
            marker,
            index + 1,
            account.uid,
            account.display_name()
        );
    }
}
