//! SPAM Patch Client TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 配置、本地存储与运行时桥接 (`backend/`)
//!
//! 视图逻辑本身（调度器、表格、详情面板、可编辑字段）都在 `spam-core` 中，
//! 这里只负责把它们接到终端上。
//!
//!
//! main.rs
//! 程序入口
//!
//!     LocalConfigService::load()  // 读取配置文件，环境变量覆盖
//!     init_tracing()              // 日志写入数据目录下的文件，终端留给 UI
//!     tokio 运行时                 // 后端请求在这里执行
//!     HttpBackend / JsonFileStore // 注入 SharedServices
//!     update::start()             // 按起始路径导航
//!     init_terminal()
//!     app::run()                  // 主循环
//!     restore_terminal()          // 无论成功与否都恢复终端

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use spam_core::http_client::HttpBackend;
use spam_core::SharedServices;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::{AppConfig, Bridge, ConfigService, JsonFileStore, LocalConfigService};
use util::{init_terminal, restore_terminal};

fn main() -> Result<()> {
    // 1. 配置；首次运行时写出默认配置文件
    let config_service = LocalConfigService::new();
    let config = config_service.load()?;
    let first_run = !config_service.path().exists();

    // 2. 日志（失败不影响运行）
    if let Err(e) = init_tracing(&config) {
        eprintln!("Logging disabled: {e:#}");
    }
    tracing::info!(backend = %config.backend_url, "Starting SPAM patch client");

    if first_run {
        match config_service.save(&AppConfig::default()) {
            Ok(()) => tracing::info!(path = %config_service.path().display(), "Wrote default config"),
            Err(e) => tracing::warn!("Failed to write default config: {e:#}"),
        }
    }

    view::theme::set_theme_index(config.theme.index());

    // 3. 运行时与共享服务
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let http = HttpBackend::new(&config.backend_url, config.request_timeout())?
        .with_max_retries(config.max_retries);
    let storage = JsonFileStore::for_origin(http.endpoint());
    tracing::debug!(path = %storage.path().display(), "Using local storage");

    let services = Arc::new(SharedServices::new(
        Arc::new(http),
        Arc::new(storage),
        config.site_mode_ttl(),
    ));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let bridge = Bridge::new(runtime.handle().clone(), services, tx);

    // 4. 应用实例
    let mut app = model::App::new(bridge, &config.base_path);
    update::start(&mut app, config.start_path());

    // 5. 主循环，结束后无论成败都恢复终端
    let mut terminal = init_terminal()?;
    let result = app::run(&mut terminal, &mut app, &mut rx);
    restore_terminal(&mut terminal)?;

    runtime.shutdown_background();
    tracing::info!("SPAM patch client stopped");
    result
}

/// 日志文件路径
fn log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spam-tui")
        .join("spam-tui.log")
}

/// 初始化 tracing；`log` 记录（spam-core）经由 tracing-log 一并写入
fn init_tracing(config: &AppConfig) -> Result<()> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = match &config.log_filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}
