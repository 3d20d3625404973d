//! docnav TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)，导航状态由 `docnav_core::NavigationController` 持有
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)，唯一修改 Model 的地方
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//!
//! 启动顺序：
//!     init_logging()          // 日志写入滚动文件，避免破坏备用屏幕
//!     ProfileStore::load()    // 读取连接配置，失败则直接退出（非零状态码）
//!     init_terminal()         // 进入 raw mode 与备用屏幕
//!     app::run()              // 主循环
//!     restore_terminal()      // 无论成功与否，都恢复终端

mod app;
mod event;
pub mod i18n;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use docnav_core::config::ProfileStore;
use docnav_core::NavigationController;
use docnav_provider::MongoGateway;
use tokio::sync::mpsc;

use util::{init_terminal, restore_terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 日志（guard 需要活到进程结束）
    let _log_guard = util::init_logging();
    util::apply_ui_settings();

    // 2. 读取连接配置
    let path = ProfileStore::resolve_path();
    let mut profiles = ProfileStore::load(&path)
        .await
        .with_context(|| format!("cannot load connection profiles from {}", path.display()))?;
    util::fill_missing_passwords(&mut profiles);

    // 3. 创建应用实例
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = NavigationController::new(Arc::new(MongoGateway::new()), profiles);
    let mut app = model::App::new(controller, tx);

    // 4. 初始化终端
    let mut terminal = init_terminal()?;

    // 5. 运行主循环
    let result = app::run(&mut terminal, &mut app, rx).await;

    // 6. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    log::info!("docnav exited");
    result
}
