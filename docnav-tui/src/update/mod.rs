//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态，是唯一可以修改 Model 的地方。
//! 需要访问数据库的操作直接 await `NavigationController`；
//! 只有连接这一步在后台任务里进行，结果以 `AppMessage::Connect` 的形式回到这里。
//!
//! 有模块结构：
//!     mod connect;            // 后台连接事件
//!     mod content;            // 编辑器与增删导入导出
//!     mod modal;              // 弹窗子消息处理
//!     mod navigation;         // 列表面板子消息处理
//!
//! Gateway 错误不会终止主循环：统一经 `report` 记录日志并显示错误弹窗，
//! 导航状态保持不变，用户可以重试。

mod connect;
mod content;
mod modal;
mod navigation;

use docnav_core::CoreError;

use crate::i18n::t;
use crate::message::AppMessage;
use crate::model::{App, FocusPanel};

/// 处理应用消息，更新状态
pub async fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::ToggleFocus => {
            // 没有打开的文档时编辑器不可获得焦点
            if !app.modal.is_open() && app.nav.editor().is_open() {
                app.focus = app.focus.toggle();
            }
        }

        AppMessage::Navigation(nav_msg) => {
            navigation::update(app, nav_msg).await;
        }

        AppMessage::Content(content_msg) => {
            content::update(app, content_msg);
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg).await;
        }

        AppMessage::Connect(event) => {
            connect::update(app, event).await;
        }

        AppMessage::GoBack => {
            if app.focus.is_editor() {
                app.focus = FocusPanel::List;
            } else if app.nav.back() {
                app.clear_status();
            }
        }

        AppMessage::Refresh => match app.nav.refresh().await {
            Ok(()) => app.set_status(t().status_bar.refreshed),
            Err(e) => report(app, "refresh", &e),
        },

        AppMessage::ShowHelp => {
            app.modal.show_help();
        }

        AppMessage::Noop => {}
    }
}

/// 记录错误并弹窗显示
fn report(app: &mut App, context: &str, err: &CoreError) {
    err.log(context);
    app.modal.show_error(t().common.error, &err.to_string());
}
