//! 后台连接事件

use docnav_core::connect::{ConnectEvent, ConnectUpdate};
use docnav_core::CoreError;

use super::report;
use crate::model::state::Modal;
use crate::model::{App, FocusPanel};

/// 把后台事件应用到连接弹窗；弹窗已关闭时直接丢弃
pub async fn update(app: &mut App, event: ConnectEvent) {
    let Some(Modal::Connect(ref mut dialog)) = app.modal.active else {
        log::debug!("Dropped event for closed connect dialog (attempt {})", event.attempt());
        return;
    };

    match dialog.apply(event) {
        ConnectUpdate::Ignored | ConnectUpdate::Ticked => {}

        ConnectUpdate::Connected {
            profile_name,
            session,
        } => match app.nav.complete_connection(profile_name, session).await {
            Ok(()) => app.focus = FocusPanel::List,
            Err(e) => {
                app.modal.close();
                report(app, "connect", &e);
            }
        },

        // 弹窗保持打开并显示错误，等待用户关闭
        ConnectUpdate::Failed(e) => CoreError::from(e).log("connect"),

        ConnectUpdate::Dismiss => app.modal.close(),
    }
}
