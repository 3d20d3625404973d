//! 列表面板更新逻辑

use docnav_core::connect::{ConnectDialog, ConnectTiming};
use docnav_core::navigation::SelectOutcome;
use docnav_core::ConnectionProfile;

use super::report;
use crate::message::NavigationMessage;
use crate::model::{App, FocusPanel};

/// 处理导航消息
pub async fn update(app: &mut App, msg: NavigationMessage) {
    match msg {
        NavigationMessage::SelectPrevious => app.nav.current_panel_mut().cursor_up(),
        NavigationMessage::SelectNext => app.nav.current_panel_mut().cursor_down(),
        NavigationMessage::SelectFirst => app.nav.current_panel_mut().select_first(),
        NavigationMessage::SelectLast => app.nav.current_panel_mut().select_last(),
        NavigationMessage::Confirm => handle_confirm(app).await,
    }
}

/// Enter：进入下一层、打开文档或开始连接
async fn handle_confirm(app: &mut App) {
    match app.nav.select().await {
        Ok(SelectOutcome::Connect(profile)) => start_connect(app, profile),
        Ok(SelectOutcome::Descended) => app.clear_status(),
        Ok(SelectOutcome::Opened) => {
            app.clear_status();
            app.focus = FocusPanel::Editor;
        }
        Ok(SelectOutcome::Nothing) => {}
        Err(e) => report(app, "select", &e),
    }
}

/// 显示连接弹窗并在后台连接；结果经 channel 回到主循环
fn start_connect(app: &mut App, profile: ConnectionProfile) {
    let attempt = app.next_attempt();
    let dialog = ConnectDialog::start(
        app.nav.gateway(),
        profile,
        attempt,
        ConnectTiming::default(),
        app.tx.clone(),
    );
    app.modal.show_connect(dialog);
}
