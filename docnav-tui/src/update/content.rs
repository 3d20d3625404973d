//! 编辑器与增删导入导出

use docnav_core::flows::{import_prompt, ActionTarget, CreateFlow, PendingAction};
use docnav_core::Level;

use crate::i18n::t;
use crate::message::ContentMessage;
use crate::model::state::PopupPurpose;
use crate::model::App;

/// 处理内容消息
pub fn update(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::SelectPrevious => app.nav.editor_mut().cursor_up(),
        ContentMessage::SelectNext => app.nav.editor_mut().cursor_down(),
        ContentMessage::SelectFirst => app.nav.editor_mut().cursor_first(),
        ContentMessage::SelectLast => app.nav.editor_mut().cursor_last(),
        ContentMessage::Edit => handle_edit(app),
        ContentMessage::Add => handle_add(app),
        ContentMessage::Delete => handle_pending(app, PendingAction::Delete),
        ContentMessage::Export => handle_pending(app, PendingAction::Export),
        ContentMessage::Import => handle_import(app),
    }
}

/// 打开当前行的编辑框
fn handle_edit(app: &mut App) {
    let editor = app.nav.editor();
    let line = editor.cursor_line();
    let Some(request) = editor.edit_line(line) else {
        return;
    };

    if editor.is_identifier_line(line) {
        app.set_status(t().status_bar.identifier_line);
    }
    app.modal
        .show_popup(request, PopupPurpose::EditLine { line }, app.focus);
}

/// 按当前层级开始创建流程
fn handle_add(app: &mut App) {
    let path = app.nav.path();
    let started = CreateFlow::start(
        app.nav.level(),
        path.database.as_deref(),
        path.collection.as_deref(),
    );

    match started {
        Some((flow, request)) => {
            app.modal
                .show_popup(request, PopupPurpose::Create(flow), app.focus);
        }
        None => app.set_status(t().status_bar.create_unavailable),
    }
}

/// 删除 / 导出都要先确认
fn handle_pending(app: &mut App, action: fn(ActionTarget) -> PendingAction) {
    match app.nav.selected_target() {
        Some(target) => app.modal.show_confirm(action(target)),
        None => app.set_status(t().status_bar.nothing_selected),
    }
}

/// 只能导入到已打开的集合
fn handle_import(app: &mut App) {
    let collection = match (app.nav.level(), &app.nav.path().collection) {
        (Level::Documents, Some(collection)) => collection.clone(),
        _ => {
            app.set_status(t().status_bar.import_unavailable);
            return;
        }
    };
    app.modal
        .show_popup(import_prompt(&collection), PopupPurpose::Import, app.focus);
}
