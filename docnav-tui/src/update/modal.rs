//! 弹窗更新逻辑

use std::path::Path;

use docnav_core::flows::{CreateFlow, FlowStep, PendingAction};
use docnav_core::navigation::ExportOutcome;
use docnav_core::popup::PopupResolution;
use docnav_core::CoreError;

use super::report;
use crate::i18n::t;
use crate::message::ModalMessage;
use crate::model::state::{Modal, PopupPurpose};
use crate::model::{App, FocusPanel};

/// 处理弹窗消息
pub async fn update(app: &mut App, msg: ModalMessage) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::Popup { .. } => handle_popup(app, msg).await,
        Modal::Confirm { .. } => handle_confirm(app, msg).await,
        Modal::Connect(_) => handle_connect(app, msg),
        Modal::Info { .. } | Modal::Error { .. } | Modal::Help => handle_simple_modal(app, msg),
    }
}

/// 处理输入框：编辑按键直接作用于对话框，保存 / 取消后按用途分发
async fn handle_popup(app: &mut App, msg: ModalMessage) {
    let Some(Modal::Popup { ref mut dialog, .. }) = app.modal.active else {
        return;
    };

    let resolution = match msg {
        ModalMessage::Close => dialog.cancel(),
        ModalMessage::Save => dialog.save(),
        ModalMessage::Confirm => dialog.enter(),
        ModalMessage::Input(ch) => {
            dialog.insert_char(ch);
            None
        }
        ModalMessage::Backspace => {
            dialog.backspace();
            None
        }
        ModalMessage::Delete => {
            dialog.delete();
            None
        }
        ModalMessage::CursorLeft => {
            dialog.move_left();
            None
        }
        ModalMessage::CursorRight => {
            dialog.move_right();
            None
        }
        ModalMessage::CursorUp => {
            dialog.move_up();
            None
        }
        ModalMessage::CursorDown => {
            dialog.move_down();
            None
        }
        ModalMessage::CursorHome => {
            dialog.home();
            None
        }
        ModalMessage::CursorEnd => {
            dialog.end();
            None
        }
        ModalMessage::ToggleConfirmFocus => None,
    };

    if let Some(resolution) = resolution {
        resolve_popup(app, resolution).await;
    }
}

/// 关闭输入框、恢复焦点，然后执行保存回调
async fn resolve_popup(app: &mut App, resolution: PopupResolution) {
    let Some(Modal::Popup {
        purpose,
        return_focus,
        ..
    }) = app.modal.take()
    else {
        return;
    };
    app.focus = return_focus;

    let PopupResolution::Saved(text) = resolution else {
        return;
    };

    match purpose {
        PopupPurpose::EditLine { line } => commit_line(app, line, &text).await,
        PopupPurpose::Create(flow) => advance_create(app, flow, &text).await,
        PopupPurpose::Import => import(app, text.trim()).await,
    }
}

/// 行编辑：校验失败时文档保持原样
async fn commit_line(app: &mut App, line: usize, text: &str) {
    match app.nav.commit_line_edit(line, text).await {
        Ok(()) => app.set_status(t().status_bar.saved),
        Err(e @ CoreError::InvalidJson(_)) => {
            e.log("edit line");
            app.modal
                .show_error(t().modal.invalid_json_title, &e.to_string());
        }
        Err(e) => report(app, "save document", &e),
    }
}

/// 多步创建：下一步提示、提交或拒绝
async fn advance_create(app: &mut App, mut flow: CreateFlow, text: &str) {
    match flow.advance(text) {
        FlowStep::Prompt(request) => {
            app.modal
                .show_popup(request, PopupPurpose::Create(flow), app.focus);
        }
        FlowStep::Commit(request) => match app.nav.create(request).await {
            Ok(()) => app.set_status(t().status_bar.created),
            Err(e) => report(app, "create", &e),
        },
        FlowStep::Rejected(reason) => {
            log::warn!("create: {reason}");
            app.modal.show_error(t().common.error, &reason);
        }
    }
}

async fn import(app: &mut App, path: &str) {
    match app.nav.import_into_current(Path::new(path)).await {
        Ok(count) => app.set_status(format!("{} {count}", t().status_bar.imported)),
        Err(e) => report(app, "import", &e),
    }
}

/// 处理确认弹窗（0 = 取消，1 = 确认）
async fn handle_confirm(app: &mut App, msg: ModalMessage) {
    let Some(Modal::Confirm { ref mut focus, .. }) = app.modal.active else {
        return;
    };

    match msg {
        ModalMessage::Close => app.modal.close(),

        ModalMessage::ToggleConfirmFocus => {
            *focus = (*focus + 1) % 2;
        }

        ModalMessage::Confirm => {
            let confirmed = *focus == 1;
            let Some(Modal::Confirm { action, .. }) = app.modal.take() else {
                return;
            };
            if confirmed {
                run_action(app, action).await;
            }
        }

        _ => {}
    }
}

async fn run_action(app: &mut App, action: PendingAction) {
    match action {
        PendingAction::Delete(target) => match app.nav.delete(&target).await {
            Ok(()) => {
                if !app.nav.editor().is_open() {
                    app.focus = FocusPanel::List;
                }
                app.set_status(format!("{} {target}", t().status_bar.deleted));
            }
            Err(e) => report(app, "delete", &e),
        },
        PendingAction::Export(target) => match app.nav.export(&target, &app.export_base).await {
            Ok(outcome) => {
                app.modal
                    .show_info(t().modal.export_done_title, &export_summary(&outcome));
            }
            Err(e) => report(app, "export", &e),
        },
    }
}

/// 导出结果的多行说明
fn export_summary(outcome: &ExportOutcome) -> String {
    let texts = &t().modal;
    let mut lines = vec![format!("{} {}", texts.exported_to, outcome.path.display())];
    if let Some(report) = &outcome.report {
        lines.push(format!("{} {}", texts.exported_count, report.exported_count));
        if report.failed_count > 0 {
            lines.push(format!("{} {}", texts.failed_count, report.failed_count));
            lines.extend(
                report
                    .failures
                    .iter()
                    .map(|f| format!("  {}: {}", f.item, f.reason)),
            );
        }
    }
    lines.join("\n")
}

/// 连接弹窗：关闭即取消，迟到的结果会被丢弃
fn handle_connect(app: &mut App, msg: ModalMessage) {
    if msg != ModalMessage::Close {
        return;
    }
    if let Some(Modal::Connect(ref mut dialog)) = app.modal.active {
        dialog.cancel();
    }
    app.modal.close();
}

/// 处理帮助、提示和错误弹窗
fn handle_simple_modal(app: &mut App, msg: ModalMessage) {
    if msg == ModalMessage::Close {
        app.modal.close();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use docnav_provider::{ExportFailure, ExportReport};

    use super::*;

    #[test]
    fn summary_lists_failures() {
        let outcome = ExportOutcome {
            path: PathBuf::from("exports/shop"),
            report: Some(ExportReport {
                exported_count: 3,
                failed_count: 1,
                failures: vec![ExportFailure {
                    item: "broken".to_string(),
                    reason: "cursor died".to_string(),
                }],
            }),
        };

        let summary = export_summary(&outcome);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("exports/shop"));
        assert!(lines[1].ends_with(" 3"));
        assert!(lines[2].ends_with(" 1"));
        assert_eq!(lines[3], "  broken: cursor died");
    }

    #[test]
    fn single_document_summary_is_one_line() {
        let outcome = ExportOutcome {
            path: PathBuf::from("exports/shop/users/u1.json"),
            report: None,
        };
        assert_eq!(export_summary(&outcome).lines().count(), 1);
    }
}
