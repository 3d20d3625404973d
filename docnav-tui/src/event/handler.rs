//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, ModalMessage, NavigationMessage};
use crate::model::state::Modal;
use crate::model::App;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端窗口大小改变，下一帧自动按新尺寸重绘
        Event::Resize(_, _) => AppMessage::Noop,
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    // 如果有弹窗打开，优先处理弹窗输入
    if app.modal.is_open() {
        return handle_modal_keys(key, app);
    }

    // 全局快捷键（无论焦点在哪里）
    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    if DefaultKeymap::HELP.matches(&key)
        || (key.modifiers.is_empty() && key.code == KeyCode::Char('?'))
    {
        return AppMessage::ShowHelp;
    }

    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }

    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::GoBack;
    }

    if DefaultKeymap::TOGGLE_FOCUS.matches(&key) {
        return AppMessage::ToggleFocus;
    }

    if let Some(msg) = handle_action_keys(&key) {
        return msg;
    }

    if app.focus.is_list() {
        handle_list_keys(key)
    } else {
        handle_editor_keys(key)
    }
}

/// 增删导入导出，两个面板通用
fn handle_action_keys(key: &KeyEvent) -> Option<AppMessage> {
    let msg = if DefaultKeymap::ACTION_ADD.matches(key) {
        ContentMessage::Add
    } else if DefaultKeymap::ACTION_DELETE.matches(key) {
        ContentMessage::Delete
    } else if DefaultKeymap::ACTION_IMPORT.matches(key) {
        ContentMessage::Import
    } else if DefaultKeymap::ACTION_EXPORT.matches(key) {
        ContentMessage::Export
    } else {
        return None;
    };
    Some(AppMessage::Content(msg))
}

/// 处理列表面板的按键
fn handle_list_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        // ↑ 或 k: 上移
        KeyCode::Up | KeyCode::Char('k') => {
            AppMessage::Navigation(NavigationMessage::SelectPrevious)
        }

        // ↓ 或 j: 下移
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Navigation(NavigationMessage::SelectNext),

        // Enter: 确认选择
        KeyCode::Enter => AppMessage::Navigation(NavigationMessage::Confirm),

        KeyCode::Home => AppMessage::Navigation(NavigationMessage::SelectFirst),
        KeyCode::End => AppMessage::Navigation(NavigationMessage::SelectLast),

        _ => AppMessage::Noop,
    }
}

/// 处理编辑器的按键
fn handle_editor_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Content(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Content(ContentMessage::SelectNext),

        // Enter: 编辑当前行
        KeyCode::Enter => AppMessage::Content(ContentMessage::Edit),

        KeyCode::Home => AppMessage::Content(ContentMessage::SelectFirst),
        KeyCode::End => AppMessage::Content(ContentMessage::SelectLast),

        _ => AppMessage::Noop,
    }
}

/// 处理弹窗中的按键
fn handle_modal_keys(key: KeyEvent, app: &App) -> AppMessage {
    // Esc 和 Ctrl+C 始终可以关闭弹窗
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Esc) => {
            return AppMessage::Modal(ModalMessage::Close);
        }
        _ => {}
    }

    let Some(ref modal) = app.modal.active else {
        return AppMessage::Noop;
    };

    match modal {
        Modal::Popup { .. } => handle_popup_keys(key),
        Modal::Confirm { .. } => handle_confirm_keys(key),
        // 连接结束后（失败）Enter 也可关闭
        Modal::Connect(dialog) => match key.code {
            KeyCode::Enter if !dialog.is_connecting() => AppMessage::Modal(ModalMessage::Close),
            _ => AppMessage::Noop,
        },
        Modal::Help | Modal::Info { .. } | Modal::Error { .. } => match key.code {
            KeyCode::Enter => AppMessage::Modal(ModalMessage::Close),
            _ => AppMessage::Noop,
        },
    }
}

/// 处理输入框的按键
fn handle_popup_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::SAVE.matches(&key) {
        return AppMessage::Modal(ModalMessage::Save);
    }

    match key.code {
        // Enter: 按输入模式处理
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),

        KeyCode::Backspace => AppMessage::Modal(ModalMessage::Backspace),
        KeyCode::Delete => AppMessage::Modal(ModalMessage::Delete),

        KeyCode::Left => AppMessage::Modal(ModalMessage::CursorLeft),
        KeyCode::Right => AppMessage::Modal(ModalMessage::CursorRight),
        KeyCode::Up => AppMessage::Modal(ModalMessage::CursorUp),
        KeyCode::Down => AppMessage::Modal(ModalMessage::CursorDown),
        KeyCode::Home => AppMessage::Modal(ModalMessage::CursorHome),
        KeyCode::End => AppMessage::Modal(ModalMessage::CursorEnd),

        // 字符输入（允许 Shift）
        KeyCode::Char(ch)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            AppMessage::Modal(ModalMessage::Input(ch))
        }

        _ => AppMessage::Noop,
    }
}

/// 处理确认弹窗的按键
fn handle_confirm_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        // Tab 或 ← →: 切换焦点
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            AppMessage::Modal(ModalMessage::ToggleConfirmFocus)
        }

        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),

        _ => AppMessage::Noop,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEventState;
    use docnav_core::config::ProfileStore;
    use docnav_core::popup::{PopupMode, PopupRequest, PopupTitle};
    use docnav_core::NavigationController;
    use docnav_provider::MongoGateway;
    use tokio::sync::mpsc;

    use super::*;
    use crate::model::state::PopupPurpose;
    use crate::model::FocusPanel;

    fn test_app() -> App {
        let nav = NavigationController::new(
            Arc::new(MongoGateway::new()),
            ProfileStore::from_profiles(Vec::new()),
        );
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(nav, tx)
    }

    fn press(modifiers: KeyModifiers, code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn key(code: KeyCode) -> Event {
        press(KeyModifiers::NONE, code)
    }

    fn alt(ch: char) -> Event {
        press(KeyModifiers::ALT, KeyCode::Char(ch))
    }

    #[test]
    fn ignores_key_release() {
        let app = test_app();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(matches!(handle_event(release, &app), AppMessage::Noop));
    }

    #[test]
    fn global_keys() {
        let app = test_app();
        assert!(matches!(
            handle_event(press(KeyModifiers::CONTROL, KeyCode::Char('c')), &app),
            AppMessage::Quit
        ));
        assert!(matches!(handle_event(alt('q'), &app), AppMessage::Quit));
        assert!(matches!(handle_event(alt('h'), &app), AppMessage::ShowHelp));
        assert!(matches!(
            handle_event(key(KeyCode::Char('?')), &app),
            AppMessage::ShowHelp
        ));
        assert!(matches!(handle_event(alt('r'), &app), AppMessage::Refresh));
        assert!(matches!(handle_event(key(KeyCode::Esc), &app), AppMessage::GoBack));
        assert!(matches!(
            handle_event(key(KeyCode::Tab), &app),
            AppMessage::ToggleFocus
        ));
    }

    #[test]
    fn list_and_editor_keys_differ() {
        let mut app = test_app();
        assert!(matches!(
            handle_event(key(KeyCode::Char('j')), &app),
            AppMessage::Navigation(NavigationMessage::SelectNext)
        ));
        assert!(matches!(
            handle_event(key(KeyCode::Enter), &app),
            AppMessage::Navigation(NavigationMessage::Confirm)
        ));

        app.focus = FocusPanel::Editor;
        assert!(matches!(
            handle_event(key(KeyCode::Char('k')), &app),
            AppMessage::Content(ContentMessage::SelectPrevious)
        ));
        assert!(matches!(
            handle_event(key(KeyCode::Enter), &app),
            AppMessage::Content(ContentMessage::Edit)
        ));
    }

    #[test]
    fn action_keys_work_from_either_panel() {
        let mut app = test_app();
        for focus in [FocusPanel::List, FocusPanel::Editor] {
            app.focus = focus;
            assert!(matches!(
                handle_event(alt('a'), &app),
                AppMessage::Content(ContentMessage::Add)
            ));
            assert!(matches!(
                handle_event(alt('d'), &app),
                AppMessage::Content(ContentMessage::Delete)
            ));
            assert!(matches!(
                handle_event(alt('x'), &app),
                AppMessage::Content(ContentMessage::Export)
            ));
            assert!(matches!(
                handle_event(alt('i'), &app),
                AppMessage::Content(ContentMessage::Import)
            ));
        }
    }

    #[test]
    fn popup_captures_text_keys() {
        let mut app = test_app();
        app.modal.show_popup(
            PopupRequest::new(PopupTitle::EditLine { line: 1 }, "{", PopupMode::EnterDisabled),
            PopupPurpose::EditLine { line: 0 },
            FocusPanel::Editor,
        );

        // 弹窗打开时 q、?、Tab 都不是全局快捷键
        assert!(matches!(
            handle_event(key(KeyCode::Char('q')), &app),
            AppMessage::Modal(ModalMessage::Input('q'))
        ));
        assert!(matches!(
            handle_event(press(KeyModifiers::SHIFT, KeyCode::Char('?')), &app),
            AppMessage::Modal(ModalMessage::Input('?'))
        ));
        assert!(matches!(
            handle_event(press(KeyModifiers::CONTROL, KeyCode::Char('s')), &app),
            AppMessage::Modal(ModalMessage::Save)
        ));
        assert!(matches!(
            handle_event(key(KeyCode::Enter), &app),
            AppMessage::Modal(ModalMessage::Confirm)
        ));
        assert!(matches!(
            handle_event(key(KeyCode::Esc), &app),
            AppMessage::Modal(ModalMessage::Close)
        ));
        assert!(matches!(
            handle_event(alt('q'), &app),
            AppMessage::Noop
        ));
    }

    #[test]
    fn help_closes_on_enter() {
        let mut app = test_app();
        app.modal.show_help();
        assert!(matches!(
            handle_event(key(KeyCode::Enter), &app),
            AppMessage::Modal(ModalMessage::Close)
        ));
        assert!(matches!(handle_event(key(KeyCode::Char('j')), &app), AppMessage::Noop));
    }
}
