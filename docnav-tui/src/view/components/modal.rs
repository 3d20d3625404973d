//! 弹窗组件

use docnav_core::connect::{ConnectDialog, ConnectPhase};
use docnav_core::flows::PendingAction;
use docnav_core::popup::{PopupDialog, PopupMode};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::i18n::{popup_title, t};
use crate::model::state::Modal;
use crate::model::App;
use crate::view::theme::Styles;

/// 输入框最大宽度
const POPUP_MAX_WIDTH: u16 = 80;

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::Popup { dialog, .. } => render_popup(frame, dialog),
        Modal::Confirm { action, focus } => render_confirm(frame, action, *focus),
        Modal::Connect(dialog) => render_connect(frame, dialog),
        Modal::Info { title, message } => render_message(frame, title, message, Color::Cyan),
        Modal::Error { title, message } => render_message(frame, title, message, Color::Red),
        Modal::Help => render_help(frame),
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 弹窗外框
fn modal_block(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black))
}

/// 渲染文本输入框，光标跟随滚动
fn render_popup(frame: &mut Frame, dialog: &PopupDialog) {
    let texts = t();
    let lines = dialog.lines();
    let (row, col) = dialog.cursor();

    let screen = frame.area();
    let width = POPUP_MAX_WIDTH.min(screen.width.saturating_sub(4)).max(20);
    let wanted = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(3);
    let height = wanted.clamp(4, screen.height.saturating_sub(2).max(4));

    let area = centered_rect(width, height, screen);
    frame.render_widget(Clear, area);
    let title = popup_title(dialog.title());
    let block = modal_block(&title, Color::Cyan);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    // 光标前文本的显示宽度
    let before_cursor: String = lines
        .get(row)
        .map(|l| l.chars().take(col).collect())
        .unwrap_or_default();
    let cursor_x = u16::try_from(before_cursor.width()).unwrap_or(u16::MAX);
    let cursor_y = u16::try_from(row).unwrap_or(u16::MAX);

    let scroll_y = cursor_y.saturating_sub(text_area.height.saturating_sub(1));
    let scroll_x = cursor_x.saturating_sub(text_area.width.saturating_sub(1));

    let body: Vec<Line> = lines
        .iter()
        .map(|l| Line::styled(l.clone(), Style::default().fg(Color::White)))
        .collect();
    frame.render_widget(Paragraph::new(body).scroll((scroll_y, scroll_x)), text_area);

    frame.set_cursor_position(Position::new(
        text_area.x + cursor_x - scroll_x,
        text_area.y + cursor_y - scroll_y,
    ));

    let keys = &texts.hints.keys;
    let mut hints = vec![(keys.ctrl_s, texts.common.save)];
    match dialog.mode() {
        PopupMode::MultiLine => hints.push((keys.enter, texts.hints.actions.newline)),
        PopupMode::SingleLine => hints.push((keys.enter, texts.common.confirm)),
        PopupMode::EnterDisabled => {}
    }
    hints.push((keys.esc, texts.common.cancel));
    frame.render_widget(Paragraph::new(hint_line(&hints)), hint_area);
}

/// 底部按键提示
fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }
    Line::from(spans)
}

/// 渲染删除 / 导出确认弹窗
fn render_confirm(frame: &mut Frame, action: &PendingAction, focus: usize) {
    let texts = t();
    let (title, verb, accent) = match action {
        PendingAction::Delete(_) => (
            texts.modal.confirm_delete_title,
            texts.modal.confirm_delete_message,
            Color::Red,
        ),
        PendingAction::Export(_) => (
            texts.modal.confirm_export_title,
            texts.modal.confirm_export_message,
            Color::Cyan,
        ),
    };
    let button = match action {
        PendingAction::Delete(_) => texts.common.delete,
        PendingAction::Export(_) => texts.common.export,
    };

    let area = centered_rect(56, 8, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(modal_block(title, accent), area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    );

    let cancel_style = if focus == 0 {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::White)
    };
    let confirm_style = if focus == 1 {
        Style::default().fg(Color::Black).bg(accent)
    } else {
        Style::default().fg(accent)
    };

    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("{verb} {}?", action.target()),
            Style::default().fg(Color::White),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", texts.common.cancel), cancel_style),
            Span::raw("    "),
            Span::styled(format!(" {button} "), confirm_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// 渲染连接弹窗：计时、成功或失败
fn render_connect(frame: &mut Frame, dialog: &ConnectDialog) {
    let texts = t();
    let area = centered_rect(60, 8, frame.area());
    frame.render_widget(Clear, area);

    let border = match dialog.phase() {
        ConnectPhase::Failed(_) => Color::Red,
        ConnectPhase::Succeeded => Color::Green,
        ConnectPhase::Connecting | ConnectPhase::Cancelled => Color::Cyan,
    };
    frame.render_widget(modal_block(dialog.profile_name(), border), area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    );

    let close_hint = Line::styled(
        format!("{} {}", texts.hints.keys.esc, texts.common.close),
        Style::default().fg(Color::DarkGray),
    );
    let lines = match dialog.phase() {
        ConnectPhase::Connecting | ConnectPhase::Cancelled => vec![
            Line::from(""),
            Line::styled(
                format!(
                    "{} {} ({})... {}s",
                    texts.modal.connecting,
                    dialog.profile_name(),
                    dialog.address(),
                    dialog.elapsed_secs()
                ),
                Style::default().fg(Color::White),
            ),
            Line::from(""),
            Line::styled(
                format!("{} {}", texts.hints.keys.esc, texts.common.cancel),
                Style::default().fg(Color::DarkGray),
            ),
        ],
        ConnectPhase::Succeeded => vec![
            Line::from(""),
            Line::styled(
                format!("{} {}", texts.modal.connected, dialog.profile_name()),
                Styles::success(),
            ),
        ],
        ConnectPhase::Failed(message) => vec![
            Line::styled(
                texts.modal.connect_failed,
                Styles::error().add_modifier(Modifier::BOLD),
            ),
            Line::styled(message.clone(), Style::default().fg(Color::White)),
            Line::from(""),
            close_hint,
        ],
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// 渲染提示 / 错误弹窗
fn render_message(frame: &mut Frame, title: &str, message: &str, border: Color) {
    let texts = t();
    let line_count = u16::try_from(message.lines().count()).unwrap_or(u16::MAX);
    let area = centered_rect(64, line_count.saturating_add(6).max(8), frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(modal_block(title, border), area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    );

    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::White)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!(
            "{}/{} {}",
            texts.hints.keys.esc, texts.hints.keys.enter, texts.common.close
        ),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// 帮助中的一行
fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<9}"), Style::default().fg(Color::Yellow)),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}

fn help_heading(text: &'static str) -> Line<'static> {
    Line::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

/// 渲染帮助弹窗
fn render_help(frame: &mut Frame) {
    let texts = t();
    let help = &texts.help;
    let actions = &help.actions;
    let keys = &texts.hints.keys;

    let area = centered_rect(56, 26, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(modal_block(help.title, Color::Cyan), area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    );

    let lines = vec![
        help_heading(help.global_shortcuts),
        help_row(keys.tab, actions.switch_panel),
        help_row("↑↓/jk", actions.move_up_down),
        help_row(keys.enter, actions.open),
        help_row(keys.esc, actions.back_cancel),
        help_row("Alt+r", actions.refresh),
        help_row("Alt+h / ?", actions.help),
        help_row("Alt+q", actions.quit),
        Line::from(""),
        help_heading(help.operation_shortcuts),
        help_row("Alt+a", actions.add),
        help_row("Alt+d", actions.delete),
        help_row("Alt+x", actions.export),
        help_row("Alt+i", actions.import),
        help_row(keys.arrows_lr, texts.hints.actions.switch_option),
        Line::from(""),
        help_heading(help.editor_shortcuts),
        help_row(keys.enter, actions.edit_line),
        help_row(keys.ctrl_s, actions.save),
        Line::from(""),
        Line::styled(help.close_hint, Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
