//! 底部状态栏组件

use docnav_core::Level;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::i18n::t;
use crate::model::{App, FocusPanel};
use crate::view::theme::Styles;

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 状态消息跟在提示后面
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(msg.clone(), Styles::status_message()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据焦点和层级生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let texts = t();
    let keys = &texts.hints.keys;
    let actions = &texts.hints.actions;
    let mut hints = vec![(keys.arrows_ud, actions.navigate)];

    match app.focus {
        FocusPanel::List => {
            hints.push((keys.enter, actions.open));
            if app.nav.editor().is_open() {
                hints.push((keys.tab, actions.switch_panel));
            }
        }
        FocusPanel::Editor => {
            hints.push((keys.enter, actions.edit_line));
            hints.push((keys.tab, actions.switch_panel));
        }
    }

    let level = app.nav.level();
    if !level.is_initial() {
        hints.push((keys.esc, texts.common.back));
        hints.push(("Alt+a", texts.common.add));
        hints.push(("Alt+d", texts.common.delete));
        hints.push(("Alt+x", texts.common.export));
    }
    if level == Level::Documents {
        hints.push(("Alt+i", texts.common.import));
    }

    hints.push(("Alt+h", texts.help.title));
    hints.push(("Alt+q", texts.common.quit));
    hints
}
