//! 右侧文档编辑器

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::t;
use crate::model::App;
use crate::view::theme::Styles;

/// 渲染文档编辑器
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let texts = t();
    let is_focused = app.focus.is_editor();
    let editor = app.nav.editor();

    let title = match editor.document() {
        Some(doc) => format!(" {} {} ", texts.editor.title, doc.id),
        None => format!(" {} ", texts.editor.title),
    };
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(is_focused));

    if !editor.is_open() {
        let hint = Paragraph::new(Span::styled(texts.editor.empty, Styles::muted())).block(block);
        frame.render_widget(hint, area);
        return;
    }

    // 行号宽度按总行数计算
    let number_width = editor.buffer().line_count().to_string().len();
    let cursor = editor.cursor_line();

    let lines: Vec<Line> = editor
        .visible_lines()
        .map(|(index, text)| {
            let style = if index == cursor {
                Styles::selected(is_focused)
            } else {
                Styles::text()
            };
            Line::from(vec![
                Span::styled(format!("{:>number_width$} ", index + 1), Styles::muted()),
                Span::styled(text.to_string(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
