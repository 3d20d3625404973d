//! 左侧列表面板
//!
//! 只渲染视口内的条目；滚动由 `ListPanel` 自己维护，这里不用 `ListState`。

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::i18n::{level_title, t};
use crate::model::App;
use crate::view::theme::Styles;

/// 渲染列表面板
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let is_focused = app.focus.is_list();
    let panel = app.nav.current_panel();

    let title = app
        .nav
        .title_with(level_title(app.nav.level()), usize::from(area.width));
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(is_focused));

    if panel.is_empty() {
        let empty = Paragraph::new(Span::styled(t().common.no_data, Styles::muted())).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let origin = panel.origin();
    let selected = panel.selected_index();
    let items: Vec<ListItem> = panel
        .visible_items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = origin + i == selected;
            let prefix = if is_selected { "▶ " } else { "  " };
            let style = if is_selected {
                Styles::selected(is_focused)
            } else {
                Styles::text()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{prefix}{}", item.label),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
