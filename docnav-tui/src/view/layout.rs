//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::i18n::t;
use crate::model::App;

use super::components;
use super::theme::Styles;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 三层布局：标题栏 + 主内容区 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    let title_area = main_layout[0];
    let content_area = main_layout[1];
    let status_area = main_layout[2];

    render_title_bar(frame, title_area);

    // 左侧列表，右侧文档
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(content_area);

    components::list_panel::render(app, frame, columns[0]);
    components::content::render(app, frame, columns[1]);
    components::statusbar::render(app, frame, status_area);

    // 渲染弹窗（在最上层）
    components::modal::render(app, frame);
}

/// 渲染标题栏
fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(format!(
        " {} v{}",
        t().common.app_name,
        env!("CARGO_PKG_VERSION")
    ))
    .style(Styles::title_bar());
    frame.render_widget(title, area);
}
