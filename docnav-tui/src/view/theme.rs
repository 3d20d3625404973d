//! 主题和样式定义

use ratatui::style::{Color, Modifier, Style};
use std::sync::atomic::{AtomicU8, Ordering};

// 默认为 0 (Dark)，相应地，1 为 Light
static CURRENT_THEME: AtomicU8 = AtomicU8::new(0);

/// 设置主题（通过索引值）
/// 定义索引值 0 = Dark, 1 = Light
pub fn set_theme_index(index: u8) {
    CURRENT_THEME.store(index, Ordering::SeqCst);
}

/// 获取当前主题的颜色方案
pub fn colors() -> ThemeColors {
    match CURRENT_THEME.load(Ordering::SeqCst) {
        0 => ThemeColors::dark(),
        _ => ThemeColors::light(),
    }
}

/// 主题颜色
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

impl ThemeColors {
    /// 深色主题
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 30),
            fg: Color::Rgb(212, 212, 212),
            border: Color::Rgb(62, 62, 62),
            border_focused: Color::Rgb(0, 122, 204),
            highlight: Color::Rgb(0, 122, 204),
            selected_bg: Color::Rgb(38, 79, 120),
            selected_fg: Color::White,
            success: Color::Rgb(78, 201, 176),
            warning: Color::Rgb(206, 145, 120),
            error: Color::Rgb(244, 135, 113),
            muted: Color::Rgb(128, 128, 128),
        }
    }

    /// 浅色主题
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(51, 51, 51),
            border: Color::Rgb(204, 204, 204),
            border_focused: Color::Rgb(0, 102, 204),
            highlight: Color::Rgb(0, 102, 204),
            selected_bg: Color::Rgb(204, 232, 255),
            selected_fg: Color::Black,
            success: Color::Rgb(34, 134, 58),
            warning: Color::Rgb(176, 136, 0),
            error: Color::Rgb(215, 58, 73),
            muted: Color::Rgb(128, 128, 128),
        }
    }
}

/// 常用样式（跟随当前主题）
pub struct Styles;

impl Styles {
    /// 面板边框，焦点面板高亮
    pub fn border(focused: bool) -> Style {
        let c = colors();
        Style::default().fg(if focused { c.border_focused } else { c.border })
    }

    /// 选中项样式；非焦点面板只加粗
    pub fn selected(focused: bool) -> Style {
        let c = colors();
        if focused {
            Style::default()
                .bg(c.selected_bg)
                .fg(c.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.fg).add_modifier(Modifier::BOLD)
        }
    }

    /// 普通文本
    pub fn text() -> Style {
        Style::default().fg(colors().fg)
    }

    /// 次要文本（行号、空列表提示）
    pub fn muted() -> Style {
        Style::default().fg(colors().muted)
    }

    /// 标题样式
    pub fn title() -> Style {
        Style::default()
            .fg(colors().fg)
            .add_modifier(Modifier::BOLD)
    }

    /// 标题栏样式
    pub fn title_bar() -> Style {
        let c = colors();
        Style::default().bg(c.highlight).fg(c.selected_fg)
    }

    /// 状态栏样式
    pub fn statusbar() -> Style {
        Style::default().bg(colors().bg).fg(colors().fg)
    }

    /// 状态消息
    pub fn status_message() -> Style {
        Style::default().fg(colors().warning)
    }

    /// 快捷键提示样式
    pub fn hint_key() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// 快捷键说明样式
    pub fn hint_desc() -> Style {
        Style::default().fg(Color::Rgb(180, 180, 180))
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }
}
