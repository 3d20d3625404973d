//! 焦点状态定义

/// 焦点面板枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    /// 左侧列表面板
    #[default]
    List,
    /// 右侧文档编辑器
    Editor,
}

impl FocusPanel {
    /// 切换到另一个面板
    pub fn toggle(self) -> Self {
        match self {
            FocusPanel::List => FocusPanel::Editor,
            FocusPanel::Editor => FocusPanel::List,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, FocusPanel::List)
    }

    pub fn is_editor(self) -> bool {
        matches!(self, FocusPanel::Editor)
    }
}
