//! 界面组件

pub mod content;
pub mod list_panel;
pub mod modal;
pub mod statusbar;
