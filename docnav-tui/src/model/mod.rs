//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! 导航相关的一切（层级、各层列表与选择、打开的文档）都由
//! `docnav_core::NavigationController` 持有；这里只保存界面本身的状态：
//! 焦点、弹窗、状态栏消息。所有状态变更都通过 Update 层来触发。

mod app;
mod focus;
pub mod state;

pub use app::App;
pub use focus::FocusPanel;
