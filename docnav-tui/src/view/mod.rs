//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! 只读取 Model，不修改任何状态。
//!
//! 有模块结构：
//!     mod components;     // 列表面板、编辑器、状态栏、弹窗
//!     mod layout;         // 主布局
//!     pub mod theme;      // 主题与样式

mod components;
mod layout;
pub mod theme;

pub use layout::render;
