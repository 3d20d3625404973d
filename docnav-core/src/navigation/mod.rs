//! 导航状态机
//!
//! - [`Level`]：四个导航层级
//! - [`breadcrumb`]：面板标题中的路径
//! - [`NavigationController`]：选择/返回事件到 Gateway 调用的转换

pub mod breadcrumb;
mod controller;
mod level;

pub use breadcrumb::build_title;
pub use controller::{ExportOutcome, NavPath, NavigationController, SelectOutcome};
pub use level::Level;
