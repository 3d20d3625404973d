//!
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event → Update 之间的桥梁。键盘输入由 event 层翻译成消息；
//! 异步连接任务的进度与结果也以 `AppMessage::Connect` 的形式经 channel 送达，
//! 由主循环按到达顺序交给 Update 层，从而所有状态修改都串行发生在 UI 任务里。
//!
//! 有模块结构：
//!     mod app;            // 主消息 AppMessage
//!     mod content;        // 内容（文档编辑器）面板与增删导入导出操作
//!     mod modal;          // 弹窗
//!     mod navigation;     // 列表面板

mod app;
mod content;
mod modal;
mod navigation;

pub use app::AppMessage;
pub use content::ContentMessage;
pub use modal::ModalMessage;
pub use navigation::NavigationMessage;
