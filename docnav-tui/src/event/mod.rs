//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入转换为 Message，不修改任何状态。
//!
//! 有模块结构：
//!     mod handler;        // 事件处理器
//!     mod keymap;         // 快捷键映射
//!
//!     · poll_event      事件轮询，受 ~/app.rs 调用
//!     · handle_event    事件分发，判断顺序：
//!         - 有弹窗打开时，调用 handle_modal_keys 处理（按弹窗类型分发）
//!         - 全局快捷键，就地处理
//!         - 增删导入导出的 Alt 组合键，两个面板通用
//!         - 焦点位于列表面板，调用 handle_list_keys 处理
//!         - 焦点位于编辑器，调用 handle_editor_keys 处理
//!
//!     输入框常用映射：
//!         Esc         → ModalMessage::Close（取消）
//!         Ctrl+S      → ModalMessage::Save
//!         Enter       → ModalMessage::Confirm（按输入模式换行 / 保存 / 忽略）
//!         字符输入     → ModalMessage::Input(c)

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
