//! 应用主消息枚举

use docnav_core::connect::ConnectEvent;

use super::{ContentMessage, ModalMessage, NavigationMessage};

/// 应用主消息
#[derive(Debug)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 切换焦点面板（列表 / 编辑器）
    ToggleFocus,

    /// 列表面板消息
    Navigation(NavigationMessage),

    /// 内容面板消息
    Content(ContentMessage),

    /// 弹窗消息
    Modal(ModalMessage),

    /// 异步连接任务的事件
    Connect(ConnectEvent),

    /// 返回上一层
    GoBack,

    /// 重新查询当前层
    Refresh,

    /// 显示帮助
    ShowHelp,

    /// 无操作（用于忽略未处理的事件）
    Noop,
}

impl From<ConnectEvent> for AppMessage {
    fn from(event: ConnectEvent) -> Self {
        Self::Connect(event)
    }
}
