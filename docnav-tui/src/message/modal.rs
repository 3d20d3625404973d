//! 弹窗消息类型

/// 弹窗相关消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMessage {
    /// 关闭弹窗（输入框为取消，连接框为取消连接）
    Close,

    /// Ctrl+S 保存
    Save,

    /// Enter，含义取决于弹窗类型与输入模式
    Confirm,

    /// 在确认弹窗中切换焦点
    ToggleConfirmFocus,

    /// 输入字符
    Input(char),

    /// 删除字符（Backspace）
    Backspace,

    /// 删除光标后的字符（Delete）
    Delete,

    /// 光标移动
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
}
