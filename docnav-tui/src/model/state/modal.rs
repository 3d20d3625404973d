//! 弹窗/对话框状态

use docnav_core::connect::ConnectDialog;
use docnav_core::flows::{CreateFlow, PendingAction};
use docnav_core::popup::{PopupDialog, PopupRequest};

use crate::model::FocusPanel;

/// 输入框保存后要做的事
#[derive(Debug, Clone)]
pub enum PopupPurpose {
    /// 编辑文档的某一行
    EditLine { line: usize },
    /// 创建流程的某一步
    Create(CreateFlow),
    /// 输入导入文件路径
    Import,
}

/// 弹窗类型
#[derive(Debug)]
pub enum Modal {
    /// 文本输入框
    Popup {
        dialog: PopupDialog,
        purpose: PopupPurpose,
        /// 关闭后恢复的焦点
        return_focus: FocusPanel,
    },

    /// 删除 / 导出确认（0 = 取消，1 = 确认）
    Confirm { action: PendingAction, focus: usize },

    /// 正在连接
    Connect(ConnectDialog),

    /// 提示
    Info { title: String, message: String },

    /// 错误
    Error { title: String, message: String },

    /// 帮助
    Help,
}

/// 弹窗状态
#[derive(Debug, Default)]
pub struct ModalState {
    /// 当前活动的弹窗
    pub active: Option<Modal>,
}

impl ModalState {
    /// 创建新的弹窗状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 关闭弹窗
    pub fn close(&mut self) {
        self.active = None;
    }

    /// 是否有活动弹窗
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// 取出当前弹窗
    pub fn take(&mut self) -> Option<Modal> {
        self.active.take()
    }

    /// 显示输入框
    pub fn show_popup(
        &mut self,
        request: PopupRequest,
        purpose: PopupPurpose,
        return_focus: FocusPanel,
    ) {
        self.active = Some(Modal::Popup {
            dialog: PopupDialog::show(request),
            purpose,
            return_focus,
        });
    }

    /// 显示确认弹窗，默认焦点在"取消"
    pub fn show_confirm(&mut self, action: PendingAction) {
        self.active = Some(Modal::Confirm { action, focus: 0 });
    }

    /// 显示连接弹窗
    pub fn show_connect(&mut self, dialog: ConnectDialog) {
        self.active = Some(Modal::Connect(dialog));
    }

    /// 显示提示弹窗
    pub fn show_info(&mut self, title: &str, message: &str) {
        self.active = Some(Modal::Info {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    /// 显示错误弹窗
    pub fn show_error(&mut self, title: &str, message: &str) {
        self.active = Some(Modal::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    /// 显示帮助弹窗
    pub fn show_help(&mut self) {
        self.active = Some(Modal::Help);
    }
}
