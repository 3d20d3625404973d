//! 应用主状态结构

use std::path::PathBuf;

use docnav_core::export::export_base;
use docnav_core::NavigationController;
use tokio::sync::mpsc::UnboundedSender;

use super::{FocusPanel, state::ModalState};
use crate::message::AppMessage;

/// 标题栏与状态栏各占一行，面板边框上下各一行
const CHROME_HEIGHT: u16 = 4;

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前焦点面板
    pub focus: FocusPanel,

    /// 导航状态
    pub nav: NavigationController,

    /// 弹窗状态
    pub modal: ModalState,

    /// 状态栏消息
    pub status_message: Option<String>,

    /// 导出根目录
    pub export_base: PathBuf,

    /// 后台任务回送消息的通道
    pub tx: UnboundedSender<AppMessage>,

    /// 最近一次连接尝试的编号
    pub connect_attempt: u64,
}

impl App {
    /// 创建新的应用实例
    pub fn new(nav: NavigationController, tx: UnboundedSender<AppMessage>) -> Self {
        Self {
            should_quit: false,
            focus: FocusPanel::List,
            nav,
            modal: ModalState::new(),
            status_message: None,
            export_base: export_base(),
            tx,
            connect_attempt: 0,
        }
    }

    /// 按终端尺寸更新列表与编辑器的可见行数
    pub fn resize(&mut self, _width: u16, height: u16) {
        let rows = usize::from(height.saturating_sub(CHROME_HEIGHT));
        self.nav.set_viewport(rows, rows);
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// 下一个连接尝试编号
    pub fn next_attempt(&mut self) -> u64 {
        self.connect_attempt += 1;
        self.connect_attempt
    }
}
