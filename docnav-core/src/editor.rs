//! 文档内容编辑器
//!
//! 文档按 `\n` 拆成行显示，一次只编辑一行。保存流程分两段：
//! 先在本地校验拼回的整篇 JSON，通过后才交给 `NavigationController` 提交并回读。

use docnav_provider::DocumentId;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::panel::Viewport;
use crate::popup::{PopupMode, PopupRequest, PopupTitle};

/// 文档全文及其按行视图，`lines` 始终等于 `text.split('\n')`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBuffer {
    text: String,
    lines: Vec<String>,
}

impl DocumentBuffer {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text.split('\n').map(str::to_string).collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 替换一行后重新拼接，不修改自身
    pub fn with_line(&self, index: usize, content: &str) -> Option<String> {
        if index >= self.lines.len() {
            return None;
        }
        let mut lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        lines[index] = content;
        Some(lines.join("\n"))
    }
}

/// 编辑器中打开的文档及其来源
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDocument {
    pub database: String,
    pub collection: String,
    pub id: DocumentId,
}

/// 逐行编辑的文档视图
#[derive(Debug, Clone, Default)]
pub struct ContentEditor {
    document: Option<OpenDocument>,
    buffer: DocumentBuffer,
    view: Viewport,
}

impl ContentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开文档并从顶部显示
    pub fn open(&mut self, document: OpenDocument, text: impl Into<String>) {
        self.document = Some(document);
        self.load(text);
    }

    /// 替换内容，视口回到顶部
    pub fn load(&mut self, text: impl Into<String>) {
        self.buffer = DocumentBuffer::from_text(text);
        self.view.reset();
    }

    /// 替换内容但保留光标行（越界时收缩）
    pub fn reload(&mut self, text: impl Into<String>) {
        self.buffer = DocumentBuffer::from_text(text);
        self.view.move_to(self.view.selected, self.buffer.line_count());
    }

    pub fn close(&mut self) {
        self.document = None;
        self.buffer = DocumentBuffer::default();
        self.view.reset();
    }

    pub fn document(&self) -> Option<&OpenDocument> {
        self.document.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    pub fn buffer(&self) -> &DocumentBuffer {
        &self.buffer
    }

    pub fn cursor_line(&self) -> usize {
        self.view.selected
    }

    pub fn origin(&self) -> usize {
        self.view.origin
    }

    pub fn cursor_up(&mut self) {
        self.view.up(self.buffer.line_count());
    }

    pub fn cursor_down(&mut self) {
        self.view.down(self.buffer.line_count());
    }

    pub fn cursor_first(&mut self) {
        self.view.move_to(0, self.buffer.line_count());
    }

    pub fn cursor_last(&mut self) {
        self.view.move_to(usize::MAX, self.buffer.line_count());
    }

    pub fn set_viewport(&mut self, height: usize) {
        self.view.set_height(height, self.buffer.line_count());
    }

    /// 可见行及其下标
    pub fn visible_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let range = self.view.visible(self.buffer.line_count());
        let start = range.start;
        self.buffer.lines()[range]
            .iter()
            .enumerate()
            .map(move |(i, l)| (start + i, l.as_str()))
    }

    /// 是否是 `_id` 字段所在行（该字段不会被提交）
    pub fn is_identifier_line(&self, index: usize) -> bool {
        self.buffer
            .line(index)
            .is_some_and(|l| l.trim_start().starts_with("\"_id\""))
    }

    /// 为某一行生成编辑请求；没有打开文档或越界时忽略
    pub fn edit_line(&self, index: usize) -> Option<PopupRequest> {
        if !self.is_open() {
            return None;
        }
        let line = self.buffer.line(index)?;
        Some(PopupRequest::new(
            PopupTitle::EditLine { line: index + 1 },
            line,
            PopupMode::EnterDisabled,
        ))
    }

    pub fn edit_current_line(&self) -> Option<PopupRequest> {
        self.edit_line(self.view.selected)
    }

    /// 应用一次行编辑：拼接并校验候选文档
    ///
    /// 校验失败时缓冲区保持原样并返回 `InvalidJson`；
    /// 成功时缓冲区换成候选文本（提交失败也会保留），返回待提交的全文。
    pub fn apply_line_edit(&mut self, index: usize, content: &str) -> CoreResult<String> {
        let candidate = self.buffer.with_line(index, content).ok_or_else(|| {
            CoreError::ValidationError(format!("line {} is out of range", index + 1))
        })?;

        validate_json(&candidate)?;

        self.buffer = DocumentBuffer::from_text(candidate.clone());
        self.view.move_to(self.view.selected, self.buffer.line_count());
        Ok(candidate)
    }
}

/// 候选文本须是一个或多个完整的 JSON 值
pub fn validate_json(candidate: &str) -> CoreResult<()> {
    let mut count = 0;
    for value in serde_json::Deserializer::from_str(candidate).into_iter::<Value>() {
        value.map_err(|e| CoreError::InvalidJson(e.to_string()))?;
        count += 1;
    }
    if count == 0 {
        return Err(CoreError::InvalidJson("document is empty".to_string()));
    }
    Ok(())
}
