//! 模态文本输入框
//!
//! 对话框只负责文本与光标；保存后的内容交给调用方处理。每个实例恰好结算一次。

/// Enter 键的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupMode {
    /// Enter 插入换行，Ctrl+S 保存
    MultiLine,
    /// Enter 直接保存
    SingleLine,
    /// Enter 无效，只能 Ctrl+S 保存（整行编辑）
    EnterDisabled,
}

/// 对话框标题，由界面层翻译成显示文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupTitle {
    NewDatabase,
    FirstCollection { database: String },
    NewCollection { database: String },
    NewDocument { collection: String },
    /// 行号从 1 开始
    EditLine { line: usize },
    Import { collection: String },
}

/// 打开对话框的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRequest {
    pub title: PopupTitle,
    pub content: String,
    pub mode: PopupMode,
}

impl PopupRequest {
    pub fn new(title: PopupTitle, content: impl Into<String>, mode: PopupMode) -> Self {
        Self {
            title,
            content: content.into(),
            mode,
        }
    }
}

/// 对话框的结算结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupResolution {
    Saved(String),
    Cancelled,
}

/// 正在显示的对话框
#[derive(Debug, Clone)]
pub struct PopupDialog {
    title: PopupTitle,
    mode: PopupMode,
    lines: Vec<Vec<char>>,
    row: usize,
    col: usize,
    resolved: bool,
}

impl PopupDialog {
    /// 显示对话框，光标放在内容末尾
    pub fn show(request: PopupRequest) -> Self {
        let lines: Vec<Vec<char>> = request
            .content
            .split('\n')
            .map(|l| l.chars().collect())
            .collect();
        let row = lines.len() - 1;
        let col = lines[row].len();
        Self {
            title: request.title,
            mode: request.mode,
            lines,
            row,
            col,
            resolved: false,
        }
    }

    pub fn title(&self) -> &PopupTitle {
        &self.title
    }

    pub fn mode(&self) -> PopupMode {
        self.mode
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// (行, 列)，列按字符计
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.iter().collect()).collect()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        self.lines[self.row].insert(self.col, c);
        self.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        let rest = self.lines[self.row].split_off(self.col);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            self.lines[self.row].remove(self.col);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].extend(line);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.lines[self.row].len() {
            self.lines[self.row].remove(self.col);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].extend(next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.lines[self.row].len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.lines[self.row].len());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.lines[self.row].len());
        }
    }

    pub fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self) {
        self.col = self.lines[self.row].len();
    }

    /// Enter 键，按模式插入换行、保存或忽略
    pub fn enter(&mut self) -> Option<PopupResolution> {
        match self.mode {
            PopupMode::MultiLine => {
                self.insert_newline();
                None
            }
            PopupMode::SingleLine => self.save(),
            PopupMode::EnterDisabled => None,
        }
    }

    /// 保存，去掉一个末尾换行；已结算时返回 None
    pub fn save(&mut self) -> Option<PopupResolution> {
        if self.resolved {
            return None;
        }
        self.resolved = true;
        let mut text = self.text();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(PopupResolution::Saved(text))
    }

    /// 取消；已结算时返回 None
    pub fn cancel(&mut self) -> Option<PopupResolution> {
        if self.resolved {
            return None;
        }
        self.resolved = true;
        Some(PopupResolution::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog(content: &str, mode: PopupMode) -> PopupDialog {
        PopupDialog::show(PopupRequest::new(PopupTitle::EditLine { line: 1 }, content, mode))
    }

    #[test]
    fn show_places_cursor_at_end_of_content() {
        let d = dialog("{\n  \"a\": 1\n}", PopupMode::MultiLine);
        assert_eq!(d.cursor(), (2, 1));
        assert_eq!(dialog("", PopupMode::SingleLine).cursor(), (0, 0));
    }

    #[test]
    fn single_line_enter_saves() {
        let mut d = dialog("users", PopupMode::SingleLine);
        d.insert_str("_v2");
        assert_eq!(d.enter(), Some(PopupResolution::Saved("users_v2".to_string())));
        assert!(d.is_resolved());
    }

    #[test]
    fn enter_disabled_ignores_enter() {
        let mut d = dialog("  \"a\": 1,", PopupMode::EnterDisabled);
        assert_eq!(d.enter(), None);
        assert_eq!(d.lines().len(), 1);
        assert_eq!(d.save(), Some(PopupResolution::Saved("  \"a\": 1,".to_string())));
    }

    #[test]
    fn multi_line_enter_splits_the_line() {
        let mut d = dialog("ab", PopupMode::MultiLine);
        d.move_left();
        assert_eq!(d.enter(), None);
        assert_eq!(d.lines(), vec!["a", "b"]);
        d.backspace();
        assert_eq!(d.text(), "ab");
    }

    #[test]
    fn save_strips_one_trailing_newline() {
        let mut d = dialog("value", PopupMode::MultiLine);
        d.insert_newline();
        d.insert_newline();
        assert_eq!(d.save(), Some(PopupResolution::Saved("value\n".to_string())));
    }

    #[test]
    fn resolves_exactly_once() {
        let mut d = dialog("x", PopupMode::MultiLine);
        assert_eq!(d.cancel(), Some(PopupResolution::Cancelled));
        assert_eq!(d.save(), None);
        assert_eq!(d.cancel(), None);
    }

    #[test]
    fn editing_keys_move_across_lines() {
        let mut d = dialog("ab\ncd", PopupMode::MultiLine);
        d.home();
        d.move_left();
        assert_eq!(d.cursor(), (0, 2));
        d.delete();
        assert_eq!(d.text(), "abcd");
        d.end();
        d.move_up();
        assert_eq!(d.cursor(), (0, 4));
        d.insert_char('é');
        assert_eq!(d.text(), "abcdé");
    }
}
