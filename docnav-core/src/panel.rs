//! 可滚动的选择列表
//!
//! 每个层级一个面板；面板只负责光标、视口和条目，语义由 `NavigationController` 解析。

use docnav_provider::{DocumentEntry, DocumentId};

/// 列表条目背后的标识
#[derive(Debug, Clone, PartialEq)]
pub enum ItemTarget {
    /// 连接 / 数据库 / 集合，名称即标识
    Named(String),
    /// 文档：标签只是摘要，持久化使用 `id`
    Document { id: DocumentId, content: String },
}

/// 一个可显示的条目
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub label: String,
    pub target: ItemTarget,
}

impl ListItem {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            target: ItemTarget::Named(name),
        }
    }

    pub fn document(entry: DocumentEntry) -> Self {
        Self {
            label: entry.label,
            target: ItemTarget::Document {
                id: entry.id,
                content: entry.json,
            },
        }
    }

    /// 名称类条目的名称；文档条目返回 None
    pub fn name(&self) -> Option<&str> {
        match &self.target {
            ItemTarget::Named(name) => Some(name),
            ItemTarget::Document { .. } => None,
        }
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        match &self.target {
            ItemTarget::Document { id, .. } => Some(id),
            ItemTarget::Named(_) => None,
        }
    }
}

/// 面板产生的事件
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Selected { index: usize, item: ListItem },
    Back,
}

/// 光标 + 视口起点，编辑器与列表共用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub selected: usize,
    pub origin: usize,
    pub height: usize,
}

impl Viewport {
    /// 在 `len` 个条目内移动到 `index`，并保证其在视口内
    pub fn move_to(&mut self, index: usize, len: usize) {
        self.selected = if len == 0 { 0 } else { index.min(len - 1) };
        self.follow(len);
    }

    pub fn up(&mut self, len: usize) {
        self.move_to(self.selected.saturating_sub(1), len);
    }

    pub fn down(&mut self, len: usize) {
        self.move_to(self.selected + 1, len);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.origin = 0;
    }

    /// 调整视口高度；视口变大时起点回退，避免留出空行
    pub fn set_height(&mut self, height: usize, len: usize) {
        self.height = height;
        self.follow(len);
    }

    /// 可见条目的下标范围
    pub fn visible(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.origin.min(len);
        let end = if self.height == 0 {
            len
        } else {
            (self.origin + self.height).min(len)
        };
        start..end
    }

    fn follow(&mut self, len: usize) {
        if self.selected < self.origin {
            self.origin = self.selected;
        } else if self.height > 0 && self.selected >= self.origin + self.height {
            self.origin = self.selected + 1 - self.height;
        }
        // 末尾不留空行
        self.origin = self.origin.min(len.saturating_sub(self.height));
    }
}

/// 单个层级的列表面板
#[derive(Debug, Clone, Default)]
pub struct ListPanel {
    items: Vec<ListItem>,
    view: Viewport,
}

impl ListPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换条目，选择回到第一项
    pub fn set_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
        self.view.reset();
    }

    /// 替换条目但保留选择（越界时收缩到末项）
    pub fn refresh_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
        self.view.move_to(self.view.selected, self.items.len());
    }

    pub fn clear(&mut self) {
        self.set_items(Vec::new());
    }

    pub fn cursor_up(&mut self) {
        self.view.up(self.items.len());
    }

    pub fn cursor_down(&mut self) {
        self.view.down(self.items.len());
    }

    pub fn select_first(&mut self) {
        self.view.move_to(0, self.items.len());
    }

    pub fn select_last(&mut self) {
        self.view.move_to(usize::MAX, self.items.len());
    }

    /// 选中第一个满足条件的条目；没有匹配时不变
    pub fn select_where(&mut self, predicate: impl Fn(&ListItem) -> bool) -> bool {
        match self.items.iter().position(predicate) {
            Some(index) => {
                self.view.move_to(index, self.items.len());
                true
            }
            None => false,
        }
    }

    pub fn set_viewport(&mut self, height: usize) {
        self.view.set_height(height, self.items.len());
    }

    /// 当前项的选择事件；空列表时为 None
    pub fn select(&self) -> Option<PanelEvent> {
        self.selected_item().map(|item| PanelEvent::Selected {
            index: self.view.selected,
            item: item.clone(),
        })
    }

    pub fn back(&self) -> PanelEvent {
        PanelEvent::Back
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.view.selected
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.items.get(self.view.selected)
    }

    pub fn origin(&self) -> usize {
        self.view.origin
    }

    pub fn visible_items(&self) -> &[ListItem] {
        &self.items[self.view.visible(self.items.len())]
    }
}
