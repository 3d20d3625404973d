//! 翻译键定义
//!
//! 定义所有翻译文本的结构体，提供编译期类型检查。
//!
//! ## 分类标准
//!
//! 1. **按 UI 组件位置分类**：文本归属于它出现的 UI 组件
//! 2. **弹窗内容归 `modal.*`**：所有弹窗（Modal）的内容都放在 modal 下
//! 3. **跨组件复用归 `common.*`**：多处使用的通用词汇
//! 4. **键盘提示归 `hints.*`**：按键名称和操作提示
//!
//! 带冒号结尾的文本后面会拼接具体的名称或错误信息。

/// 所有翻译文本的根结构
pub struct Translations {
    /// 通用文本（跨多处复用）
    pub common: CommonTexts,
    /// 键盘提示（按键名称 + 动作词）
    pub hints: HintTexts,
    /// 列表面板各层标题
    pub levels: LevelTexts,
    /// 文档编辑器文本
    pub editor: EditorTexts,
    /// 弹窗文本（所有弹窗的内容）
    pub modal: ModalTexts,
    /// 状态栏文本
    pub status_bar: StatusBarTexts,
    /// 帮助页面文本
    pub help: HelpTexts,
}

// ============================================================================
// 通用文本
// ============================================================================

/// 通用文本（跨多处复用的词汇）
pub struct CommonTexts {
    pub app_name: &'static str,
    pub add: &'static str,
    pub delete: &'static str,
    pub export: &'static str,
    pub import: &'static str,
    pub cancel: &'static str,
    pub save: &'static str,
    pub confirm: &'static str,
    pub close: &'static str,
    pub quit: &'static str,
    pub back: &'static str,
    pub no_data: &'static str,
    pub error: &'static str,
}

// ============================================================================
// 键盘提示
// ============================================================================

/// 键盘提示文本
pub struct HintTexts {
    /// 按键名称
    pub keys: KeyNames,
    /// 动作描述
    pub actions: ActionTexts,
}

/// 按键名称
pub struct KeyNames {
    pub enter: &'static str,
    pub esc: &'static str,
    pub tab: &'static str,
    pub ctrl_s: &'static str,
    pub arrows_lr: &'static str,
    pub arrows_ud: &'static str,
}

/// 动作描述（用于组合提示）
pub struct ActionTexts {
    pub navigate: &'static str,
    pub open: &'static str,
    pub switch_panel: &'static str,
    pub edit_line: &'static str,
    pub newline: &'static str,
    pub switch_option: &'static str,
}

// ============================================================================
// 面板文本
// ============================================================================

/// 列表面板各层标题
pub struct LevelTexts {
    pub connections: &'static str,
    pub databases: &'static str,
    pub collections: &'static str,
    pub documents: &'static str,
}

/// 文档编辑器文本
pub struct EditorTexts {
    pub title: &'static str,
    pub empty: &'static str,
}

// ============================================================================
// 弹窗
// ============================================================================

/// 弹窗文本
pub struct ModalTexts {
    pub connecting: &'static str,
    pub connected: &'static str,
    pub connect_failed: &'static str,
    pub confirm_delete_title: &'static str,
    pub confirm_delete_message: &'static str,
    pub confirm_export_title: &'static str,
    pub confirm_export_message: &'static str,
    pub invalid_json_title: &'static str,
    pub export_done_title: &'static str,
    pub exported_to: &'static str,
    pub exported_count: &'static str,
    pub failed_count: &'static str,
    /// 输入框标题，名称拼接在后
    pub new_database: &'static str,
    pub first_collection_in: &'static str,
    pub new_collection_in: &'static str,
    pub new_document_in: &'static str,
    pub line: &'static str,
    pub import_into: &'static str,
}

// ============================================================================
// 其他组件
// ============================================================================

/// 状态栏文本
pub struct StatusBarTexts {
    pub refreshed: &'static str,
    pub saved: &'static str,
    pub created: &'static str,
    pub deleted: &'static str,
    pub imported: &'static str,
    pub nothing_selected: &'static str,
    pub create_unavailable: &'static str,
    pub import_unavailable: &'static str,
    pub identifier_line: &'static str,
}

/// 帮助页面文本
pub struct HelpTexts {
    pub title: &'static str,
    pub global_shortcuts: &'static str,
    pub operation_shortcuts: &'static str,
    pub editor_shortcuts: &'static str,
    pub close_hint: &'static str,
    /// 快捷键动作描述
    pub actions: HelpActionTexts,
}

/// 帮助页面快捷键动作描述
pub struct HelpActionTexts {
    pub switch_panel: &'static str,
    pub move_up_down: &'static str,
    pub open: &'static str,
    pub back_cancel: &'static str,
    pub refresh: &'static str,
    pub help: &'static str,
    pub quit: &'static str,
    pub add: &'static str,
    pub delete: &'static str,
    pub export: &'static str,
    pub import: &'static str,
    pub edit_line: &'static str,
    pub save: &'static str,
}
