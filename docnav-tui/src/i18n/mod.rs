//! 国际化（i18n）模块
//!
//! 使用纯 Rust 结构体方案，编译期类型检查，零运行时开销。
//! 语言在启动时由 `DOCNAV_LANG` 决定。

use std::sync::atomic::{AtomicUsize, Ordering};

use docnav_core::popup::PopupTitle;
use docnav_core::Level;

mod en_us;
pub mod keys;
mod zh_cn;

pub use keys::*;

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// 英语（美国）
    #[default]
    EnUs,
    /// 简体中文（中国）
    ZhCn,
}

impl Language {
    /// 获取语言代码（BCP 47 标准）
    pub fn code(self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::ZhCn => "zh-CN",
        }
    }

    /// 从语言代码解析
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en-US" | "en" => Some(Language::EnUs),
            "zh-CN" | "zh" => Some(Language::ZhCn),
            _ => None,
        }
    }
}

/// 当前语言索引（原子操作，线程安全）
static CURRENT_LANGUAGE: AtomicUsize = AtomicUsize::new(0); // 0 = EnUs

/// 获取当前语言的翻译
pub fn t() -> &'static Translations {
    match CURRENT_LANGUAGE.load(Ordering::Relaxed) {
        1 => &zh_cn::TRANSLATIONS,
        _ => &en_us::TRANSLATIONS,
    }
}

/// 设置当前语言
pub fn set_language(lang: Language) {
    let index = match lang {
        Language::EnUs => 0,
        Language::ZhCn => 1,
    };
    CURRENT_LANGUAGE.store(index, Ordering::Relaxed);
}

/// 获取当前语言
pub fn current_language() -> Language {
    match CURRENT_LANGUAGE.load(Ordering::Relaxed) {
        1 => Language::ZhCn,
        _ => Language::EnUs,
    }
}

/// 层级标题的翻译
pub fn level_title(level: Level) -> &'static str {
    let levels = &t().levels;
    match level {
        Level::Connections => levels.connections,
        Level::Databases => levels.databases,
        Level::Collections => levels.collections,
        Level::Documents => levels.documents,
    }
}

/// 输入框标题的翻译
pub fn popup_title(title: &PopupTitle) -> String {
    popup_title_in(t(), title)
}

fn popup_title_in(texts: &Translations, title: &PopupTitle) -> String {
    let modal = &texts.modal;
    match title {
        PopupTitle::NewDatabase => modal.new_database.to_string(),
        PopupTitle::FirstCollection { database } => {
            format!("{} {database}", modal.first_collection_in)
        }
        PopupTitle::NewCollection { database } => format!("{} {database}", modal.new_collection_in),
        PopupTitle::NewDocument { collection } => {
            format!("{} {collection}", modal.new_document_in)
        }
        PopupTitle::EditLine { line } => format!("{} {line}", modal.line),
        PopupTitle::Import { collection } => format!("{} {collection}", modal.import_into),
    }
}
