//! 面板标题中的路径面包屑
//!
//! 宽度不足时优先保留最具体的部分（集合 > 数据库 > 连接）。

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: &str = " > ";
const ELLIPSIS: &str = "...";
/// 标题前缀 `": "` 的宽度
const LABEL_GAP: usize = 2;
/// 边框占用的宽度
const FRAME: usize = 4;
/// 低于该宽度时不显示面包屑
const MIN_AVAILABLE: usize = 20;
/// 三段式时连接名的固定宽度
const FIRST_PART_WIDTH: usize = 15;

/// 构造 `"<base>: a > b > c"` 形式的标题，结果不超过 `width`
pub fn build_title(base: &str, parts: &[&str], width: usize) -> String {
    let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return base.to_string();
    }

    let available = match width.checked_sub(base.width() + LABEL_GAP + FRAME) {
        Some(n) if n >= MIN_AVAILABLE => n,
        _ => return base.to_string(),
    };

    let truncated: Vec<String> = match parts.as_slice() {
        [only] => vec![truncate_end(only, available)],
        [first, second] => {
            let each = (available - SEPARATOR.len()) / 2;
            vec![truncate_end(first, each), truncate_end(second, each)]
        }
        [first, middle, last] => vec![
            truncate_end(first, FIRST_PART_WIDTH),
            truncate_end(middle, available * 33 / 100),
            truncate_end(last, available * 50 / 100),
        ],
        _ => parts.iter().map(|p| (*p).to_string()).collect(),
    };

    let mut crumb = truncated.join(SEPARATOR);
    if crumb.width() > available {
        crumb = truncate_front(&crumb, available);
    }

    format!("{base}: {crumb}")
}

/// 截断尾部并追加 `...`
pub fn truncate_end(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let budget = max.saturating_sub(ELLIPSIS.len());
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// 截断头部，保留末尾并加 `...` 前缀
pub fn truncate_front(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let budget = max.saturating_sub(ELLIPSIS.len());
    let mut used = 0;
    let mut tail = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    let mut out = String::from(ELLIPSIS);
    out.extend(tail.into_iter().rev());
    out
}
