//! 跨后端共享的工具函数：文件名清理、标签截断、导入导出文件读写

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::error::{ProviderError, Result};

/// 摘要字段的最大显示长度
pub const LABEL_SUMMARY_MAX: usize = 50;

/// Replace characters that are unsafe in file names with `_`.
///
/// Covers path separators, the Windows reserved set and control characters, so an
/// identifier such as `a/b:c` never escapes the export directory.
pub fn sanitize_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // "." 和 ".." 不能作为文件名
    match cleaned.as_str() {
        "" => "_".to_string(),
        "." | ".." => cleaned.replace('.', "_"),
        _ => cleaned,
    }
}

/// 在同一目录内为清理后的名字去重：重名时追加 `-2`、`-3` ...
pub(crate) fn unique_file_stem(raw: &str, taken: &mut HashSet<String>) -> String {
    let base = sanitize_file_name(raw);
    let mut stem = base.clone();
    let mut n = 1;
    while !taken.insert(stem.clone()) {
        n += 1;
        stem = format!("{base}-{n}");
    }
    stem
}

/// 截断摘要文本，超长时追加 "..."
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// 写入 JSON 文本，自动创建父目录
pub async fn write_json_file(backend: &str, path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ProviderError::io(backend, parent, &e))?;
    }
    tokio::fs::write(path, json)
        .await
        .map_err(|e| ProviderError::io(backend, path, &e))
}

/// 读取导入文件：单个对象或对象数组
pub async fn read_import_file(backend: &str, path: &Path) -> Result<Vec<Value>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ProviderError::io(backend, path, &e))?;
    parse_import_payload(backend, &text)
}

/// 解析导入内容
pub fn parse_import_payload(backend: &str, text: &str) -> Result<Vec<Value>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ProviderError::InvalidDocument {
            backend: backend.to_string(),
            detail: e.to_string(),
        })?;

    let documents = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(ProviderError::InvalidDocument {
                backend: backend.to_string(),
                detail: "expected a JSON object or an array of objects".to_string(),
            });
        }
    };

    if let Some(pos) = documents.iter().position(|d| !d.is_object()) {
        return Err(ProviderError::InvalidDocument {
            backend: backend.to_string(),
            detail: format!("element {pos} is not a JSON object"),
        });
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_unsafe_characters() {
        assert_eq!(sanitize_file_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_file_name("what?*<>|\""), "what______");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
        assert_eq!(sanitize_file_name(".."), "__");
        assert_eq!(sanitize_file_name(""), "_");
        assert_eq!(
            sanitize_file_name("65a1f0c2e4b0a1b2c3d4e5f6"),
            "65a1f0c2e4b0a1b2c3d4e5f6"
        );
    }

    #[test]
    fn unique_file_stem_suffixes_collisions() {
        let mut taken = HashSet::new();
        assert_eq!(unique_file_stem("a/b", &mut taken), "a_b");
        assert_eq!(unique_file_stem("a_b", &mut taken), "a_b-2");
        assert_eq!(unique_file_stem("a:b", &mut taken), "a_b-3");
        assert_eq!(unique_file_stem("a_b-2", &mut taken), "a_b-2-2");
        assert_eq!(unique_file_stem("c", &mut taken), "c");
    }

    #[test]
    fn truncate_summary_appends_ellipsis_only_when_needed() {
        assert_eq!(truncate_summary("short", 50), "short");
        let long = "x".repeat(60);
        let truncated = truncate_summary(&long, 50);
        assert_eq!(truncated.len(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn import_payload_accepts_object_or_array() {
        assert_eq!(parse_import_payload("t", r#"{"a":1}"#).unwrap().len(), 1);
        assert_eq!(
            parse_import_payload("t", r#"[{"a":1},{"b":2}]"#).unwrap().len(),
            2
        );
        assert!(parse_import_payload("t", "42").is_err());
        assert!(parse_import_payload("t", r#"[{"a":1}, 3]"#).is_err());
        assert!(parse_import_payload("t", "not json").is_err());
    }

    #[tokio::test]
    async fn write_json_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("db").join("coll").join("1.json");

        write_json_file("t", &path, "{}").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn read_import_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_import_file("t", &dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::IoError { .. }));
    }
}
