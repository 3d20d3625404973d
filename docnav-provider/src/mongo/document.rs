//! BSON 文档与显示文本之间的转换

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

use super::id::id_from_bson;
use crate::types::{DocumentEntry, DocumentId};
use crate::utils::{truncate_summary, LABEL_SUMMARY_MAX};

/// 依次尝试作为摘要的字段
const SUMMARY_FIELDS: [&str; 4] = ["name", "username", "title", "email"];

/// 文档 → 格式化的 relaxed 扩展 JSON
pub fn to_pretty_json(document: Document) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Bson::Document(document).into_relaxed_extjson())
}

/// 扩展 JSON 对象 → 文档
pub fn from_json_object(map: Map<String, Value>) -> Result<Document, String> {
    match Bson::try_from(Value::Object(map)) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(format!("expected a document, got {:?}", other.element_type())),
        Err(e) => Err(e.to_string()),
    }
}

/// 第一个非空的摘要字段
pub fn summary(document: &Document) -> Option<String> {
    SUMMARY_FIELDS.iter().find_map(|field| {
        document
            .get_str(field)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| truncate_summary(s, LABEL_SUMMARY_MAX))
    })
}

/// 列表标签：`<id>  <摘要>`，无摘要时仅 id
pub fn label_for(id: &DocumentId, document: &Document) -> String {
    match summary(document) {
        Some(text) => format!("{id}  {text}"),
        None => id.to_string(),
    }
}

/// 文档 → 列表行
pub fn to_entry(document: Document) -> serde_json::Result<DocumentEntry> {
    let id = document
        .get("_id")
        .map_or_else(|| DocumentId::new(Value::Null), id_from_bson);
    let label = label_for(&id, &document);
    let json = to_pretty_json(document)?;
    Ok(DocumentEntry { id, label, json })
}
