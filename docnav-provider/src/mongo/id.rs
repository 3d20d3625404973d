//! Identifier normalization at the `MongoDB` boundary.
//!
//! Stored ids travel through the rest of the program as canonical extended JSON
//! ([`DocumentId`]), which converts back to the exact BSON value. Two heuristics are
//! layered on top and kept here, away from the navigation and editor code:
//!
//! - **Lookup fallback**: when the exact id matches nothing, a 24-hex string is retried as
//!   an `ObjectId` and an `ObjectId` is retried as its hex string.
//! - **New-document ids**: an absent `_id`, or a `{"$oid": ...}` whose value is not a valid
//!   `ObjectId`, is replaced with a freshly generated `ObjectId`.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::{json, Map, Value};

use crate::types::DocumentId;

/// 模板中占位的 `$oid` 值
pub const TEMPLATE_OID: &str = "<generated>";

/// `ObjectId` 的十六进制形式：24 位
pub fn is_object_id_hex(s: &str) -> bool {
    s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// BSON 值 → 规范扩展 JSON id
pub fn id_from_bson(value: &Bson) -> DocumentId {
    DocumentId::new(value.clone().into_canonical_extjson())
}

/// 规范扩展 JSON id → 精确的 BSON 值
pub fn exact_bson(id: &DocumentId) -> Result<Bson, String> {
    Bson::try_from(id.as_value().clone()).map_err(|e| e.to_string())
}

/// 精确匹配失败后依次尝试的候选值
pub fn fallback_candidates(exact: &Bson) -> Vec<Bson> {
    match exact {
        Bson::String(s) if is_object_id_hex(s) => ObjectId::parse_str(s)
            .map(|oid| vec![Bson::ObjectId(oid)])
            .unwrap_or_default(),
        Bson::ObjectId(oid) => vec![Bson::String(oid.to_hex())],
        _ => Vec::new(),
    }
}

/// 构造查询过滤条件：精确值优先，其后为候选值
pub fn id_filters(id: &DocumentId) -> Result<Vec<Document>, String> {
    let exact = exact_bson(id)?;
    let mut filters = vec![doc! { "_id": exact.clone() }];
    filters.extend(
        fallback_candidates(&exact)
            .into_iter()
            .map(|candidate| doc! { "_id": candidate }),
    );
    Ok(filters)
}

/// 为新文档准备 `_id`
pub fn prepare_new_id(document: &mut Map<String, Value>) {
    let needs_fresh_id = match document.get("_id") {
        None | Some(Value::Null) => true,
        Some(Value::Object(inner)) => match inner.get("$oid") {
            Some(Value::String(hex)) => !is_object_id_hex(hex),
            Some(_) => true,
            None => false,
        },
        Some(_) => false,
    };

    if needs_fresh_id {
        document.insert(
            "_id".to_string(),
            json!({ "$oid": ObjectId::new().to_hex() }),
        );
    }
}
