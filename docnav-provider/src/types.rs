use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ 连接配置 ============

const fn default_port() -> u16 {
    27017
}

/// A saved connection profile, loaded once at startup and read-only afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Display name, unique within the profile store.
    pub name: String,
    /// Host name or address of the server.
    pub host: String,
    /// TCP port, `27017` when omitted.
    #[serde(default = "default_port")]
    pub port: u16,
    /// User name; empty means unauthenticated.
    #[serde(default)]
    pub username: String,
    /// Password; empty means unauthenticated or looked up elsewhere.
    #[serde(default)]
    pub password: String,
    /// Default (authentication) database; may be empty.
    #[serde(default)]
    pub database: String,
}

impl ConnectionProfile {
    /// Whether the profile carries credentials.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }

    /// `host:port` form used in logs and dialogs.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// 避免密码出现在日志中
impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("database", &self.database)
            .finish()
    }
}

// ============ 文档 ============

/// Opaque primary key of a document.
///
/// Holds the canonical extended-JSON form of the key (e.g. `{"$oid": "..."}` for an
/// `ObjectId`, `{"$numberLong": "7"}` for a 64-bit integer) so it converts back to the
/// exact stored value. [`Display`](fmt::Display) prints the bare value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Value);

impl DocumentId {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Shortcut for string keys.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(Value::String(value.into()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((key, Value::String(inner))) if key.starts_with('$') => f.write_str(inner),
                _ => write!(f, "{}", self.0),
            },
            other => write!(f, "{other}"),
        }
    }
}

/// One row of a document listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEntry {
    /// Key used for every persistence operation.
    pub id: DocumentId,
    /// Derived, possibly non-unique display string.
    pub label: String,
    /// Pretty-printed document text.
    pub json: String,
}

// ============ 导出 ============

/// Outcome of a bulk export that continues past individual failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    /// Number of files written.
    pub exported_count: usize,
    /// Number of items that could not be written.
    pub failed_count: usize,
    /// Details about each failed item.
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Record a written item.
    pub fn record_success(&mut self) {
        self.exported_count += 1;
    }

    /// Record a failed item and keep going.
    pub fn record_failure(&mut self, item: impl Into<String>, reason: impl Into<String>) {
        self.failed_count += 1;
        self.failures.push(ExportFailure {
            item: item.into(),
            reason: reason.into(),
        });
    }

    /// Fold a nested report (e.g. one collection of a database export) into this one.
    pub fn absorb(&mut self, other: ExportReport) {
        self.exported_count += other.exported_count;
        self.failed_count += other.failed_count;
        self.failures.extend(other.failures);
    }

    /// Some, but not all, items were written.
    pub fn is_partial(&self) -> bool {
        self.exported_count > 0 && self.failed_count > 0
    }
}

/// Information about a single item that failed to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFailure {
    /// Document id or collection name that failed.
    pub item: String,
    /// Human-readable reason for the failure.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_defaults_port_and_optional_fields() {
        let profile: ConnectionProfile =
            serde_json::from_str(r#"{"name":"local","host":"127.0.0.1"}"#).unwrap();
        assert_eq!(profile.port, 27017);
        assert!(profile.username.is_empty());
        assert!(!profile.has_credentials());
        assert_eq!(profile.address(), "127.0.0.1:27017");
    }

    #[test]
    fn profile_debug_hides_password() {
        let profile = ConnectionProfile {
            name: "prod".to_string(),
            host: "db".to_string(),
            port: 27017,
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            database: "admin".to_string(),
        };
        let debug = format!("{profile:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn document_id_displays_bare_value() {
        let oid = DocumentId::new(json!({"$oid": "65a1f0c2e4b0a1b2c3d4e5f6"}));
        assert_eq!(oid.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");

        let long = DocumentId::new(json!({"$numberLong": "42"}));
        assert_eq!(long.to_string(), "42");

        assert_eq!(DocumentId::from_string("user-1").to_string(), "user-1");
        assert_eq!(DocumentId::new(json!(7)).to_string(), "7");
    }

    #[test]
    fn export_report_accumulates_partial_results() {
        let mut report = ExportReport::default();
        report.record_success();
        report.record_failure("doc-2", "disk full");

        let mut nested = ExportReport::default();
        nested.record_success();
        report.absorb(nested);

        assert_eq!(report.exported_count, 2);
        assert_eq!(report.failed_count, 1);
        assert!(report.is_partial());
        assert_eq!(report.failures[0].item, "doc-2");
    }
}
