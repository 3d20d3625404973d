//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use docnav_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The connection profile file is missing or malformed
    #[error("Profile store error ({path}): {detail}")]
    ProfileStore { path: String, detail: String },

    /// No profile with this name
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// An operation needs an open session
    #[error("Not connected")]
    NotConnected,

    /// An operation needs a selected item
    #[error("Nothing selected")]
    NoSelection,

    /// The edited document no longer parses
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Local file system error outside the gateway (export directory etc.)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Gateway error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ProfileNotFound(_)
            | Self::NoSelection
            | Self::InvalidJson(_)
            | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::ProfileStore { .. } | Self::NotConnected | Self::StorageError(_) => false,
        }
    }

    /// 按 `is_expected` 选择日志级别记录错误
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_classification() {
        let not_found: CoreError = ProviderError::DocumentNotFound {
            backend: "memory".to_string(),
            document_id: "1".to_string(),
        }
        .into();
        assert!(not_found.is_expected());
        assert_eq!(not_found.to_string(), "[memory] No document found with _id 1");

        let refused: CoreError = ProviderError::ConnectionFailed {
            backend: "memory".to_string(),
            detail: "refused".to_string(),
        }
        .into();
        assert!(!refused.is_expected());
    }

    #[test]
    fn invalid_json_is_a_user_error() {
        let err = CoreError::InvalidJson("expected value at line 1 column 1".to_string());
        assert!(err.is_expected());
        assert!(err.to_string().starts_with("Invalid JSON"));
    }
}
