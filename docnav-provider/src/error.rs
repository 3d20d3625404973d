use serde::{Deserialize, Serialize};

/// Unified error type for all gateway operations.
///
/// Each variant includes a `backend` field identifying which gateway produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Transient Errors
///
/// The following variants represent failures that may succeed when the user retries:
/// - [`ConnectionFailed`](Self::ConnectionFailed): server unreachable, handshake failed
/// - [`Timeout`](Self::Timeout): the operation did not complete in time
///
/// The gateway never retries on its own; the navigation layer surfaces the error and
/// leaves its state untouched so the user can try again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The server could not be reached or the handshake failed.
    ConnectionFailed {
        /// Gateway that produced the error.
        backend: String,
        /// Error details.
        detail: String,
    },

    /// The operation did not complete within its time bound.
    Timeout {
        /// Gateway that produced the error.
        backend: String,
        /// Error details.
        detail: String,
    },

    /// The server rejected the profile's credentials.
    InvalidCredentials {
        /// Gateway that produced the error.
        backend: String,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// No document matched the stored identifier.
    DocumentNotFound {
        /// Gateway that produced the error.
        backend: String,
        /// Display form of the identifier that matched nothing.
        document_id: String,
    },

    /// The payload is not a document the backend can store (not an object, bad extended JSON).
    InvalidDocument {
        /// Gateway that produced the error.
        backend: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// A request parameter is invalid (e.g., an empty database name).
    InvalidParameter {
        /// Gateway that produced the error.
        backend: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Gateway that produced the error.
        backend: String,
        /// Original error message from the server, if available.
        raw_message: Option<String>,
    },

    /// Reading or writing a local file failed (export/import).
    IoError {
        /// Gateway that produced the error.
        backend: String,
        /// Path being read or written.
        path: String,
        /// Error details.
        detail: String,
    },

    /// Failed to serialize a document for display or export.
    SerializationError {
        /// Gateway that produced the error.
        backend: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the backend.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Gateway that produced the error.
        backend: String,
        /// Raw error code from the server, if available.
        raw_code: Option<String>,
        /// Raw error message from the server.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::DocumentNotFound { .. }
                | Self::InvalidDocument { .. }
                | Self::InvalidParameter { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// 构造本地文件读写错误
    pub fn io(backend: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::IoError {
            backend: backend.to_string(),
            path: path.display().to_string(),
            detail: err.to_string(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed { backend, detail } => {
                write!(f, "[{backend}] Connection failed: {detail}")
            }
            Self::Timeout { backend, detail } => {
                write!(f, "[{backend}] Timed out: {detail}")
            }
            Self::InvalidCredentials {
                backend,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{backend}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{backend}] Invalid credentials")
                }
            }
            Self::DocumentNotFound {
                backend,
                document_id,
            } => {
                write!(f, "[{backend}] No document found with _id {document_id}")
            }
            Self::InvalidDocument { backend, detail } => {
                write!(f, "[{backend}] Invalid document: {detail}")
            }
            Self::InvalidParameter {
                backend,
                param,
                detail,
            } => {
                write!(f, "[{backend}] Invalid parameter '{param}': {detail}")
            }
            Self::PermissionDenied {
                backend,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{backend}] Permission denied: {msg}")
                } else {
                    write!(f, "[{backend}] Permission denied")
                }
            }
            Self::IoError {
                backend,
                path,
                detail,
            } => {
                write!(f, "[{backend}] I/O error on '{path}': {detail}")
            }
            Self::SerializationError { backend, detail } => {
                write!(f, "[{backend}] Serialization error: {detail}")
            }
            Self::Unknown {
                backend,
                raw_message,
                ..
            } => {
                write!(f, "[{backend}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
