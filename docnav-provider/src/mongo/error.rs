//! `MongoDB` 驱动错误映射

use mongodb::error::{Error as DriverError, ErrorKind};

use crate::error::ProviderError;
use crate::traits::{ErrorMapper, RawBackendError};

use super::BACKEND;

/// 服务端错误码
const CODE_UNAUTHORIZED: &str = "13";
const CODE_AUTHENTICATION_FAILED: &str = "18";
const CODE_NAMESPACE_EXISTS: &str = "48";

pub(crate) struct MongoErrorMapper;

impl ErrorMapper for MongoErrorMapper {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn map_error(&self, raw: RawBackendError) -> ProviderError {
        match raw.code.as_deref() {
            Some(CODE_UNAUTHORIZED) => ProviderError::PermissionDenied {
                backend: BACKEND.to_string(),
                raw_message: Some(raw.message),
            },
            Some(CODE_AUTHENTICATION_FAILED) => ProviderError::InvalidCredentials {
                backend: BACKEND.to_string(),
                raw_message: Some(raw.message),
            },
            Some(CODE_NAMESPACE_EXISTS) => ProviderError::InvalidParameter {
                backend: BACKEND.to_string(),
                param: "name".to_string(),
                detail: raw.message,
            },
            _ => self.unknown_error(raw),
        }
    }
}

impl MongoErrorMapper {
    /// 将驱动错误映射到统一错误类型
    pub fn map_driver(&self, err: &DriverError) -> ProviderError {
        match err.kind.as_ref() {
            ErrorKind::Authentication { message, .. } => ProviderError::InvalidCredentials {
                backend: BACKEND.to_string(),
                raw_message: Some(message.clone()),
            },
            ErrorKind::ServerSelection { message, .. } | ErrorKind::DnsResolve { message, .. } => {
                ProviderError::ConnectionFailed {
                    backend: BACKEND.to_string(),
                    detail: message.clone(),
                }
            }
            ErrorKind::Io(io) => ProviderError::ConnectionFailed {
                backend: BACKEND.to_string(),
                detail: io.to_string(),
            },
            ErrorKind::InvalidArgument { message, .. } => ProviderError::InvalidParameter {
                backend: BACKEND.to_string(),
                param: "argument".to_string(),
                detail: message.clone(),
            },
            ErrorKind::Command(command) => self.map_error(RawBackendError {
                code: Some(command.code.to_string()),
                message: command.message.clone(),
            }),
            _ => self.unknown_error(RawBackendError {
                code: None,
                message: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_server_codes() {
        let mapper = MongoErrorMapper;
        let denied = mapper.map_error(RawBackendError {
            code: Some("13".to_string()),
            message: "not authorized".to_string(),
        });
        assert!(matches!(denied, ProviderError::PermissionDenied { .. }));

        let auth = mapper.map_error(RawBackendError {
            code: Some("18".to_string()),
            message: "Authentication failed.".to_string(),
        });
        assert!(matches!(auth, ProviderError::InvalidCredentials { .. }));

        let other = mapper.map_error(RawBackendError {
            code: Some("2".to_string()),
            message: "bad value".to_string(),
        });
        assert_eq!(other.to_string(), "[mongodb] bad value");
    }
}
