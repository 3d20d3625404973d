//! # docnav-provider
//!
//! The gateway layer of docnav: a small, swappable contract for reaching a
//! hierarchical document database (connection → database → collection → document).
//!
//! ## Backends
//!
//! | Backend | Feature Flag | Identifier handling |
//! |---------|-------------|---------------------|
//! | [MongoDB](https://www.mongodb.com/) | `mongo` *(default)* | `ObjectId` / extended JSON, see [`mongo::id`] |
//!
//! ## Shape of the API
//!
//! - [`Gateway::connect`] turns a [`ConnectionProfile`] into a [`SessionHandle`].
//! - Every other operation lives on [`Session`] and is called on that handle; nothing
//!   is stored in globals, so callers can hold a fake session in tests.
//! - Export and import have default implementations on [`Session`] built from the
//!   listing and insert operations. Bulk exports keep going past individual failures and
//!   return an [`ExportReport`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docnav_provider::{ConnectionProfile, Gateway, MongoGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let profile: ConnectionProfile = serde_json::from_str(
//!         r#"{"name":"local","host":"127.0.0.1","port":27017}"#,
//!     )?;
//!
//!     let session = MongoGateway::new().connect(&profile).await?;
//!     for db in session.list_databases().await? {
//!         println!("{db}: {:?}", session.list_collections(&db).await?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Notable variants:
//!
//! - [`ProviderError::ConnectionFailed`] / [`ProviderError::Timeout`]: server unreachable
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::DocumentNotFound`]: replace/delete matched nothing
//! - [`ProviderError::InvalidDocument`]: payload is not a storable JSON object
//!
//! [`ProviderError::is_expected`] separates user-caused failures (logged at `warn`)
//! from everything else (logged at `error`).

mod error;
#[cfg(feature = "mongo")]
pub mod mongo;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export public traits (internal traits are not exported)
pub use traits::{parse_document_object, Gateway, Session, SessionHandle};

// Re-export types
pub use types::{ConnectionProfile, DocumentEntry, DocumentId, ExportFailure, ExportReport};

// Re-export helpers shared with the navigation layer
pub use utils::{parse_import_payload, sanitize_file_name, truncate_summary, LABEL_SUMMARY_MAX};

#[cfg(feature = "mongo")]
pub use mongo::{MongoGateway, MongoSession};
