//! docnav Core Library
//!
//! Platform-independent logic of the document browser:
//! - Navigation state machine over connection → database → collection → document
//! - Width-constrained breadcrumb titles
//! - Scrollable list panel with per-level selection memory
//! - Line-oriented document editor with validate → commit → refetch saves
//! - Popup dialog lifecycle and the cancellable async connect task
//! - Create / delete / export / import flows
//!
//! The database is reached only through the `docnav-provider` gateway traits, so every
//! component here can be driven by an in-memory gateway in tests.

pub mod config;
pub mod connect;
pub mod editor;
pub mod error;
pub mod export;
pub mod flows;
pub mod navigation;
pub mod panel;
pub mod popup;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use navigation::{Level, NavigationController};

// Re-export gateway types used in this crate's public API
pub use docnav_provider::{
    ConnectionProfile, DocumentEntry, DocumentId, ExportReport, Gateway, ProviderError, Session,
    SessionHandle,
};
