//! Core types and traits for the Portal URL shortener.
//!
//! This crate provides the shared vocabulary used by the shortener,
//! redirector and stats services: the validated short code, the persisted
//! link record, and the repository contract the storage backends implement.

pub mod error;
pub mod link;
pub mod repository;
pub mod shortcode;

pub use error::{CoreError, StorageError};
pub use link::LinkRecord;
pub use repository::{ReadRepository, Repository};
pub use shortcode::ShortCode;
