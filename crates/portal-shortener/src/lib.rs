//! Shortening service for the Portal URL shortener.
//!
//! This crate owns the write path: URL validation, expiration policy, and
//! the bounded collision-retry loop around the store's conflict signal.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::ShortenError;
pub use service::ShortenerService;
pub use shortener::{ExpirationPolicy, ShortenParams, ShortenedLink, Shortener};
