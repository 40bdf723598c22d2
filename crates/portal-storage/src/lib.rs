//! Repository implementations for the Portal URL shortener.
//!
//! Two backends implement the `portal-core` repository contract: a
//! DashMap-backed in-memory store for tests and single-node setups, and a
//! MySQL store for durable deployments.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use portal_core::{ReadRepository, Repository, StorageError};
