use crate::error::StorageError;
use crate::link::LinkRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing read-side consumers like the stats reporter to do without
/// write access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the link record for a given short code.
    ///
    /// Returns `None` if the code does not exist. Expired records are still
    /// returned; classifying them is the caller's read-time concern.
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

/// The full repository contract the link store implements.
///
/// The store owns short-code uniqueness: `insert` must admit exactly one
/// winner when two calls race on the same code, without any application-side
/// pre-checking. `increment_visit` must be an atomic read-modify-write so
/// concurrent redirects of one code never lose updates.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new link record.
    /// Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, code: &ShortCode, record: LinkRecord) -> Result<()>;

    /// Atomically bumps the visit counter for a code by one.
    /// Returns `Err(NotFound)` if the code does not exist.
    async fn increment_visit(&self, code: &ShortCode) -> Result<()>;
}
