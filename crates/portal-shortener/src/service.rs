use crate::error::ShortenError;
use crate::shortener::{ExpirationPolicy, ShortenParams, ShortenedLink, Shortener};
use async_trait::async_trait;
use jiff::Timestamp;
use portal_core::{LinkRecord, Repository, StorageError};
use portal_generator::Generator;
use std::sync::Arc;
use tracing::debug;

/// How many candidate codes the service draws before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL validation
/// - Expiration policy conversion
/// - The bounded collision-retry loop
///
/// Candidate uniqueness is enforced by the store, not pre-checked here:
/// the insert either wins or reports `Conflict`, and a conflict triggers a
/// fresh draw. The loop is capped so a degenerate code space surfaces as
/// `GenerationExhausted` instead of spinning.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with the default retry cap.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the retry cap. Values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Validates that the URL is an absolute http(s) URL.
    fn validate_url(url: &str) -> Result<(), ShortenError> {
        if url.is_empty() {
            return Err(ShortenError::InvalidUrl("URL cannot be empty".to_string()));
        }

        if url.len() > 2048 {
            return Err(ShortenError::InvalidUrl(format!(
                "URL exceeds 2048 characters: {} given",
                url.len()
            )));
        }

        // Basic validation: check for scheme and host presence
        let parts: Vec<&str> = url.split("://").collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(ShortenError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = parts[0].to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }

    /// Converts the expiration policy into a concrete timestamp.
    ///
    /// Whatever the policy, the resulting timestamp must land strictly after
    /// `created_at`.
    fn expires_at(
        created_at: Timestamp,
        expiration: &ExpirationPolicy,
    ) -> Result<Option<Timestamp>, ShortenError> {
        match expiration {
            ExpirationPolicy::Never => Ok(None),
            ExpirationPolicy::AfterDuration(duration) => {
                let duration = jiff::SignedDuration::try_from(*duration)
                    .map_err(|e| ShortenError::InvalidExpiration(format!("{e}")))?;
                if duration.is_zero() || duration.is_negative() {
                    return Err(ShortenError::InvalidExpiration(
                        "expiration duration must be positive".to_string(),
                    ));
                }
                let expires_at = created_at
                    .checked_add(duration)
                    .map_err(|e| ShortenError::InvalidExpiration(format!("{e}")))?;
                Ok(Some(expires_at))
            }
            ExpirationPolicy::AtTimestamp(timestamp) => {
                if *timestamp <= created_at {
                    return Err(ShortenError::InvalidExpiration(format!(
                        "expiration must be after creation: {}",
                        timestamp
                    )));
                }
                Ok(Some(*timestamp))
            }
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenedLink, ShortenError> {
        Self::validate_url(&params.original_url)?;

        let created_at = Timestamp::now();
        let expires_at = Self::expires_at(created_at, &params.expiration)?;

        for attempt in 1..=self.max_attempts {
            let short_code = self.generator.generate();
            let record = LinkRecord {
                original_url: params.original_url.clone(),
                created_at,
                expires_at,
                visit_count: 0,
            };

            match self.repository.insert(&short_code, record.clone()).await {
                Ok(()) => {
                    debug!(code = %short_code, attempt, "reserved short code");
                    return Ok(ShortenedLink { short_code, record });
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %short_code, attempt, "candidate collided, redrawing");
                }
                Err(err) => return Err(ShortenError::Storage(err.to_string())),
            }
        }

        Err(ShortenError::GenerationExhausted(self.max_attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;
    use portal_core::{ReadRepository, Repository, ShortCode};
    use portal_generator::SequentialGenerator;
    use portal_storage::InMemoryRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Always draws the same code; every insert after the first collides.
    struct FixedGenerator {
        draws: AtomicUsize,
    }

    impl FixedGenerator {
        fn new() -> Self {
            Self {
                draws: AtomicUsize::new(0),
            }
        }
    }

    impl Generator for FixedGenerator {
        fn generate(&self) -> ShortCode {
            self.draws.fetch_add(1, Ordering::SeqCst);
            ShortCode::new_unchecked("stuck000")
        }
    }

    fn test_service() -> ShortenerService<InMemoryRepository, SequentialGenerator> {
        ShortenerService::new(InMemoryRepository::new(), SequentialGenerator::with_prefix("pt"))
    }

    fn params(url: &str) -> ShortenParams {
        ShortenParams {
            original_url: url.to_string(),
            expiration: ExpirationPolicy::Never,
        }
    }

    #[tokio::test]
    async fn shorten_reserves_a_code_and_persists() {
        let service = test_service();

        let created = service.shorten(params("https://example.com")).await.unwrap();
        assert_eq!(created.short_code.as_str(), "pt000000");
        assert_eq!(created.record.original_url, "https://example.com");
        assert_eq!(created.record.visit_count, 0);
        assert_eq!(created.record.expires_at, None);
    }

    #[tokio::test]
    async fn shorten_with_invalid_url_fails() {
        let service = test_service();

        for bad in ["", "not-a-valid-url", "ftp://example.com", "https://"] {
            let err = service.shorten(params(bad)).await.unwrap_err();
            assert!(matches!(err, ShortenError::InvalidUrl(_)), "url: {bad}");
        }
    }

    #[tokio::test]
    async fn shorten_rejects_oversized_url() {
        let service = test_service();
        let long = format!("https://example.com/{}", "a".repeat(2048));

        let err = service.shorten(params(&long)).await.unwrap_err();
        assert!(matches!(err, ShortenError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn shorten_applies_duration_expiry() {
        let service = test_service();

        let created = service
            .shorten(ShortenParams {
                original_url: "https://example.com".to_string(),
                expiration: ExpirationPolicy::AfterDuration(Duration::from_secs(3600)),
            })
            .await
            .unwrap();

        let expires_at = created.record.expires_at.expect("expiry set");
        assert_eq!(
            expires_at,
            created.record.created_at + SignedDuration::from_hours(1)
        );
    }

    #[tokio::test]
    async fn shorten_rejects_zero_duration_expiry() {
        let service = test_service();

        let err = service
            .shorten(ShortenParams {
                original_url: "https://example.com".to_string(),
                expiration: ExpirationPolicy::AfterDuration(Duration::ZERO),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenError::InvalidExpiration(_)));
    }

    #[tokio::test]
    async fn shorten_rejects_past_timestamp_expiry() {
        let service = test_service();
        let past = Timestamp::now() - SignedDuration::from_hours(1);

        let err = service
            .shorten(ShortenParams {
                original_url: "https://example.com".to_string(),
                expiration: ExpirationPolicy::AtTimestamp(past),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenError::InvalidExpiration(_)));
    }

    #[tokio::test]
    async fn collision_triggers_redraw_until_a_code_wins() {
        let repo = InMemoryRepository::new();
        // Occupy the first two codes the generator will draw.
        for taken in ["pt000000", "pt000001"] {
            repo.insert(
                &ShortCode::new_unchecked(taken),
                LinkRecord::new("https://taken.example", Timestamp::now()),
            )
            .await
            .unwrap();
        }

        let service = ShortenerService::new(repo, SequentialGenerator::with_prefix("pt"));
        let created = service.shorten(params("https://example.com")).await.unwrap();

        assert_eq!(created.short_code.as_str(), "pt000002");
    }

    #[tokio::test]
    async fn exhausted_retries_surface_after_the_cap() {
        let repo = InMemoryRepository::new();
        repo.insert(
            &ShortCode::new_unchecked("stuck000"),
            LinkRecord::new("https://taken.example", Timestamp::now()),
        )
        .await
        .unwrap();

        let generator = FixedGenerator::new();
        let service = ShortenerService::new(repo, generator).with_max_attempts(5);

        let err = service.shorten(params("https://example.com")).await.unwrap_err();
        assert!(matches!(err, ShortenError::GenerationExhausted(5)));
        assert_eq!(service.generator.draws.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn shortened_url_resolves_back_through_the_store() {
        let service = test_service();

        let created = service.shorten(params("https://www.example.com")).await.unwrap();
        let stored = service
            .repository
            .get(&created.short_code)
            .await
            .unwrap()
            .expect("record persisted");

        assert_eq!(stored.original_url, "https://www.example.com");
    }
}
