use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ShortenError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid expiration: {0}")]
    InvalidExpiration(String),
    #[error("gave up generating a unique short code after {0} attempts")]
    GenerationExhausted(usize),
    #[error("storage error: {0}")]
    Storage(String),
}
