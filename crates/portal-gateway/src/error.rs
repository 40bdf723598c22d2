use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use portal_redirector::RedirectError;
use portal_shortener::ShortenError;
use portal_stats::StatsError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shorten(#[from] ShortenError),
    #[error(transparent)]
    Redirect(#[from] RedirectError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    /// Inbound path segment that cannot be a short code at all.
    #[error("invalid short code in request path")]
    InvalidCode,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Shorten(err @ ShortenError::InvalidUrl(_))
            | AppError::Shorten(err @ ShortenError::InvalidExpiration(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Shorten(err) => {
                error!(error = %err, "shorten request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to create short link".to_string(),
                )
            }
            AppError::Redirect(RedirectError::NotFound(_)) | AppError::InvalidCode => {
                (StatusCode::NOT_FOUND, "short link not found".to_string())
            }
            AppError::Redirect(RedirectError::Expired(_)) => {
                (StatusCode::GONE, "short link has expired".to_string())
            }
            AppError::Redirect(err) => {
                error!(error = %err, "redirect request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to resolve short link".to_string(),
                )
            }
            AppError::Stats(StatsError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            AppError::Stats(StatsError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "short link not found".to_string())
            }
            AppError::Stats(err) => {
                error!(error = %err, "stats request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to load link stats".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.status_and_message().0
    }

    #[test]
    fn shorten_errors_map_to_statuses() {
        assert_eq!(
            status_of(ShortenError::InvalidUrl("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShortenError::InvalidExpiration("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShortenError::GenerationExhausted(5).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn redirect_errors_map_to_statuses() {
        assert_eq!(
            status_of(RedirectError::NotFound("x".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RedirectError::Expired("x".into()).into()),
            StatusCode::GONE
        );
    }

    #[test]
    fn stats_errors_map_to_statuses() {
        assert_eq!(
            status_of(StatsError::Unauthorized.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(StatsError::NotFound("x".into()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let (_, message) =
            AppError::Shorten(ShortenError::Storage("dsn secrets".into())).status_and_message();
        assert!(!message.contains("dsn secrets"));
    }
}
