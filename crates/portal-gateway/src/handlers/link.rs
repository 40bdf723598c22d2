use crate::error::{AppError, Result};
use crate::model::{CreateLinkRequest, CreateLinkResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use portal_core::ShortCode;
use portal_shortener::{ExpirationPolicy, ShortenParams};
use portal_stats::StatsView;
use std::time::Duration;

pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>)> {
    let expiration = match request.ttl_seconds {
        None => state.default_expiration(),
        Some(0) => ExpirationPolicy::Never,
        Some(seconds) => ExpirationPolicy::AfterDuration(Duration::from_secs(seconds)),
    };

    let created = state
        .shortener()
        .shorten(ShortenParams {
            original_url: request.original_url,
            expiration,
        })
        .await?;

    let response = CreateLinkResponse {
        short_url: created.short_code.to_url(state.base_url()),
        short_code: created.short_code.to_string(),
        original_url: created.record.original_url,
        created_at: created.record.created_at,
        expires_at: created.record.expires_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(&short_code).map_err(|_| AppError::InvalidCode)?;
    let original_url = state.redirector().resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
}

pub async fn stats_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsView>> {
    let caller = state.authenticator().authenticate(&headers);
    let code = ShortCode::new(&short_code).map_err(|_| AppError::InvalidCode)?;
    let view = state.stats().report(&code, &caller).await?;

    Ok(Json(view))
}
