//! Handler for campaign redirects.

use axum::{
    extract::{Path, RawQuery, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a campaign id to one of its weighted destinations.
///
/// # Endpoint
///
/// `GET /r/{id}`
///
/// # Request Flow
///
/// 1. Load the campaign from the store
/// 2. Pick a link at random in proportion to its weight
/// 3. Append the incoming query string verbatim to the chosen URL
/// 4. Return 302 Found with the composed `Location`
///
/// ```text
/// GET /r/abc123?ref=MA576
/// 302 Location: https://www.bing.com?ref=MA576
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the campaign does not exist or has no links.
/// Returns 400 Bad Request if every link has weight zero.
pub async fn redirect_handler(
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .campaign_service
        .resolve(&id, query.as_deref().unwrap_or(""))
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
