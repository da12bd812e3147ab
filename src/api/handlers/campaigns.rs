//! Handlers for campaign management endpoints.
//!
//! Mutations use `POST` with the campaign id in the body, matching the
//! form-style admin surface:
//!
//! - `POST /api/campaigns`        - create
//! - `POST /api/campaigns/links`  - append a link
//! - `POST /api/campaigns/update` - rename / change country
//! - `POST /api/campaigns/delete` - hard delete

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::campaign::{
    AddLinkRequest, CampaignListResponse, CreateCampaignRequest, DeleteCampaignRequest,
    OkResponse, UpdateCampaignRequest,
};
use crate::domain::entities::Campaign;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a campaign with an empty link list.
///
/// # Request Body
///
/// ```json
/// { "name": "Spring promo", "country": "MA" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    payload.validate()?;

    let campaign = state
        .campaign_service
        .create_campaign(payload.name, payload.country)
        .await?;

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Lists all campaigns, oldest first.
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
) -> Result<Json<CampaignListResponse>, AppError> {
    let items = state.campaign_service.list_campaigns().await?;

    Ok(Json(CampaignListResponse {
        total: items.len(),
        items,
    }))
}

/// Returns a single campaign with its links.
///
/// # Errors
///
/// Returns 404 Not Found if the campaign does not exist.
pub async fn get_campaign_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Campaign>, AppError> {
    let campaign = state.campaign_service.get_campaign(&id).await?;
    Ok(Json(campaign))
}

/// Appends a weighted link to a campaign.
///
/// # Request Body
///
/// ```json
/// { "campaignId": "abc123", "url": "https://www.bing.com", "weight": 20 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or weight.
/// Returns 404 Not Found if the campaign does not exist.
pub async fn add_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<AddLinkRequest>,
) -> Result<Json<OkResponse>, AppError> {
    payload.validate()?;

    state
        .campaign_service
        .add_link(&payload.campaign_id, &payload.url, payload.weight)
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// Updates a campaign's name and/or country; absent fields are kept.
///
/// # Errors
///
/// Returns 404 Not Found if the campaign does not exist.
pub async fn update_campaign_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, AppError> {
    payload.validate()?;

    let campaign = state
        .campaign_service
        .update_campaign(&payload.campaign_id, payload.name, payload.country)
        .await?;

    Ok(Json(campaign))
}

/// Deletes a campaign permanently.
///
/// # Errors
///
/// Returns 404 Not Found if the campaign does not exist.
pub async fn delete_campaign_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeleteCampaignRequest>,
) -> Result<Json<OkResponse>, AppError> {
    payload.validate()?;

    state
        .campaign_service
        .delete_campaign(&payload.campaign_id)
        .await?;

    Ok(Json(OkResponse::ok()))
}
