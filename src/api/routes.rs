//! Campaign management API routes, nested under `/api`.

use crate::api::handlers::{
    add_link_handler, create_campaign_handler, delete_campaign_handler, get_campaign_handler,
    list_campaigns_handler, update_campaign_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Campaign administration routes.
///
/// # Endpoints
///
/// - `GET  /campaigns`        - List campaigns
/// - `POST /campaigns`        - Create a campaign
/// - `GET  /campaigns/{id}`   - Show one campaign
/// - `POST /campaigns/links`  - Append a weighted link
/// - `POST /campaigns/update` - Change name and/or country
/// - `POST /campaigns/delete` - Delete a campaign
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(list_campaigns_handler).post(create_campaign_handler),
        )
        .route("/campaigns/links", post(add_link_handler))
        .route("/campaigns/update", post(update_campaign_handler))
        .route("/campaigns/delete", post(delete_campaign_handler))
        .route("/campaigns/{id}", get(get_campaign_handler))
}
