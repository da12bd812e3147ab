//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::CampaignService;
use crate::domain::repositories::CampaignStore;

/// Shared state for all request handlers.
///
/// Cloned per request; the service and its store sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub campaign_service: Arc<CampaignService<dyn CampaignStore>>,
}

impl AppState {
    /// Builds the state around an already-initialised store backend.
    pub fn new(store: Arc<dyn CampaignStore>) -> Self {
        Self {
            campaign_service: Arc::new(CampaignService::new(store)),
        }
    }

    /// Wraps a preconfigured service, e.g. one with a deterministic id generator.
    pub fn from_service(campaign_service: CampaignService<dyn CampaignStore>) -> Self {
        Self {
            campaign_service: Arc::new(campaign_service),
        }
    }
}
