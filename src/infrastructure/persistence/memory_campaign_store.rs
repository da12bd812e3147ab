//! In-memory implementation of the campaign store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Campaign, CampaignPatch, Link};
use crate::domain::repositories::CampaignStore;
use crate::error::AppError;

/// Process-local campaign store backed by a sharded concurrent map.
///
/// Every mutation runs while holding the map's write guard for that one id,
/// so read-modify-write cannot interleave for the same campaign. Different ids
/// hash to different shards and proceed in parallel. No guard is ever held
/// across an `.await`.
///
/// State is lost on restart. Used for development, tests, and single-instance
/// deployments fed by `SEED_DEMO`.
#[derive(Default)]
pub struct InMemoryCampaignStore {
    campaigns: DashMap<String, Campaign>,
}

impl InMemoryCampaignStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given campaigns.
    pub fn with_campaigns(campaigns: impl IntoIterator<Item = Campaign>) -> Self {
        let store = Self::new();
        for campaign in campaigns {
            store.campaigns.insert(campaign.id.clone(), campaign);
        }
        store
    }

    /// Returns the number of stored campaigns.
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    /// Returns `true` if no campaign is stored.
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    fn mutate<F>(&self, id: &str, f: F) -> Result<Campaign, AppError>
    where
        F: FnOnce(&mut Campaign),
    {
        let mut entry = self.campaigns.get_mut(id).ok_or_else(|| not_found(id))?;
        f(entry.value_mut());
        Ok(entry.value().clone())
    }
}

pub(crate) fn not_found(id: &str) -> AppError {
    AppError::not_found("Campaign not found", json!({ "id": id }))
}

pub(crate) fn already_exists(id: &str) -> AppError {
    AppError::conflict("Campaign id already exists", json!({ "id": id }))
}

/// Sorts campaigns oldest first, id as tie-break.
pub(crate) fn sort_for_listing(campaigns: &mut [Campaign]) {
    campaigns.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

#[async_trait]
impl CampaignStore for InMemoryCampaignStore {
    async fn get(&self, id: &str) -> Result<Option<Campaign>, AppError> {
        Ok(self.campaigns.get(id).map(|c| c.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Campaign>, AppError> {
        let mut campaigns: Vec<Campaign> =
            self.campaigns.iter().map(|c| c.value().clone()).collect();
        sort_for_listing(&mut campaigns);
        Ok(campaigns)
    }

    async fn create(&self, campaign: Campaign) -> Result<Campaign, AppError> {
        match self.campaigns.entry(campaign.id.clone()) {
            Entry::Occupied(_) => Err(already_exists(&campaign.id)),
            Entry::Vacant(slot) => {
                debug!(id = %campaign.id, "Inserting campaign");
                slot.insert(campaign.clone());
                Ok(campaign)
            }
        }
    }

    async fn update(&self, id: &str, patch: CampaignPatch) -> Result<Campaign, AppError> {
        self.mutate(id, |c| c.apply(&patch))
    }

    async fn add_link(&self, id: &str, link: Link) -> Result<Campaign, AppError> {
        self.mutate(id, |c| c.links.push(link))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.campaigns
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
