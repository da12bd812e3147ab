//! Campaign management and redirect resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::composer::compose;
use crate::domain::entities::{Campaign, CampaignPatch, Link};
use crate::domain::repositories::CampaignStore;
use crate::domain::selector::{RandomSource, pick};
use crate::error::AppError;
use crate::utils::id_generator::generate_campaign_id;
use crate::utils::url_validator::validate_destination;

/// Produces candidate campaign ids.
pub type IdGenerator = Arc<dyn Fn() -> Result<String, AppError> + Send + Sync>;

/// Maximum id generation attempts before giving up on create.
const MAX_ID_ATTEMPTS: usize = 10;

/// Service orchestrating validation, id assignment, selection and composition.
///
/// Holds no campaign state of its own: every call goes through the store.
pub struct CampaignService<S: CampaignStore + ?Sized> {
    store: Arc<S>,
    id_generator: IdGenerator,
}

impl<S: CampaignStore + ?Sized> CampaignService<S> {
    /// Creates a service with the default random id generator.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_id_generator(
            store,
            Arc::new(|| {
                generate_campaign_id().map_err(|e| {
                    AppError::internal(
                        "Failed to generate campaign id",
                        json!({ "reason": e.to_string() }),
                    )
                })
            }),
        )
    }

    /// Creates a service with a custom id generator.
    pub fn with_id_generator(store: Arc<S>, id_generator: IdGenerator) -> Self {
        Self {
            store,
            id_generator,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Creates a campaign with an empty link list.
    ///
    /// A fresh id is generated for each attempt. If the store reports the id
    /// as taken, a new one is drawn, up to 10 times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if every attempt collided.
    /// Returns [`AppError::Internal`] on id generation or store failures.
    pub async fn create_campaign(
        &self,
        name: String,
        country: String,
    ) -> Result<Campaign, AppError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = (self.id_generator)()?;
            let campaign = Campaign::new(id, name.clone(), country.clone());

            match self.store.create(campaign).await {
                Ok(created) => {
                    info!(id = %created.id, name = %created.name, "Campaign created");
                    return Ok(created);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Campaign id collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(
            "Failed to generate unique campaign id",
            json!({ "reason": "Too many collisions", "attempts": MAX_ID_ATTEMPTS }),
        ))
    }

    /// Validates and appends a link to a campaign.
    ///
    /// The URL is stored exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with message `invalid url` or
    /// `invalid weight` before touching the store.
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn add_link(&self, id: &str, url: &str, weight: f64) -> Result<Campaign, AppError> {
        validate_destination(url).map_err(|e| {
            AppError::bad_request("invalid url", json!({ "url": url, "reason": e.to_string() }))
        })?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::bad_request(
                "invalid weight",
                json!({ "weight": weight.to_string(), "hint": "must be a finite number >= 0" }),
            ));
        }

        let campaign = self.store.add_link(id, Link::new(url, weight)).await?;
        info!(id, url, weight, links = campaign.links.len(), "Link added");
        Ok(campaign)
    }

    /// Updates a campaign's name and/or country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn update_campaign(
        &self,
        id: &str,
        name: Option<String>,
        country: Option<String>,
    ) -> Result<Campaign, AppError> {
        let campaign = self.store.update(id, CampaignPatch { name, country }).await?;
        info!(id, "Campaign updated");
        Ok(campaign)
    }

    /// Deletes a campaign permanently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn delete_campaign(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id).await?;
        info!(id, "Campaign deleted");
        Ok(())
    }

    /// Retrieves a campaign by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn get_campaign(&self, id: &str) -> Result<Campaign, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({ "id": id })))
    }

    /// Lists all campaigns, oldest first.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, AppError> {
        self.store.list().await
    }

    /// Resolves a campaign to its final redirect URL using a thread-local RNG.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_with`].
    pub async fn resolve(&self, id: &str, incoming_query: &str) -> Result<String, AppError> {
        let campaign = self.load_resolvable(id).await?;

        let target = {
            let mut rng = rand::rng();
            pick(&campaign.links, &mut rng)?.to_string()
        };

        Ok(self.finish(id, &target, incoming_query))
    }

    /// Resolves a campaign to its final redirect URL with an injected random source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist or has no links.
    /// Returns [`AppError::Validation`] if every link weight is zero.
    pub async fn resolve_with<R>(
        &self,
        id: &str,
        incoming_query: &str,
        rng: &mut R,
    ) -> Result<String, AppError>
    where
        R: RandomSource + Send + ?Sized,
    {
        let campaign = self.load_resolvable(id).await?;
        let target = pick(&campaign.links, rng)?;

        Ok(self.finish(id, target, incoming_query))
    }

    async fn load_resolvable(&self, id: &str) -> Result<Campaign, AppError> {
        let campaign = self.get_campaign(id).await?;

        if campaign.links.is_empty() {
            return Err(AppError::not_found("no links", json!({ "id": id })));
        }

        if !campaign.is_resolvable() {
            return Err(AppError::bad_request("all weights zero", json!({ "id": id })));
        }

        Ok(campaign)
    }

    fn finish(&self, id: &str, target: &str, incoming_query: &str) -> String {
        let final_url = compose(target, incoming_query);
        debug!(id, target, final_url = %final_url, "Campaign resolved");
        final_url
    }
}
