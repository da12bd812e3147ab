//! Storage contract for campaigns.

use crate::domain::entities::{Campaign, CampaignPatch, Link};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface owning the authoritative copy of every campaign.
///
/// # Atomicity
///
/// [`add_link`](Self::add_link) and [`update`](Self::update) are atomic
/// read-modify-write operations with respect to one campaign id. Concurrent
/// `add_link(id, L1)` and `add_link(id, L2)` must both land. Mutations of
/// different ids must not block each other.
///
/// # Visibility
///
/// A successful mutation is visible to every subsequent [`get`](Self::get) and
/// [`list`](Self::list).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryCampaignStore`] - process-local map
/// - [`crate::infrastructure::persistence::FileCampaignStore`] - JSON file on disk
/// - [`crate::infrastructure::persistence::PgCampaignStore`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Finds a campaign by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Campaign))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend failures.
    async fn get(&self, id: &str) -> Result<Option<Campaign>, AppError>;

    /// Lists all campaigns, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend failures.
    async fn list(&self) -> Result<Vec<Campaign>, AppError>;

    /// Stores a new campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Internal`] on backend failures.
    async fn create(&self, campaign: Campaign) -> Result<Campaign, AppError>;

    /// Applies a name/country patch and returns the updated campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no campaign has this id.
    /// Returns [`AppError::Internal`] on backend failures.
    async fn update(&self, id: &str, patch: CampaignPatch) -> Result<Campaign, AppError>;

    /// Appends a link and returns the updated campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no campaign has this id.
    /// Returns [`AppError::Internal`] on backend failures.
    async fn add_link(&self, id: &str, link: Link) -> Result<Campaign, AppError>;

    /// Removes a campaign permanently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no campaign has this id.
    /// Returns [`AppError::Internal`] on backend failures.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
