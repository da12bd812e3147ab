//! Campaign store implementations.
//!
//! All three satisfy the [`crate::domain::repositories::CampaignStore`]
//! contract, including per-id atomic `add_link`/`update`.
//!
//! # Backends
//!
//! - [`InMemoryCampaignStore`] - `DashMap`, lost on restart
//! - [`FileCampaignStore`] - JSON array on disk, atomic rename on every write
//! - [`PgCampaignStore`] - PostgreSQL via SQLx, links as `JSONB`

pub mod file_campaign_store;
pub mod memory_campaign_store;
pub mod pg_campaign_store;

pub use file_campaign_store::FileCampaignStore;
pub use memory_campaign_store::InMemoryCampaignStore;
pub use pg_campaign_store::PgCampaignStore;
