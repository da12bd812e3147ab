//! Repository trait definitions for the domain layer.
//!
//! The domain only knows the [`CampaignStore`] contract. Concrete backends
//! live in `crate::infrastructure::persistence` and are chosen at startup
//! from configuration.
//!
//! # Testing
//!
//! A `MockCampaignStore` is generated via `mockall` for unit tests, and
//! `tests/store_*.rs` run the shared contract against each real backend.

pub mod campaign_store;

pub use campaign_store::CampaignStore;

#[cfg(test)]
pub use campaign_store::MockCampaignStore;
