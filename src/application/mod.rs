//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::CampaignStore`] trait
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::campaign_service::CampaignService`] - Campaign management and redirect resolution

pub mod services;
