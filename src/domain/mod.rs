//! Domain layer: entities, the store contract and the two pure algorithms.
//!
//! # Architecture
//!
//! - [`entities`] - Campaign and link data structures
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//! - [`selector`] - Weighted-random link selection
//! - [`composer`] - Query-string passthrough onto the chosen destination
//!
//! # Redirect Flow
//!
//! 1. HTTP handler extracts the campaign id and raw query string
//! 2. [`crate::application::services::CampaignService::resolve`] loads the campaign
//! 3. [`selector::pick`] chooses a link by weight
//! 4. [`composer::compose`] appends the query string
//! 5. Handler answers `302 Found` with the composed `Location`

pub mod composer;
pub mod entities;
pub mod repositories;
pub mod selector;
