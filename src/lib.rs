//! # Traffic Splitter
//!
//! Routes a stable campaign link to one of several destinations, chosen at
//! random in proportion to configured weights, and forwards the incoming
//! query string to the chosen destination.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the store trait, weighted selection, URL composition
//! - **Application Layer** ([`application`]) - Validation, id assignment, redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory, JSON-file and PostgreSQL stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # In-memory store with the demo campaign
//! SEED_DEMO=true cargo run
//!
//! curl -i "http://localhost:3000/r/abc123?ref=MA576"
//! # HTTP/1.1 302 Found
//! # location: https://duckduckgo.com?ref=MA576
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::CampaignService;
    pub use crate::domain::entities::{Campaign, CampaignPatch, Link};
    pub use crate::domain::repositories::CampaignStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{
        FileCampaignStore, InMemoryCampaignStore, PgCampaignStore,
    };
    pub use crate::state::AppState;
}
