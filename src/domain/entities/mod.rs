//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. The only behavior they carry is
//! derived state (total weight, resolvability) and applying a patch.
//!
//! # Entity Types
//!
//! - [`Campaign`] - A stable redirect id with an ordered list of links
//! - [`Link`] - A destination URL and its relative weight
//! - [`CampaignPatch`] - Partial update of a campaign's name/country

pub mod campaign;

pub use campaign::{Campaign, CampaignPatch, Link};
