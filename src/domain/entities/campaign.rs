//! Campaign entity: one stable redirect id in front of weighted destinations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A destination URL paired with its relative selection weight.
///
/// Invariant (enforced by [`crate::application::services::CampaignService::add_link`]):
/// `weight` is finite and `>= 0`, `url` is an absolute `http`/`https` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub weight: f64,
}

impl Link {
    pub fn new(url: impl Into<String>, weight: f64) -> Self {
        Self {
            url: url.into(),
            weight,
        }
    }
}

/// A named campaign and its ordered link list.
///
/// Link order is insertion order. It does not affect selection probability,
/// only which link wins the rounding fallback in
/// [`crate::domain::selector::pick`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Creates a campaign with an empty link list.
    pub fn new(id: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            links: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Sum of all link weights.
    pub fn total_weight(&self) -> f64 {
        self.links.iter().map(|l| l.weight).sum()
    }

    /// Returns true if at least one link can be selected.
    pub fn is_resolvable(&self) -> bool {
        self.links.iter().any(|l| l.weight > 0.0)
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: &CampaignPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
    }
}

/// Partial update for an existing campaign.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.country.is_none()
    }
}
