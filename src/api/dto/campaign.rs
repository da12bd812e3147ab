//! DTOs for campaign management endpoints.
//!
//! Request bodies use `camelCase` keys (`campaignId`); responses serialize
//! [`Campaign`] as stored.

use crate::domain::entities::Campaign;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a campaign with no links.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "country must be 1-64 characters"))]
    pub country: String,
}

/// Request to append a weighted destination to a campaign.
///
/// URL and weight rules are enforced by the service, so the error messages
/// are the same for every caller.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddLinkRequest {
    #[validate(length(min = 1))]
    pub campaign_id: String,

    pub url: String,

    pub weight: f64,
}

/// Partial update of a campaign's name and/or country.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1))]
    pub campaign_id: String,

    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "country must be 1-64 characters"))]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCampaignRequest {
    #[validate(length(min = 1))]
    pub campaign_id: String,
}

/// Acknowledgement body for mutations that return no resource.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Campaign list wrapper.
#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub total: usize,
    pub items: Vec<Campaign>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_link_request_uses_camel_case() {
        let req: AddLinkRequest = serde_json::from_str(
            r#"{"campaignId":"abc123","url":"https://example.com","weight":12.5}"#,
        )
        .unwrap();

        assert_eq!(req.campaign_id, "abc123");
        assert_eq!(req.weight, 12.5);
    }

    #[test]
    fn test_create_request_validation() {
        let ok = CreateCampaignRequest {
            name: "Spring".to_string(),
            country: "MA".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_name = CreateCampaignRequest {
            name: String::new(),
            country: "MA".to_string(),
        };
        assert!(empty_name.validate().is_err());

        let long_country = CreateCampaignRequest {
            name: "Spring".to_string(),
            country: "x".repeat(65),
        };
        assert!(long_country.validate().is_err());
    }

    #[test]
    fn test_update_request_optional_fields() {
        let req: UpdateCampaignRequest =
            serde_json::from_str(r#"{"campaignId":"abc123","country":"FR"}"#).unwrap();

        assert!(req.name.is_none());
        assert_eq!(req.country.as_deref(), Some("FR"));
        assert!(req.validate().is_ok());

        let blank: UpdateCampaignRequest =
            serde_json::from_str(r#"{"campaignId":"abc123","name":""}"#).unwrap();
        assert!(blank.validate().is_err());
    }
}
