//! Campaign id generation.
//!
//! Ids are random, URL-safe and short enough to put in a printed link.
//! Collisions are handled by the caller
//! ([`crate::application::services::CampaignService::create_campaign`]
//! retries on [`crate::error::AppError::Conflict`]).

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const ID_LENGTH_BYTES: usize = 6;

/// Generates a random 8-character campaign id.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding. 48 bits of entropy keep collisions negligible for any
/// realistic number of campaigns.
///
/// # Errors
///
/// Returns the underlying error if the system random number generator fails.
pub fn generate_campaign_id() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
