//! Destination URL validation.
//!
//! Destinations are stored exactly as entered. Unlike a shortener there is no
//! normalisation step: affiliate URLs often carry placeholders and parameter
//! order that the network expects verbatim. We only check that the string is
//! an absolute `http`/`https` URL with a host.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is a usable redirect destination.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparsable or relative URLs,
/// and for input containing whitespace or control characters (the parser would
/// silently drop tabs and newlines, but the raw string is what gets stored and
/// sent back in `Location`).
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// such as `javascript:`, `data:` or `ftp:`.
/// Returns [`UrlValidationError::MissingHost`] if no host is present.
pub fn validate_destination(input: &str) -> Result<(), UrlValidationError> {
    if input.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(UrlValidationError::InvalidFormat(
            "contains whitespace or control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_destination("http://example.com").is_ok());
        assert!(validate_destination("https://example.com/path?x=1").is_ok());
        assert!(validate_destination("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn test_accepts_tracking_placeholders() {
        assert!(validate_destination("https://offer.example/?sub1={clickid}&sub2={zone}").is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            validate_destination("example.com"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_destination("/r/abc"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_destination(""),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_whitespace_and_control_characters() {
        for input in [
            "https://example.com/\nx",
            "https://exa\tmple.com",
            "https://example.com/a b",
            " https://example.com",
            "https://example.com/\r",
            "https://example.com/\u{7f}",
        ] {
            assert!(
                matches!(
                    validate_destination(input),
                    Err(UrlValidationError::InvalidFormat(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_other_protocols() {
        for input in [
            "ftp://example.com/file.txt",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:test@example.com",
            "file:///etc/passwd",
        ] {
            assert!(
                matches!(
                    validate_destination(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }
}
