//! Validation helpers for DTOs.

use validator::{ValidateUrl, ValidationError};

/// Validates that a voice identifier contains only ASCII letters and digits.
///
/// An empty identifier is accepted and selects the speech service's default voice.
///
/// # Examples
///
/// ```ignore
/// validate_voice_id("JBFqnCBsd6RMkjVDRZzb") // Ok
/// validate_voice_id("")                     // Ok - default voice
/// validate_voice_id("../voices")            // Err - path characters
/// ```
pub fn validate_voice_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > 64 {
        let mut err = ValidationError::new("voice_id_length");
        err.message =
            Some(format!("Voice ID must be at most 64 characters (got {})", id.len()).into());
        return Err(err);
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("voice_id_format");
        err.message = Some("Voice ID must contain only ASCII letters and digits".into());
        return Err(err);
    }

    Ok(())
}

/// Validates a tournament page address.
///
/// Blank input is accepted: the board treats it as "nothing to fetch".
pub fn validate_scrape_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() || url.validate_url() {
        return Ok(());
    }

    let mut err = ValidationError::new("url");
    err.message = Some("Tournament URL must be an absolute URL".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_voice_id_valid() {
        assert!(validate_voice_id("JBFqnCBsd6RMkjVDRZzb").is_ok());
        assert!(validate_voice_id("").is_ok());
    }

    #[test]
    fn test_validate_voice_id_invalid_length() {
        assert!(validate_voice_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_voice_id_invalid_format() {
        assert!(validate_voice_id("../voices").is_err());
        assert!(validate_voice_id("voice id").is_err());
        assert!(validate_voice_id("stem-01").is_err());
    }

    #[test]
    fn test_validate_scrape_url() {
        assert!(validate_scrape_url("https://www.toernooi.nl/sport/matches.aspx?id=1").is_ok());
        assert!(validate_scrape_url("").is_ok());
        assert!(validate_scrape_url("   ").is_ok());
        assert!(validate_scrape_url("not a url").is_err());
    }
}
