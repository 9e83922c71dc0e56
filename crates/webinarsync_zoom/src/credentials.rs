// --- File: crates/webinarsync_zoom/src/credentials.rs ---
//! Short-lived API credential for the Zoom REST API (JWT app type).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use webinarsync_config::env_vars::SECRET_MARKER;

use crate::error::ZoomError;

/// Lifetime of a minted credential.
pub const CREDENTIAL_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub iss: String, // API key
    pub exp: i64,    // Unix epoch seconds
}

/// Signs `{iss: api_key, exp: now + 1h}` with HS256 using `secret_key`.
pub fn mint(api_key: &str, secret_key: &str, now: DateTime<Utc>) -> Result<String, ZoomError> {
    let unset = |value: &str| value.trim().is_empty() || value == SECRET_MARKER;
    if unset(api_key) || unset(secret_key) {
        return Err(ZoomError::CredentialError(
            "Zoom api_key and secret_key must be set".to_string(),
        ));
    }

    let claims = Claims {
        iss: api_key.to_string(),
        exp: (now + Duration::seconds(CREDENTIAL_TTL_SECS)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret_key.as_bytes()),
    )
    .map_err(|e| ZoomError::CredentialError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn test_mint_claims() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let token = mint("api-key", "s3cret", now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"s3cret"),
            &validation,
        )
        .unwrap();

        assert_eq!(data.header.alg, Algorithm::HS256);
        assert_eq!(data.claims.iss, "api-key");
        assert_eq!(data.claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn test_mint_is_valid_now() {
        let token = mint("api-key", "s3cret", Utc::now()).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"s3cret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(decoded.is_ok());

        let wrong_secret = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(wrong_secret.is_err());
    }

    #[test]
    fn test_mint_rejects_empty_key() {
        assert!(matches!(
            mint("", "s3cret", Utc::now()),
            Err(ZoomError::CredentialError(_))
        ));
        assert!(matches!(
            mint("api-key", "", Utc::now()),
            Err(ZoomError::CredentialError(_))
        ));
        assert!(matches!(
            mint(SECRET_MARKER, SECRET_MARKER, Utc::now()),
            Err(ZoomError::CredentialError(_))
        ));
    }
}
