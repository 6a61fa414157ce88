//! Bearer-token helpers: extraction from the Authorization header, and
//! HS256 signing/verification delegated to `jsonwebtoken`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime, in seconds.
pub const DEFAULT_DURATION: u64 = 600;

static BEARER_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^bearer\s+(\S+)").expect("bearer pattern compiles"));

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<u64>,
}

fn require_non_empty(label: &'static str, value: &str) -> Result<(), TokenError> {
    if value.is_empty() {
        return Err(TokenError::EmptyArgument(label));
    }
    Ok(())
}

fn now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// For the common `Authorization: bearer <token>` case, extract the token
/// from the header value. Returns `Ok(None)` when the header holds
/// something else.
pub fn extract_bearer_token(header_value: &str) -> Result<Option<String>, TokenError> {
    require_non_empty("header_value", header_value)?;
    Ok(BEARER_RX
        .captures(header_value)
        .map(|caps| caps[1].to_string()))
}

/// Check a token's signature and claims, returning the subject (`sub`
/// claim) or `Ok(None)` for any token that fails verification. Expiry is
/// honored when the token carries an `exp` claim.
pub fn validate_token(token: &str, secret: &str) -> Result<Option<String>, TokenError> {
    require_non_empty("token", token)?;
    require_non_empty("secret", secret)?;

    let mut validation = Validation::new(ALGORITHM);
    // exp is optional; non-expiring tokens are legitimate
    validation.set_required_spec_claims::<&str>(&[]);
    validation.leeway = 1;

    let key = DecodingKey::from_secret(secret.as_bytes());
    match jsonwebtoken::decode::<Claims>(token, &key, &validation) {
        Ok(data) => Ok(Some(data.claims.sub)),
        Err(err) => {
            log::debug!("token rejected: {err}");
            Ok(None)
        }
    }
}

/// Create a signed token for `sub` that expires after `duration` seconds
/// (`None` for a non-expiring token).
pub fn create_timed_token(
    sub: &str,
    secret: &str,
    duration: Option<u64>,
) -> Result<String, TokenError> {
    require_non_empty("sub", sub)?;
    require_non_empty("secret", secret)?;

    let claims = Claims {
        sub: sub.to_string(),
        exp: duration.map(|d| now() + d),
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &key)?)
}
