//! Service-account authentication.
//!
//! A service account signs a short-lived JWT with its private key and trades
//! it at the key's token endpoint for a bearer token.

use crate::{Result, ServiceAccountKey, SheetsError};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scopes requested for template building.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// JWT claims of a service-account assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Service-account e-mail
    pub iss: String,
    /// Space separated scopes
    pub scope: String,
    /// Token endpoint
    pub aud: String,
    /// Issued at (seconds since the epoch)
    pub iat: i64,
    /// Expiry (seconds since the epoch)
    pub exp: i64,
}

impl Claims {
    /// Claims issued at `iat` for the template scopes.
    pub fn new(key: &ServiceAccountKey, iat: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: SCOPES.join(" "),
            aud: key.token_uri.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }
}

/// Signs an RS256 assertion for the key.
pub fn signed_assertion(key: &ServiceAccountKey, iat: i64) -> Result<String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &Claims::new(key, iat),
        &encoding_key,
    )?;
    Ok(token)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges a signed assertion for a bearer token.
pub async fn fetch_access_token(http: &reqwest::Client, key: &ServiceAccountKey) -> Result<String> {
    let assertion = signed_assertion(key, Utc::now().timestamp())?;
    debug!("Requesting access token for {}", key.client_email);

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();
        return Err(SheetsError::Auth(format!("{}: {}", status, error_body)));
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
