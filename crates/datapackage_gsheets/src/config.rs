//! Configuration for Google API access.

use crate::SheetsError;
use serde::{Deserialize, Serialize};

/// Environment variable holding the service-account JSON key.
pub const SERVICE_ACCOUNT_KEY_VAR: &str = "GOOGLE_CLOUD_SERVICE_ACCOUNT_KEY";

/// Environment variable naming the account new spreadsheets are shared with.
pub const SHARE_ACCOUNT_VAR: &str = "GOOGLE_ACCOUNT";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Google credentials and sharing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleConfig {
    /// Service-account JSON key
    pub service_account_key: Option<String>,

    /// Account (e-mail) granted writer access to new spreadsheets
    pub share_with: Option<String>,
}

impl GoogleConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Empty variables count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());
        Self {
            service_account_key: non_empty(SERVICE_ACCOUNT_KEY_VAR),
            share_with: non_empty(SHARE_ACCOUNT_VAR),
        }
    }

    /// Sets the service-account key.
    pub fn with_service_account_key(mut self, key: impl Into<String>) -> Self {
        self.service_account_key = Some(key.into());
        self
    }

    /// Sets the share account.
    pub fn with_share_with(mut self, account: impl Into<String>) -> Self {
        self.share_with = Some(account.into());
        self
    }

    /// Parses the service-account key.
    ///
    /// Returns [`SheetsError::MissingCredential`] when no key is configured.
    pub fn service_account_key(&self) -> Result<ServiceAccountKey, SheetsError> {
        let raw = self
            .service_account_key
            .as_deref()
            .ok_or(SheetsError::MissingCredential)?;
        ServiceAccountKey::from_json(raw)
    }
}

/// The fields of a service-account JSON key used for authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    /// Service-account e-mail, the JWT issuer
    pub client_email: String,

    /// PEM-encoded RSA private key
    pub private_key: String,

    /// OAuth token endpoint
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parses a service-account JSON key.
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        serde_json::from_str(raw).map_err(|e| SheetsError::InvalidCredential(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = GoogleConfig::from_lookup(lookup(&[
            (SERVICE_ACCOUNT_KEY_VAR, "{}"),
            (SHARE_ACCOUNT_VAR, "someone@example.com"),
        ]));

        assert_eq!(config.service_account_key.as_deref(), Some("{}"));
        assert_eq!(config.share_with.as_deref(), Some("someone@example.com"));
    }

    #[test]
    fn test_empty_variables_are_unset() {
        let config = GoogleConfig::from_lookup(lookup(&[
            (SERVICE_ACCOUNT_KEY_VAR, ""),
            (SHARE_ACCOUNT_VAR, "  "),
        ]));

        assert_eq!(config, GoogleConfig::default());
    }

    #[test]
    fn test_missing_key() {
        let result = GoogleConfig::default().service_account_key();
        assert!(matches!(result, Err(SheetsError::MissingCredential)));
    }

    #[test]
    fn test_parse_key() {
        let config = GoogleConfig::default().with_service_account_key(
            r#"{"type": "service_account", "client_email": "a@b.iam.gserviceaccount.com", "private_key": "pem"}"#,
        );

        let key = config.service_account_key().unwrap();
        assert_eq!(key.client_email, "a@b.iam.gserviceaccount.com");
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_invalid_key() {
        let config = GoogleConfig::default().with_service_account_key("not json");
        assert!(matches!(
            config.service_account_key(),
            Err(SheetsError::InvalidCredential(_))
        ));
    }
}
