// Azure Active Directory authentication for ARM Wizards
//
// This module acquires bearer tokens for the management plane through the
// OAuth2 client-credentials flow and caches them until they near expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::types::AzureConfig;
use crate::arm::ArmError;

/// Seconds of remaining validity below which a cached token is replaced
const EXPIRY_SLACK_SECONDS: i64 = 300;

/// A bearer token accepted by the management plane
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    /// The raw bearer token
    pub token: String,
    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if the token expires within the given duration
    pub fn expires_within(&self, seconds: i64) -> bool {
        Utc::now() + Duration::seconds(seconds) >= self.expires_at
    }
}

/// An opaque source of management-plane bearer tokens.
///
/// The wizard layer never sees credentials directly; it holds a handle to
/// whatever can produce a token.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Produce a token accepted by the management plane
    async fn token(&self) -> Result<AccessToken, ArmError>;
}

/// Client-credentials flow against Azure Active Directory
pub struct ClientSecretCredential {
    tenant_id: String,
    client_id: String,
    client_secret: String,
    authority: String,
    scope: String,
    http: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

/// Token endpoint response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl ClientSecretCredential {
    /// Create a credential from service-principal configuration
    pub fn new(config: &AzureConfig) -> Self {
        Self {
            tenant_id: config.tenant_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            authority: config.environment.authority().to_string(),
            scope: format!("{}/.default", config.resource_manager_endpoint()),
            http: reqwest::Client::new(),
            cached: Mutex::new(None),
        }
    }

    /// Token endpoint URL for this tenant
    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn token(&self) -> Result<AccessToken, ArmError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if !token.expires_within(EXPIRY_SLACK_SECONDS) {
                return Ok(token.clone());
            }
            tracing::debug!("Cached management token expires soon, requesting a new one");
        }

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self.http.post(self.token_url()).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArmError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let body: TokenResponse = response.json().await?;
        let token = AccessToken {
            token: body.access_token,
            expires_at: Utc::now() + Duration::seconds(body.expires_in),
        };

        tracing::debug!("Acquired management token, expires at {}", token.expires_at);
        *cached = Some(token.clone());

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::AzureEnvironment;

    #[test]
    fn test_access_token_expiration() {
        let expired = AccessToken {
            token: "token".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        };

        let valid = AccessToken {
            token: "token".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        };

        assert!(expired.is_expired());
        assert!(!valid.is_expired());
        assert!(valid.expires_within(7200));
        assert!(!valid.expires_within(1800));
    }

    #[test]
    fn test_token_url() {
        let config = AzureConfig {
            tenant_id: "my-tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            subscription_id: "sub".to_string(),
            environment: AzureEnvironment::Public,
            resource_manager_url: None,
        };

        let credential = ClientSecretCredential::new(&config);
        assert_eq!(
            credential.token_url(),
            "https://login.microsoftonline.com/my-tenant/oauth2/v2.0/token"
        );
        assert_eq!(credential.scope, "https://management.azure.com/.default");
    }
}
