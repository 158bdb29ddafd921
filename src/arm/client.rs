// Azure Resource Manager client for ARM Wizards
//
// This module provides the management-plane collaborator the wizard steps
// talk to: listing resource groups and locations page by page, and creating
// resource groups. The reqwest-backed implementation handles bearer
// authentication, request correlation, and ARM's error envelope.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::ArmError;
use super::types::{ArmErrorResponse, LocationSummary, Page, ResourceGroupSummary};
use crate::config::auth::TokenCredential;

/// api-version used for resource-group and location operations
const API_VERSION: &str = "2021-04-01";

/// Configuration for management-plane requests
#[derive(Debug, Clone)]
pub struct ArmClientConfig {
    /// Base URL of the resource-manager endpoint
    pub endpoint: String,
    /// api-version query parameter sent with every request
    pub api_version: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ArmClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://management.azure.com".to_string(),
            api_version: API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// The management-plane operations the wizard layer depends on
#[async_trait]
pub trait ResourceManagementApi: Send + Sync {
    /// First page of resource groups in the subscription
    async fn list_resource_groups(&self) -> Result<Page<ResourceGroupSummary>, ArmError>;

    /// Continue a resource-group listing at `next_link`
    async fn list_resource_groups_next(
        &self,
        next_link: &str,
    ) -> Result<Page<ResourceGroupSummary>, ArmError>;

    /// First page of locations available to the subscription
    async fn list_locations(&self) -> Result<Page<LocationSummary>, ArmError>;

    /// Continue a location listing at `next_link`
    async fn list_locations_next(&self, next_link: &str) -> Result<Page<LocationSummary>, ArmError>;

    /// Create (or update) a resource group in the given location
    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroupSummary, ArmError>;
}

/// reqwest-backed client for the resource-manager endpoint
pub struct ArmClient {
    /// Source of bearer tokens
    credential: Arc<dyn TokenCredential>,
    /// Subscription all operations are scoped to
    subscription_id: String,
    /// Request configuration
    config: ArmClientConfig,
    /// Shared HTTP client
    http: reqwest::Client,
}

impl ArmClient {
    /// Create a client with default configuration
    pub fn new(credential: Arc<dyn TokenCredential>, subscription_id: impl Into<String>) -> Self {
        Self::with_config(credential, subscription_id, ArmClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(
        credential: Arc<dyn TokenCredential>,
        subscription_id: impl Into<String>,
        config: ArmClientConfig,
    ) -> Self {
        Self {
            credential,
            subscription_id: subscription_id.into(),
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Build a subscription-scoped URL for the given path
    fn subscription_url(&self, path: &str) -> String {
        format!(
            "{}/subscriptions/{}/{}?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.subscription_id,
            path,
            self.config.api_version
        )
    }

    /// Send one authenticated request and decode the response
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ArmError> {
        let token = self.credential.token().await?;
        let request_id = Uuid::new_v4();

        debug!("ARM request {} {} ({})", method, url, request_id);

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&token.token)
            .header("x-ms-client-request-id", request_id.to_string())
            .timeout(self.config.timeout);

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<ArmErrorResponse>(&body) {
                Ok(envelope) => (envelope.error.code, envelope.error.message),
                Err(_) => ("UnknownError".to_string(), body),
            };
            warn!("ARM request {} failed with {}: {}", request_id, status, code);
            return Err(ArmError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        Ok(serde_json::from_str::<T>(&body)?)
    }
}

#[async_trait]
impl ResourceManagementApi for ArmClient {
    async fn list_resource_groups(&self) -> Result<Page<ResourceGroupSummary>, ArmError> {
        let url = self.subscription_url("resourcegroups");
        self.execute(Method::GET, &url, None).await
    }

    async fn list_resource_groups_next(
        &self,
        next_link: &str,
    ) -> Result<Page<ResourceGroupSummary>, ArmError> {
        // nextLink is an absolute URL carrying its own query string
        self.execute(Method::GET, next_link, None).await
    }

    async fn list_locations(&self) -> Result<Page<LocationSummary>, ArmError> {
        let url = self.subscription_url("locations");
        self.execute(Method::GET, &url, None).await
    }

    async fn list_locations_next(&self, next_link: &str) -> Result<Page<LocationSummary>, ArmError> {
        self.execute(Method::GET, next_link, None).await
    }

    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroupSummary, ArmError> {
        let url = self.subscription_url(&format!("resourcegroups/{}", name));
        self.execute(Method::PUT, &url, Some(json!({ "location": location })))
            .await
    }
}
