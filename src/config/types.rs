// Configuration types for ARM Wizards
//
// This module defines the configuration structures for talking to the Azure
// management plane: service-principal credentials, the target cloud, and
// wizard-level settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level for the wizard system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// The Azure cloud a subscription belongs to
///
/// Each cloud has its own management-plane endpoint and Active Directory
/// authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AzureEnvironment {
    /// Global Azure
    Public,
    /// Azure China (21Vianet)
    China,
    /// Azure US Government
    UsGovernment,
}

impl Default for AzureEnvironment {
    fn default() -> Self {
        AzureEnvironment::Public
    }
}

impl AzureEnvironment {
    /// Base URL of the resource-manager endpoint for this cloud
    pub fn resource_manager_endpoint(&self) -> &'static str {
        match self {
            AzureEnvironment::Public => "https://management.azure.com",
            AzureEnvironment::China => "https://management.chinacloudapi.cn",
            AzureEnvironment::UsGovernment => "https://management.usgovcloudapi.net",
        }
    }

    /// Active Directory authority that issues tokens for this cloud
    pub fn authority(&self) -> &'static str {
        match self {
            AzureEnvironment::Public => "https://login.microsoftonline.com",
            AzureEnvironment::China => "https://login.chinacloudapi.cn",
            AzureEnvironment::UsGovernment => "https://login.microsoftonline.us",
        }
    }
}

impl std::fmt::Display for AzureEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AzureEnvironment::Public => write!(f, "public"),
            AzureEnvironment::China => write!(f, "china"),
            AzureEnvironment::UsGovernment => write!(f, "us-government"),
        }
    }
}

impl std::str::FromStr for AzureEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "azure" | "azurecloud" => Ok(AzureEnvironment::Public),
            "china" | "azurechinacloud" => Ok(AzureEnvironment::China),
            "us-government" | "usgov" | "azureusgovernment" => Ok(AzureEnvironment::UsGovernment),
            _ => Err(format!("Invalid Azure environment: {}", s)),
        }
    }
}

/// Service-principal and subscription configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Active Directory tenant ID
    pub tenant_id: String,
    /// Service principal (application) ID
    pub client_id: String,
    /// Service principal secret
    pub client_secret: String,
    /// Subscription to provision into
    pub subscription_id: String,
    /// Cloud the subscription belongs to
    #[serde(default)]
    pub environment: AzureEnvironment,
    /// Explicit resource-manager endpoint, overriding the environment default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_manager_url: Option<String>,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            subscription_id: String::new(),
            environment: AzureEnvironment::default(),
            resource_manager_url: None,
        }
    }
}

impl AzureConfig {
    /// Check if the configuration has complete service-principal credentials
    pub fn has_credentials(&self) -> bool {
        !self.tenant_id.is_empty() && !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Resource-manager endpoint to use, honoring an explicit override
    pub fn resource_manager_endpoint(&self) -> &str {
        self.resource_manager_url
            .as_deref()
            .unwrap_or_else(|| self.environment.resource_manager_endpoint())
    }
}

/// Wizard-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    /// Location to pre-seed new contexts with, skipping the location prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
    /// Log level for the wizard system
    #[serde(default)]
    pub log_level: LogLevel,
    /// Per-request timeout for management-plane calls in seconds
    #[serde(default = "WizardSettings::default_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl WizardSettings {
    fn default_timeout_seconds() -> u64 {
        30
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            default_location: None,
            log_level: LogLevel::default(),
            request_timeout_seconds: Self::default_timeout_seconds(),
        }
    }
}

/// Configuration validation report
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Whether the configuration is valid
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<String>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new validation report
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the report
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the report
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Check if there are any issues
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable names recognized by ARM Wizards
pub struct EnvVars;

impl EnvVars {
    pub const TENANT_ID: &'static str = "ARM_WIZARDS_TENANT_ID";
    pub const CLIENT_ID: &'static str = "ARM_WIZARDS_CLIENT_ID";
    pub const CLIENT_SECRET: &'static str = "ARM_WIZARDS_CLIENT_SECRET";
    pub const SUBSCRIPTION_ID: &'static str = "ARM_WIZARDS_SUBSCRIPTION_ID";
    pub const ENVIRONMENT: &'static str = "ARM_WIZARDS_ENVIRONMENT";
    pub const RESOURCE_MANAGER_URL: &'static str = "ARM_WIZARDS_RESOURCE_MANAGER_URL";
    pub const CONFIG_DIR: &'static str = "ARM_WIZARDS_CONFIG_DIR";
    pub const LOG_LEVEL: &'static str = "ARM_WIZARDS_LOG_LEVEL";
}

/// Configuration file paths and names
pub struct ConfigPaths;

impl ConfigPaths {
    /// Configuration directory name under the platform config root
    pub const CONFIG_DIR_NAME: &'static str = "arm-wizards";

    /// Configuration file name
    pub const CONFIG_FILE: &'static str = "config.toml";

    /// Get the default configuration directory
    pub fn default_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::CONFIG_DIR_NAME))
            .context("Failed to determine configuration directory")
    }

    /// Get the configuration file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join(Self::CONFIG_FILE))
    }
}
