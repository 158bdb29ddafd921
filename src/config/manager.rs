// Configuration Manager implementation for ARM Wizards
//
// This module provides the main ConfigManager that loads Azure credentials
// and wizard settings from the configuration file and environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use super::types::{
    AzureConfig, ConfigPaths, EnvVars, LogLevel, ValidationReport, WizardSettings,
};

/// On-disk configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct ConfigFile {
    /// Azure credentials and subscription
    #[serde(default)]
    azure: AzureConfig,
    /// Wizard settings
    #[serde(default)]
    wizard: WizardSettings,
}

/// Main configuration manager for ARM Wizards
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Azure credentials and subscription
    azure_config: AzureConfig,
    /// Wizard settings
    wizard_settings: WizardSettings,
    /// Path to the configuration directory
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a configuration manager using the default directory
    pub async fn new() -> Result<Self> {
        let config_dir = Self::determine_config_dir()?;
        Self::with_config_dir(config_dir).await
    }

    /// Create a configuration manager rooted at the given directory
    pub async fn with_config_dir(config_dir: impl AsRef<Path>) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();
        tracing::debug!("Using configuration directory: {:?}", config_dir);

        if !config_dir.exists() {
            async_fs::create_dir_all(&config_dir)
                .await
                .context("Failed to create configuration directory")?;
            tracing::info!("Created configuration directory: {:?}", config_dir);
        }

        let mut manager = Self {
            azure_config: AzureConfig::default(),
            wizard_settings: WizardSettings::default(),
            config_dir,
        };

        manager.load_configuration().await?;

        Ok(manager)
    }

    /// Determine the configuration directory to use
    fn determine_config_dir() -> Result<PathBuf> {
        // Check environment variable first
        if let Ok(config_dir) = env::var(EnvVars::CONFIG_DIR) {
            return Ok(PathBuf::from(config_dir));
        }

        // Use default configuration directory
        ConfigPaths::default_config_dir()
    }

    /// Load configuration from the file, then let environment variables
    /// override individual fields
    async fn load_configuration(&mut self) -> Result<()> {
        tracing::debug!("Loading configuration");

        self.load_config_file().await?;
        self.load_from_environment();

        tracing::info!("Configuration loaded successfully");
        Ok(())
    }

    /// Load configuration from the file if it exists
    async fn load_config_file(&mut self) -> Result<()> {
        let config_file = self.config_dir.join(ConfigPaths::CONFIG_FILE);

        if !config_file.exists() {
            tracing::debug!("Configuration file not found, using defaults");
            return Ok(());
        }

        tracing::debug!("Loading configuration from: {:?}", config_file);

        let content = async_fs::read_to_string(&config_file)
            .await
            .context("Failed to read configuration file")?;

        let file_config: ConfigFile =
            toml::from_str(&content).context("Failed to parse configuration file")?;

        self.azure_config = file_config.azure;
        self.wizard_settings = file_config.wizard;

        tracing::debug!("Configuration loaded from file");
        Ok(())
    }

    /// Override configuration fields from environment variables
    fn load_from_environment(&mut self) {
        tracing::debug!("Loading configuration from environment variables");

        if let Ok(tenant_id) = env::var(EnvVars::TENANT_ID) {
            self.azure_config.tenant_id = tenant_id;
            tracing::debug!("Loaded tenant ID from environment");
        }

        if let Ok(client_id) = env::var(EnvVars::CLIENT_ID) {
            self.azure_config.client_id = client_id;
            tracing::debug!("Loaded client ID from environment");
        }

        if let Ok(client_secret) = env::var(EnvVars::CLIENT_SECRET) {
            self.azure_config.client_secret = client_secret;
            tracing::debug!("Loaded client secret from environment");
        }

        if let Ok(subscription_id) = env::var(EnvVars::SUBSCRIPTION_ID) {
            self.azure_config.subscription_id = subscription_id;
        }

        if let Ok(environment) = env::var(EnvVars::ENVIRONMENT) {
            match environment.parse() {
                Ok(environment) => self.azure_config.environment = environment,
                Err(e) => tracing::warn!("Ignoring invalid environment from env var: {}", e),
            }
        }

        if let Ok(url) = env::var(EnvVars::RESOURCE_MANAGER_URL) {
            self.azure_config.resource_manager_url = Some(url);
        }

        if let Ok(log_level) = env::var(EnvVars::LOG_LEVEL) {
            if let Ok(level) = log_level.parse::<LogLevel>() {
                self.wizard_settings.log_level = level;
            }
        }
    }

    /// Get the Azure configuration
    pub fn azure_config(&self) -> &AzureConfig {
        &self.azure_config
    }

    /// Get the wizard settings
    pub fn wizard_settings(&self) -> &WizardSettings {
        &self.wizard_settings
    }

    /// Get the configuration directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Override the subscription to provision into
    pub fn set_subscription_id(&mut self, subscription_id: impl Into<String>) {
        self.azure_config.subscription_id = subscription_id.into();
    }

    /// Validate the current configuration
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !self.azure_config.has_credentials() {
            report.add_error(
                "Missing service principal credentials (tenant_id, client_id and client_secret)"
                    .to_string(),
            );
        }

        if self.azure_config.subscription_id.is_empty() {
            report.add_error("Missing subscription_id".to_string());
        }

        if self.wizard_settings.request_timeout_seconds == 0 {
            report.add_error("request_timeout_seconds must be greater than 0".to_string());
        }

        if let Some(url) = &self.azure_config.resource_manager_url {
            if !url.starts_with("https://") {
                report.add_warning(format!(
                    "Resource manager endpoint override is not https: {}",
                    url
                ));
            }
        }

        report
    }

    /// Check if the configuration is ready for use
    pub fn is_ready(&self) -> bool {
        self.validate().is_valid
    }

    /// Save the current configuration to the file
    pub async fn save(&self) -> Result<()> {
        tracing::debug!("Saving configuration");

        let config_file = self.config_dir.join(ConfigPaths::CONFIG_FILE);
        let contents = ConfigFile {
            azure: self.azure_config.clone(),
            wizard: self.wizard_settings.clone(),
        };

        let content =
            toml::to_string_pretty(&contents).context("Failed to serialize configuration")?;
        async_fs::write(&config_file, content)
            .await
            .context("Failed to write configuration file")?;

        tracing::info!("Configuration saved successfully");
        Ok(())
    }
}
