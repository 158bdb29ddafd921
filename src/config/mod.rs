// Configuration module for ARM Wizards
//
// This module handles Azure Active Directory authentication, cloud
// environment selection, and wizard settings.

pub mod auth;
pub mod manager;
pub mod types;

// Re-export commonly used types
pub use auth::{AccessToken, ClientSecretCredential, TokenCredential};
pub use manager::ConfigManager;
pub use types::{
    AzureConfig, AzureEnvironment, ConfigPaths, EnvVars, LogLevel, ValidationReport,
    WizardSettings,
};
