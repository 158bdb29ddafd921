//! ARM Wizards Library
//!
//! This library provides multi-step provisioning wizards for Azure Resource
//! Manager: a step-sequencing engine, resource group resolution steps, and
//! the management-plane plumbing they depend on.

pub mod arm;
pub mod config;
pub mod steps;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use arm::{ArmClient, ResourceManagementApi};
pub use config::ConfigManager;
pub use steps::ResourceGroupListStep;
pub use ui::{ScriptedUserInput, TerminalUserInput, UserInput};
pub use wizard::{ProvisionContext, Wizard, WizardError, WizardOptions};
