// Wizard module for ARM Wizards
//
// This module provides the step-sequencing engine and the shared context
// that provisioning wizards thread through their steps.

pub mod context;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use context::ProvisionContext;
pub use engine::{ExecuteStep, PromptStep, Wizard, WizardOptions};
pub use error::WizardError;
