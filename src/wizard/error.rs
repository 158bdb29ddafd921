// Wizard error type for ARM Wizards

use crate::arm::ArmError;

/// Errors that abort a wizard run.
///
/// Cancellation is a first-class outcome, distinguishable from genuine
/// failures: a user dismissing a prompt ends the run without being an
/// application error.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The user dismissed an interactive prompt.
    #[error("wizard cancelled")]
    Cancelled,

    /// A management-plane call failed.
    #[error(transparent)]
    Arm(#[from] ArmError),

    /// Terminal interaction failed.
    #[error("terminal input failed: {0}")]
    Io(#[from] std::io::Error),

    /// The wizard was assembled or scripted inconsistently.
    #[error("invalid wizard state: {0}")]
    Validation(String),
}

impl WizardError {
    /// Whether this error is a user cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WizardError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(WizardError::Cancelled.is_cancelled());
        assert!(!WizardError::Validation("broken".to_string()).is_cancelled());
    }

    #[test]
    fn test_arm_error_converts() {
        let err: WizardError = ArmError::Auth("no token".to_string()).into();
        assert!(!err.is_cancelled());
        assert!(err.to_string().contains("no token"));
    }
}
