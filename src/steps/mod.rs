// Wizard steps module for ARM Wizards
//
// This module contains the concrete prompt and execute steps that resolve or
// create the resource group a wizard run provisions into.

pub mod location_list;
pub mod resource_group_create;
pub mod resource_group_list;
pub mod resource_group_name;

// Re-export commonly used types
pub use location_list::LocationListStep;
pub use resource_group_create::ResourceGroupCreateStep;
pub use resource_group_list::{ResourceGroupListStep, CREATE_NEW_LABEL};
pub use resource_group_name::ResourceGroupNameStep;

/// Naming constraints applied to a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingRules {
    /// Minimum name length in characters
    pub min_length: usize,
    /// Maximum name length in characters
    pub max_length: usize,
}

/// Naming constraints for Azure resource groups
pub const RESOURCE_GROUP_NAMING_RULES: NamingRules = NamingRules {
    min_length: 1,
    max_length: 90,
};

impl NamingRules {
    /// Check a candidate name against these rules.
    ///
    /// Returns the reason the name is invalid, suitable for showing to the
    /// user before re-prompting.
    pub fn validate(&self, name: &str) -> Result<(), String> {
        let length = name.chars().count();

        if length < self.min_length {
            return Err(format!(
                "The name must be at least {} character(s) long",
                self.min_length
            ));
        }

        if length > self.max_length {
            return Err(format!(
                "The name must be at most {} characters long",
                self.max_length
            ));
        }

        if let Some(invalid) = name.chars().find(|c| !Self::is_allowed_char(*c)) {
            return Err(format!("The name contains an invalid character: '{}'", invalid));
        }

        Ok(())
    }

    // Resource group names allow alphanumerics, periods, underscores,
    // hyphens, and parentheses.
    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '(' | ')')
    }
}
