// Resource group creation step for ARM Wizards
//
// Execute-phase step that creates the resource group the prompt phase named
// and located. Runs only after all prompting for the run has completed.

use async_trait::async_trait;
use tracing::info;

use crate::wizard::{ExecuteStep, ProvisionContext, WizardError};

/// Execute step that creates the new resource group
pub struct ResourceGroupCreateStep;

impl ResourceGroupCreateStep {
    /// Create the creation step
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResourceGroupCreateStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecuteStep<ProvisionContext> for ResourceGroupCreateStep {
    async fn execute(&mut self, ctx: &mut ProvisionContext) -> Result<(), WizardError> {
        let name = ctx.new_resource_group_name.clone().ok_or_else(|| {
            WizardError::Validation(
                "no resource group name was collected before the create step".to_string(),
            )
        })?;
        let location = ctx.location.clone().ok_or_else(|| {
            WizardError::Validation(
                "no location was collected before the create step".to_string(),
            )
        })?;

        info!("Creating resource group {} in {}", name, location);
        let created = ctx.arm.create_resource_group(&name, &location).await?;
        info!("Created resource group {}", created.id);

        ctx.resource_group = Some(created);
        Ok(())
    }
}
