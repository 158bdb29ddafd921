// Resource group name entry step for ARM Wizards
//
// Collects the name for a resource group that does not exist yet,
// re-prompting until the name satisfies the naming rules and does not
// collide with an existing group.

use async_trait::async_trait;
use tracing::warn;

use super::resource_group_list::ResourceGroupListStep;
use super::RESOURCE_GROUP_NAMING_RULES;
use crate::ui::InputBoxOptions;
use crate::wizard::{PromptStep, ProvisionContext, WizardError};

/// Prompt shown before the name input
const NAME_PROMPT: &str = "Enter the name of the new resource group.";

/// Prompt step that collects a new resource group name
pub struct ResourceGroupNameStep;

impl ResourceGroupNameStep {
    /// Create the name entry step
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResourceGroupNameStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptStep<ProvisionContext> for ResourceGroupNameStep {
    fn should_prompt(&self, ctx: &ProvisionContext) -> bool {
        ctx.new_resource_group_name.is_none()
    }

    async fn prompt(&mut self, ctx: &mut ProvisionContext) -> Result<(), WizardError> {
        let options = InputBoxOptions::new(NAME_PROMPT);

        loop {
            let name = ctx.ui.input(&options).await?;
            let name = name.trim().to_string();

            if let Err(reason) = RESOURCE_GROUP_NAMING_RULES.validate(&name) {
                warn!("Rejected resource group name '{}': {}", name, reason);
                continue;
            }

            if !ResourceGroupListStep::is_name_available(ctx, &name).await? {
                // a collision is not an error, the user just picks again
                warn!("Resource group '{}' already exists", name);
                continue;
            }

            ctx.new_resource_group_name = Some(name);
            return Ok(());
        }
    }
}
