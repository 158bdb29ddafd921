// Resource group resolution step for ARM Wizards
//
// Resolves which resource group a wizard run targets: fetches the groups in
// the context's subscription (once per context, shared by every caller),
// offers them to the user together with an optional "create new" entry, and
// contributes the follow-up steps that collect a name and location and
// create the group when the user opts out of selecting an existing one.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::location_list::LocationListStep;
use super::resource_group_create::ResourceGroupCreateStep;
use super::resource_group_name::ResourceGroupNameStep;
use crate::arm::{list_all, ResourceGroupSummary};
use crate::ui::{show_quick_pick, QuickPickItem, QuickPickOptions};
use crate::wizard::{PromptStep, ProvisionContext, WizardError, WizardOptions};

/// Label of the leading candidate that routes the wizard into the create path
pub const CREATE_NEW_LABEL: &str = "Create new resource group";

/// Placeholder shown while picking a resource group
const SELECT_PLACE_HOLDER: &str = "Select a resource group for new resources.";

/// Prompt step that resolves the target resource group
pub struct ResourceGroupListStep {
    /// Hide the "create new" candidate, forcing selection of an existing group
    suppress_create: bool,
}

impl ResourceGroupListStep {
    /// Create a step that offers existing groups plus the create-new entry
    pub fn new() -> Self {
        Self {
            suppress_create: false,
        }
    }

    /// Create a step that only offers existing groups
    pub fn suppress_create() -> Self {
        Self {
            suppress_create: true,
        }
    }

    /// Resource groups in the context's subscription.
    ///
    /// The first caller installs the fetch on the context; every caller,
    /// including concurrent ones, awaits that same in-flight computation, so
    /// one context never issues the listing twice.
    pub async fn get_resource_groups(
        ctx: &ProvisionContext,
    ) -> Result<&[ResourceGroupSummary], WizardError> {
        let groups = ctx
            .resource_groups
            .get_or_try_init(|| {
                let arm = Arc::clone(&ctx.arm);
                let subscription_id = ctx.subscription_id.clone();
                async move {
                    debug!("Fetching resource groups for subscription {}", subscription_id);
                    let pager = Arc::clone(&arm);
                    list_all(arm.list_resource_groups(), move |link| {
                        let arm = Arc::clone(&pager);
                        async move { arm.list_resource_groups_next(&link).await }
                    })
                    .await
                }
            })
            .await?;

        Ok(groups.as_slice())
    }

    /// Whether no existing group claims `name` under case-insensitive
    /// comparison
    pub async fn is_name_available(
        ctx: &ProvisionContext,
        name: &str,
    ) -> Result<bool, WizardError> {
        let groups = Self::get_resource_groups(ctx).await?;
        Ok(!groups.iter().any(|rg| rg.name.eq_ignore_ascii_case(name)))
    }

    /// Build the candidate list: the create-new entry (unless suppressed)
    /// followed by every existing group in API order
    async fn build_quick_picks(
        &self,
        ctx: &ProvisionContext,
    ) -> Result<Vec<QuickPickItem<Option<ResourceGroupSummary>>>, WizardError> {
        let mut picks = Vec::new();

        if !self.suppress_create {
            picks.push(QuickPickItem::new(CREATE_NEW_LABEL, None));
        }

        let groups = Self::get_resource_groups(ctx).await?;
        picks.extend(groups.iter().map(|rg| {
            QuickPickItem::new(rg.name.as_str(), Some(rg.clone()))
                .with_description(rg.location.as_str())
        }));

        Ok(picks)
    }
}

impl Default for ResourceGroupListStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptStep<ProvisionContext> for ResourceGroupListStep {
    fn should_prompt(&self, ctx: &ProvisionContext) -> bool {
        // resolution may already have happened by any path, including a
        // caller pre-populating the context
        ctx.resource_group.is_none() && ctx.new_resource_group_name.is_none()
    }

    async fn prompt(&mut self, ctx: &mut ProvisionContext) -> Result<(), WizardError> {
        let picks = self.build_quick_picks(ctx).await?;
        let options = QuickPickOptions::new(SELECT_PLACE_HOLDER)
            .with_id(format!("ResourceGroupListStep/{}", ctx.subscription_id));

        let ui = Arc::clone(&ctx.ui);
        // an absent choice means the user took the create-new entry
        ctx.resource_group = show_quick_pick(ui.as_ref(), picks, &options).await?;

        Ok(())
    }

    fn sub_wizard(&mut self, ctx: &mut ProvisionContext) -> Option<WizardOptions<ProvisionContext>> {
        if ctx.resource_group.is_some() {
            return None;
        }

        let mut options = WizardOptions::new()
            .with_title("Create new resource group")
            .with_prompt_step(ResourceGroupNameStep::new());

        if !ctx.already_has_location_step {
            options = options.with_prompt_step(LocationListStep::new());
            ctx.already_has_location_step = true;
        }

        Some(options.with_execute_step(ResourceGroupCreateStep::new()))
    }
}
