// Location selection step for ARM Wizards
//
// Picks the Azure location newly created resources go into. The location
// list is fetched once per context and shared, the same way the resource
// group list is.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::arm::{list_all, LocationSummary};
use crate::ui::{show_quick_pick, QuickPickItem, QuickPickOptions};
use crate::wizard::{PromptStep, ProvisionContext, WizardError};

/// Placeholder shown while picking a location
const SELECT_PLACE_HOLDER: &str = "Select a location for new resources.";

/// Prompt step that selects a location
pub struct LocationListStep;

impl LocationListStep {
    /// Create the location selection step
    pub fn new() -> Self {
        Self
    }

    /// Locations available to the context's subscription, fetched once per
    /// context and shared by all callers
    pub async fn get_locations(ctx: &ProvisionContext) -> Result<&[LocationSummary], WizardError> {
        let locations = ctx
            .locations
            .get_or_try_init(|| {
                let arm = Arc::clone(&ctx.arm);
                let subscription_id = ctx.subscription_id.clone();
                async move {
                    debug!("Fetching locations for subscription {}", subscription_id);
                    let pager = Arc::clone(&arm);
                    list_all(arm.list_locations(), move |link| {
                        let arm = Arc::clone(&pager);
                        async move { arm.list_locations_next(&link).await }
                    })
                    .await
                }
            })
            .await?;

        Ok(locations.as_slice())
    }
}

impl Default for LocationListStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptStep<ProvisionContext> for LocationListStep {
    fn should_prompt(&self, ctx: &ProvisionContext) -> bool {
        ctx.location.is_none()
    }

    async fn prompt(&mut self, ctx: &mut ProvisionContext) -> Result<(), WizardError> {
        let picks: Vec<QuickPickItem<String>> = Self::get_locations(ctx)
            .await?
            .iter()
            .map(|location| {
                QuickPickItem::new(location.display_name.as_str(), location.name.clone())
                    .with_description(location.name.as_str())
            })
            .collect();

        let options = QuickPickOptions::new(SELECT_PLACE_HOLDER)
            .with_id(format!("LocationListStep/{}", ctx.subscription_id));

        let ui = Arc::clone(&ctx.ui);
        ctx.location = Some(show_quick_pick(ui.as_ref(), picks, &options).await?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::{ArmError, Page, ResourceGroupSummary, ResourceManagementApi};
    use crate::ui::ScriptedUserInput;

    struct FakeArm;

    #[async_trait]
    impl ResourceManagementApi for FakeArm {
        async fn list_resource_groups(&self) -> Result<Page<ResourceGroupSummary>, ArmError> {
            Ok(Page::new(Vec::new()))
        }

        async fn list_resource_groups_next(
            &self,
            _next_link: &str,
        ) -> Result<Page<ResourceGroupSummary>, ArmError> {
            Ok(Page::new(Vec::new()))
        }

        async fn list_locations(&self) -> Result<Page<LocationSummary>, ArmError> {
            Ok(Page::new(vec![
                LocationSummary {
                    id: "/subscriptions/sub-1/locations/eastus".to_string(),
                    name: "eastus".to_string(),
                    display_name: "East US".to_string(),
                },
                LocationSummary {
                    id: "/subscriptions/sub-1/locations/westeurope".to_string(),
                    name: "westeurope".to_string(),
                    display_name: "West Europe".to_string(),
                },
            ]))
        }

        async fn list_locations_next(
            &self,
            _next_link: &str,
        ) -> Result<Page<LocationSummary>, ArmError> {
            Ok(Page::new(Vec::new()))
        }

        async fn create_resource_group(
            &self,
            _name: &str,
            _location: &str,
        ) -> Result<ResourceGroupSummary, ArmError> {
            unreachable!("location step never creates")
        }
    }

    fn context(ui: ScriptedUserInput) -> ProvisionContext {
        ProvisionContext::new("sub-1", Arc::new(FakeArm), Arc::new(ui))
    }

    #[tokio::test]
    async fn test_picking_stores_the_canonical_name() {
        let ui = ScriptedUserInput::new().with_picks(["West Europe"]);
        let mut ctx = context(ui);

        LocationListStep::new().prompt(&mut ctx).await.unwrap();
        assert_eq!(ctx.location.as_deref(), Some("westeurope"));
    }

    #[tokio::test]
    async fn test_skipped_when_location_pre_seeded() {
        let step = LocationListStep::new();
        let mut ctx = context(ScriptedUserInput::new());
        ctx.location = Some("eastus".to_string());

        assert!(!step.should_prompt(&ctx));
    }

    #[tokio::test]
    async fn test_cancellation_propagates() {
        let mut ctx = context(ScriptedUserInput::new());
        let err = LocationListStep::new().prompt(&mut ctx).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(ctx.location.is_none());
    }
}
