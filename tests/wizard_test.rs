// Integration tests for ARM Wizards
//
// These run the resource group wizard end to end against a fake management
// plane and a scripted terminal.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arm_wizards::arm::{
    ArmError, LocationSummary, Page, ResourceGroupSummary, ResourceManagementApi,
};
use arm_wizards::steps::{ResourceGroupListStep, CREATE_NEW_LABEL};
use arm_wizards::ui::ScriptedUserInput;
use arm_wizards::wizard::{ProvisionContext, Wizard, WizardError, WizardOptions};

/// Fake management plane with canned listings and a record of creations
struct FakeArm {
    group_pages: Mutex<Vec<Page<ResourceGroupSummary>>>,
    locations: Vec<LocationSummary>,
    group_list_calls: AtomicUsize,
    created: Mutex<Vec<(String, String)>>,
}

impl FakeArm {
    fn new(group_pages: Vec<Page<ResourceGroupSummary>>, locations: Vec<LocationSummary>) -> Self {
        Self {
            group_pages: Mutex::new(group_pages),
            locations,
            group_list_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    fn created(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceManagementApi for FakeArm {
    async fn list_resource_groups(&self) -> Result<Page<ResourceGroupSummary>, ArmError> {
        self.group_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.group_pages.lock().unwrap().remove(0))
    }

    async fn list_resource_groups_next(
        &self,
        _next_link: &str,
    ) -> Result<Page<ResourceGroupSummary>, ArmError> {
        Ok(self.group_pages.lock().unwrap().remove(0))
    }

    async fn list_locations(&self) -> Result<Page<LocationSummary>, ArmError> {
        Ok(Page::new(self.locations.clone()))
    }

    async fn list_locations_next(&self, _next_link: &str) -> Result<Page<LocationSummary>, ArmError> {
        Ok(Page::new(Vec::new()))
    }

    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroupSummary, ArmError> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), location.to_string()));
        Ok(rg(name, location))
    }
}

fn rg(name: &str, location: &str) -> ResourceGroupSummary {
    ResourceGroupSummary {
        id: format!("/subscriptions/sub-1/resourceGroups/{}", name),
        name: name.to_string(),
        location: location.to_string(),
        tags: None,
        properties: None,
    }
}

fn loc(name: &str, display_name: &str) -> LocationSummary {
    LocationSummary {
        id: format!("/subscriptions/sub-1/locations/{}", name),
        name: name.to_string(),
        display_name: display_name.to_string(),
    }
}

fn default_arm() -> FakeArm {
    FakeArm::new(
        vec![Page::new(vec![rg("rg-a", "eastus"), rg("taken", "westus")])],
        vec![loc("eastus", "East US"), loc("westeurope", "West Europe")],
    )
}

async fn run_wizard(
    arm: Arc<FakeArm>,
    ui: ScriptedUserInput,
    step: ResourceGroupListStep,
) -> (ProvisionContext, Result<(), WizardError>) {
    let mut ctx = ProvisionContext::new("sub-1", arm, Arc::new(ui));
    let options = WizardOptions::new().with_prompt_step(step);
    let result = Wizard::new(options).run(&mut ctx).await;
    (ctx, result)
}

#[tokio::test]
async fn test_selecting_an_existing_group() {
    let arm = Arc::new(default_arm());
    let ui = ScriptedUserInput::new().with_picks(["rg-a"]);

    let (ctx, result) = run_wizard(Arc::clone(&arm), ui, ResourceGroupListStep::new()).await;

    result.unwrap();
    assert_eq!(ctx.resource_group.unwrap().name, "rg-a");
    assert!(ctx.new_resource_group_name.is_none());
    assert!(arm.created().is_empty());
}

#[tokio::test]
async fn test_creating_a_new_group_end_to_end() {
    let arm = Arc::new(default_arm());
    // the first name collides case-insensitively and is re-prompted
    let ui = ScriptedUserInput::new()
        .with_picks([CREATE_NEW_LABEL, "West Europe"])
        .with_inputs(["TAKEN", "fresh-rg"]);

    let (ctx, result) = run_wizard(Arc::clone(&arm), ui, ResourceGroupListStep::new()).await;

    result.unwrap();
    assert_eq!(ctx.new_resource_group_name.as_deref(), Some("fresh-rg"));
    assert_eq!(ctx.location.as_deref(), Some("westeurope"));
    assert_eq!(arm.created(), vec![("fresh-rg".to_string(), "westeurope".to_string())]);

    // the created group is recorded back on the context
    let created = ctx.resource_group.unwrap();
    assert_eq!(created.name, "fresh-rg");
    assert_eq!(created.location, "westeurope");

    // the candidate listing and the availability checks shared one fetch
    assert_eq!(arm.group_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pre_seeded_location_skips_the_location_prompt() {
    let arm = Arc::new(default_arm());
    let ui = ScriptedUserInput::new()
        .with_picks([CREATE_NEW_LABEL])
        .with_inputs(["fresh-rg"]);

    let mut ctx = ProvisionContext::new("sub-1", Arc::<FakeArm>::clone(&arm), Arc::new(ui));
    ctx.location = Some("westus2".to_string());
    ctx.already_has_location_step = true;

    let options = WizardOptions::new().with_prompt_step(ResourceGroupListStep::new());
    Wizard::new(options).run(&mut ctx).await.unwrap();

    assert_eq!(arm.created(), vec![("fresh-rg".to_string(), "westus2".to_string())]);
}

#[tokio::test]
async fn test_pre_populated_context_skips_the_wizard() {
    let arm = Arc::new(default_arm());
    // nothing scripted: any prompt would cancel the run
    let ui = ScriptedUserInput::new();

    let mut ctx = ProvisionContext::new("sub-1", Arc::<FakeArm>::clone(&arm), Arc::new(ui));
    ctx.resource_group = Some(rg("pre-set", "eastus"));

    let options = WizardOptions::new().with_prompt_step(ResourceGroupListStep::new());
    Wizard::new(options).run(&mut ctx).await.unwrap();

    assert_eq!(ctx.resource_group.unwrap().name, "pre-set");
    assert_eq!(arm.group_list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dismissing_the_picker_cancels_the_run() {
    let arm = Arc::new(default_arm());
    let ui = ScriptedUserInput::new();

    let (ctx, result) = run_wizard(Arc::clone(&arm), ui, ResourceGroupListStep::new()).await;

    assert!(result.unwrap_err().is_cancelled());
    assert!(ctx.resource_group.is_none());
    assert!(arm.created().is_empty());
}

#[tokio::test]
async fn test_suppress_create_offers_no_create_entry() {
    let arm = Arc::new(default_arm());
    // asking the script to take the create entry proves it is absent: the
    // scripted pick fails as a script error, not a cancellation
    let ui = ScriptedUserInput::new().with_picks([CREATE_NEW_LABEL]);

    let (_ctx, result) =
        run_wizard(Arc::clone(&arm), ui, ResourceGroupListStep::suppress_create()).await;

    let err = result.unwrap_err();
    assert!(!err.is_cancelled());
    assert!(matches!(err, WizardError::Validation(_)));
}

#[tokio::test]
async fn test_paginated_listing_is_flattened_for_the_picker() {
    let arm = Arc::new(FakeArm::new(
        vec![
            Page::with_next_link(vec![rg("first", "eastus")], "page-2"),
            Page::new(vec![rg("second", "eastus")]),
        ],
        vec![loc("eastus", "East US")],
    ));
    let ui = ScriptedUserInput::new().with_picks(["second"]);

    let (ctx, result) = run_wizard(Arc::clone(&arm), ui, ResourceGroupListStep::new()).await;

    result.unwrap();
    assert_eq!(ctx.resource_group.unwrap().name, "second");
}

#[tokio::test]
async fn test_listing_failure_aborts_the_run() {
    struct FailingArm;

    #[async_trait]
    impl ResourceManagementApi for FailingArm {
        async fn list_resource_groups(&self) -> Result<Page<ResourceGroupSummary>, ArmError> {
            Err(ArmError::Api {
                status: 403,
                code: "AuthorizationFailed".to_string(),
                message: "not allowed".to_string(),
            })
        }

        async fn list_resource_groups_next(
            &self,
            _next_link: &str,
        ) -> Result<Page<ResourceGroupSummary>, ArmError> {
            unreachable!("first page already failed")
        }

        async fn list_locations(&self) -> Result<Page<LocationSummary>, ArmError> {
            Ok(Page::new(Vec::new()))
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
            unreachable!("listing failed before any creation")
        }
    }

    let ui = ScriptedUserInput::new().with_picks(["rg-a"]);
    let mut ctx = ProvisionContext::new("sub-1", Arc::new(FailingArm), Arc::new(ui));

    let options = WizardOptions::new().with_prompt_step(ResourceGroupListStep::new());
    let err = Wizard::new(options).run(&mut ctx).await.unwrap_err();

    assert!(matches!(err, WizardError::Arm(ArmError::Api { status: 403, .. })));
}
