// Shared wizard context for ARM Wizards
//
// One ProvisionContext is created per wizard run and threaded by mutable
// reference through every step. Steps read and write its named fields and
// never reach outside it; the collaborator handles it carries are the only
// way a step touches the outside world.

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::arm::{LocationSummary, ResourceGroupSummary, ResourceManagementApi};
use crate::ui::UserInput;

/// Mutable state shared by every step of one wizard run.
///
/// Exclusively owned by the running wizard; never shared between runs.
/// Discarded when the run ends, whether it succeeded or aborted.
pub struct ProvisionContext {
    /// Subscription the wizard provisions into
    pub subscription_id: String,
    /// Management-plane collaborator, shared by every step of the run
    pub arm: Arc<dyn ResourceManagementApi>,
    /// Interactive collaborator used by prompt steps
    pub ui: Arc<dyn UserInput>,
    /// The selected existing group, or the created one after the execute phase
    pub resource_group: Option<ResourceGroupSummary>,
    /// Name chosen for a group that does not exist yet
    pub new_resource_group_name: Option<String>,
    /// Location for newly created resources
    pub location: Option<String>,
    /// Set once a location step has been contributed to this run, so a
    /// second step needing a location does not insert a duplicate prompt
    pub already_has_location_step: bool,
    // Both caches are keyed by context instance, not by subscription: a
    // context reused across subscriptions would serve stale results.
    // Contexts are created per run, so that reuse does not occur here.
    pub(crate) resource_groups: Arc<OnceCell<Vec<ResourceGroupSummary>>>,
    pub(crate) locations: Arc<OnceCell<Vec<LocationSummary>>>,
}

impl ProvisionContext {
    /// Create a fresh context for one wizard run
    pub fn new(
        subscription_id: impl Into<String>,
        arm: Arc<dyn ResourceManagementApi>,
        ui: Arc<dyn UserInput>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            arm,
            ui,
            resource_group: None,
            new_resource_group_name: None,
            location: None,
            already_has_location_step: false,
            resource_groups: Arc::new(OnceCell::new()),
            locations: Arc::new(OnceCell::new()),
        }
    }
}
