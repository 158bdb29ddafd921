// ARM Wizards - Interactive provisioning wizards for Azure Resource Manager
//
// This application runs the resource group wizard on a terminal: it lists
// the resource groups of a subscription, lets the user select one or create
// a new one, and provisions the new group when asked to.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

mod arm;
mod config;
mod steps;
mod ui;
mod wizard;

use crate::arm::{ArmClient, ArmClientConfig};
use crate::config::{ClientSecretCredential, ConfigManager};
use crate::steps::ResourceGroupListStep;
use crate::ui::TerminalUserInput;
use crate::wizard::{ProvisionContext, Wizard, WizardOptions};

/// ARM Wizards - guided provisioning against Azure Resource Manager
#[derive(Parser)]
#[command(name = "arm-wizard")]
#[command(about = "Multi-step provisioning wizards for Azure Resource Manager resources")]
#[command(version)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration directory path
    #[arg(short, long)]
    config: Option<String>,

    /// Subscription to provision into (overrides configuration)
    #[arg(short, long)]
    subscription: Option<String>,

    /// Only offer existing resource groups, hide the create-new entry
    #[arg(long)]
    suppress_create: bool,

    /// Location for new resources, skipping the location prompt
    #[arg(long)]
    location: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose)?;

    tracing::info!("Starting ARM Wizards");

    let mut config_manager = match &args.config {
        Some(dir) => ConfigManager::with_config_dir(dir).await?,
        None => ConfigManager::new().await?,
    };

    if let Some(subscription) = &args.subscription {
        config_manager.set_subscription_id(subscription);
    }

    let report = config_manager.validate();
    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }
    if !report.is_valid {
        for error in &report.errors {
            eprintln!("Error: {}", error);
        }
        anyhow::bail!(
            "configuration is not ready; set the ARM_WIZARDS_* environment variables or edit {}",
            config_manager
                .config_dir()
                .join(config::ConfigPaths::CONFIG_FILE)
                .display()
        );
    }

    let azure_config = config_manager.azure_config();
    let settings = config_manager.wizard_settings();

    let credential = Arc::new(ClientSecretCredential::new(azure_config));
    let client_config = ArmClientConfig {
        endpoint: azure_config.resource_manager_endpoint().to_string(),
        timeout: Duration::from_secs(settings.request_timeout_seconds),
        ..Default::default()
    };
    let client = Arc::new(ArmClient::with_config(
        credential,
        azure_config.subscription_id.clone(),
        client_config,
    ));

    let mut ctx = ProvisionContext::new(
        azure_config.subscription_id.clone(),
        client,
        Arc::new(TerminalUserInput::new()),
    );

    // A pre-seeded location satisfies the location step and keeps the
    // create path from inserting one
    if let Some(location) = args.location.or_else(|| settings.default_location.clone()) {
        tracing::debug!("Pre-seeding location: {}", location);
        ctx.location = Some(location);
        ctx.already_has_location_step = true;
    }

    let step = if args.suppress_create {
        ResourceGroupListStep::suppress_create()
    } else {
        ResourceGroupListStep::new()
    };

    let options = WizardOptions::new()
        .with_title("Select or create a resource group")
        .with_prompt_step(step);

    match Wizard::new(options).run(&mut ctx).await {
        Ok(()) => {
            if let Some(group) = &ctx.resource_group {
                println!("Resolved resource group: {} ({})", group.name, group.location);
            }
        }
        Err(err) if err.is_cancelled() => {
            tracing::info!("Wizard cancelled by user");
        }
        Err(err) => return Err(err.into()),
    }

    tracing::info!("ARM Wizards shutdown complete");
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("arm_wizards={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
