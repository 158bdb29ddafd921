// Terminal prompt implementation for ARM Wizards
//
// Interactive picking and text entry on a terminal, backed by dialoguer.
// Dismissing a picker (Escape) maps to cancellation, not to a failure.

use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::collections::HashMap;
use std::sync::Mutex;

use super::input::{InputBoxOptions, PickEntry, QuickPickOptions, UserInput};
use crate::wizard::WizardError;

/// Interactive terminal prompts
pub struct TerminalUserInput {
    /// Theme for rendered prompts
    theme: ColorfulTheme,
    /// Last picked index per stable quick-pick identifier, used as the
    /// preselected entry the next time the same identifier is shown
    recent: Mutex<HashMap<String, usize>>,
}

impl TerminalUserInput {
    /// Create a terminal prompt implementation
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            recent: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for TerminalUserInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a dialoguer failure onto the wizard error taxonomy
fn interaction_error(err: dialoguer::Error) -> WizardError {
    match err {
        dialoguer::Error::IO(io) => {
            if io.kind() == std::io::ErrorKind::Interrupted {
                WizardError::Cancelled
            } else {
                WizardError::Io(io)
            }
        }
    }
}

#[async_trait]
impl UserInput for TerminalUserInput {
    async fn pick(
        &self,
        entries: &[PickEntry],
        options: &QuickPickOptions,
    ) -> Result<usize, WizardError> {
        let labels: Vec<String> = entries
            .iter()
            .map(|entry| match &entry.description {
                Some(description) => format!("{} ({})", entry.label, description),
                None => entry.label.clone(),
            })
            .collect();

        let default = options
            .id
            .as_ref()
            .and_then(|id| {
                self.recent
                    .lock()
                    .ok()
                    .and_then(|recent| recent.get(id).copied())
            })
            .filter(|&index| index < labels.len())
            .unwrap_or(0);

        let selection = Select::with_theme(&self.theme)
            .with_prompt(options.place_holder.clone())
            .items(&labels)
            .default(default)
            .interact_opt()
            .map_err(interaction_error)?;

        match selection {
            Some(index) => {
                if let Some(id) = &options.id {
                    if let Ok(mut recent) = self.recent.lock() {
                        recent.insert(id.clone(), index);
                    }
                }
                Ok(index)
            }
            None => Err(WizardError::Cancelled),
        }
    }

    async fn input(&self, options: &InputBoxOptions) -> Result<String, WizardError> {
        let mut prompt = Input::<String>::with_theme(&self.theme);
        prompt = prompt.with_prompt(options.prompt.clone());

        if let Some(default) = &options.default {
            prompt = prompt.default(default.clone());
        }

        prompt.interact_text().map_err(interaction_error)
    }
}
