// Scripted input implementation for ARM Wizards
//
// Answers prompts from pre-loaded queues instead of a terminal. Used for
// non-interactive automation and for exercising wizards in tests. An
// exhausted script behaves like the user dismissing the prompt.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

use super::input::{InputBoxOptions, PickEntry, QuickPickOptions, UserInput};
use crate::wizard::WizardError;

/// Prompt implementation that replays a prepared script
#[derive(Default)]
pub struct ScriptedUserInput {
    /// Labels to choose from upcoming pickers, in order
    picks: Mutex<VecDeque<String>>,
    /// Text answers for upcoming input boxes, in order
    inputs: Mutex<VecDeque<String>>,
}

impl ScriptedUserInput {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue labels to pick, in order
    pub fn with_picks(self, picks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        {
            let mut queue = self.picks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            queue.extend(picks.into_iter().map(Into::into));
        }
        self
    }

    /// Queue text answers, in order
    pub fn with_inputs(self, inputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        {
            let mut queue = self.inputs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            queue.extend(inputs.into_iter().map(Into::into));
        }
        self
    }

    /// Queue one label to pick
    pub fn push_pick(&self, label: impl Into<String>) {
        self.picks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(label.into());
    }

    /// Queue one text answer
    pub fn push_input(&self, value: impl Into<String>) {
        self.inputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(value.into());
    }
}

#[async_trait]
impl UserInput for ScriptedUserInput {
    async fn pick(
        &self,
        entries: &[PickEntry],
        options: &QuickPickOptions,
    ) -> Result<usize, WizardError> {
        let wanted = self
            .picks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        let Some(wanted) = wanted else {
            debug!("Pick script exhausted for '{}'", options.place_holder);
            return Err(WizardError::Cancelled);
        };

        entries
            .iter()
            .position(|entry| entry.label == wanted)
            .ok_or_else(|| {
                WizardError::Validation(format!(
                    "scripted pick '{}' is not among the {} candidates",
                    wanted,
                    entries.len()
                ))
            })
    }

    async fn input(&self, options: &InputBoxOptions) -> Result<String, WizardError> {
        let answer = self
            .inputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match answer {
            Some(answer) => Ok(answer),
            None => {
                debug!("Input script exhausted for '{}'", options.prompt);
                Err(WizardError::Cancelled)
            }
        }
    }
}
