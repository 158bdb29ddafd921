// Interactive input abstraction for ARM Wizards
//
// Prompt steps never talk to a terminal directly; they go through the
// UserInput collaborator, which can be an interactive terminal or a
// scripted stand-in.

use async_trait::async_trait;

use crate::wizard::WizardError;

/// One selectable entry as the picker renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickEntry {
    /// Primary label
    pub label: String,
    /// Secondary detail shown next to the label
    pub description: Option<String>,
}

/// A selectable candidate carrying typed data
#[derive(Debug, Clone)]
pub struct QuickPickItem<T> {
    /// Primary label
    pub label: String,
    /// Secondary detail shown next to the label
    pub description: Option<String>,
    /// Value returned when this candidate is chosen
    pub data: T,
}

impl<T> QuickPickItem<T> {
    /// Create a candidate with the given label and data
    pub fn new(label: impl Into<String>, data: T) -> Self {
        Self {
            label: label.into(),
            description: None,
            data,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn entry(&self) -> PickEntry {
        PickEntry {
            label: self.label.clone(),
            description: self.description.clone(),
        }
    }
}

/// Options for a quick-pick interaction
#[derive(Debug, Clone, Default)]
pub struct QuickPickOptions {
    /// Placeholder prompt shown while picking
    pub place_holder: String,
    /// Stable identifier; implementations may recall the previous choice
    /// made under the same identifier
    pub id: Option<String>,
}

impl QuickPickOptions {
    /// Create options with the given placeholder
    pub fn new(place_holder: impl Into<String>) -> Self {
        Self {
            place_holder: place_holder.into(),
            id: None,
        }
    }

    /// Attach a stable identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Options for a free-text input interaction
#[derive(Debug, Clone, Default)]
pub struct InputBoxOptions {
    /// Prompt shown before the input
    pub prompt: String,
    /// Value used when the user submits without typing
    pub default: Option<String>,
}

impl InputBoxOptions {
    /// Create options with the given prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            default: None,
        }
    }

    /// Attach a default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The interactive collaborator prompt steps talk to
#[async_trait]
pub trait UserInput: Send + Sync {
    /// Present entries and return the index of the chosen one.
    ///
    /// Dismissing the picker surfaces as `WizardError::Cancelled`, never as
    /// an application error.
    async fn pick(
        &self,
        entries: &[PickEntry],
        options: &QuickPickOptions,
    ) -> Result<usize, WizardError>;

    /// Ask for a line of text
    async fn input(&self, options: &InputBoxOptions) -> Result<String, WizardError>;
}

/// Present typed candidates and return the chosen candidate's data
pub async fn show_quick_pick<T: Send>(
    ui: &dyn UserInput,
    items: Vec<QuickPickItem<T>>,
    options: &QuickPickOptions,
) -> Result<T, WizardError> {
    let entries: Vec<PickEntry> = items.iter().map(QuickPickItem::entry).collect();
    let index = ui.pick(&entries, options).await?;

    let mut items = items;
    if index >= items.len() {
        return Err(WizardError::Validation(format!(
            "picker returned index {} for {} candidates",
            index,
            items.len()
        )));
    }
    Ok(items.swap_remove(index).data)
}
