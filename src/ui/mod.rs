// User interaction module for ARM Wizards
//
// This module defines the interactive collaborator prompt steps depend on,
// with a dialoguer-backed terminal implementation and a scripted one for
// automation.

pub mod input;
pub mod scripted;
pub mod terminal;

// Re-export commonly used types
pub use input::{
    show_quick_pick, InputBoxOptions, PickEntry, QuickPickItem, QuickPickOptions, UserInput,
};
pub use scripted::ScriptedUserInput;
pub use terminal::TerminalUserInput;
