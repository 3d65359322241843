//! # Application State
//!
//! Core state for the assistant page. Domain only, no TUI types;
//! presentation state (draft, form fields, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── navigator: Navigator            // (mode, sub-mode) + history highlight
//! ├── history: Box<dyn HistoryStore>  // sidebar dialog list
//! ├── history_preview: usize          // entries shown before "show more"
//! ├── profile: Profile                // support form defaults
//! └── status_message: String          // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::history::{DEFAULT_PREVIEW_COUNT, HistoryStore, StaticHistory};
use crate::core::navigation::Navigator;
use crate::core::support::{DEFAULT_EMAIL, DEFAULT_NAME, SupportForm};

/// Who is using the assistant. Pre-fills the support form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
        }
    }
}

impl Profile {
    pub fn blank_form(&self) -> SupportForm {
        SupportForm::new(self.name.clone(), self.email.clone())
    }
}

pub struct App {
    pub navigator: Navigator,
    pub history: Box<dyn HistoryStore>,
    pub history_preview: usize,
    pub profile: Profile,
    pub status_message: String,
}

impl App {
    pub fn new(history: Box<dyn HistoryStore>, profile: Profile) -> Self {
        Self {
            navigator: Navigator::new(),
            history,
            history_preview: DEFAULT_PREVIEW_COUNT,
            profile,
            status_message: String::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(
            Box::new(StaticHistory::builtin()),
            Profile {
                name: config.name.clone(),
                email: config.email.clone(),
            },
        );
        app.history_preview = config.history_preview;
        app
    }
}
