//! # Navigation State
//!
//! The single piece of state shared by the sidebar and the chat area:
//! which mode is active and, in chat mode, which sub-mode.
//!
//! ```text
//!            select_mode(chat)            select_sub_mode(s)
//!   ┌──────────────────────────┐      ┌──────────────────────┐
//!   ▼                          │      ▼                      │
//! (chat, none) ──select_sub_mode(s)──▶ (chat, s) ─────────────┘
//!   ▲   │                              │
//!   │   └──select_mode(m≠chat)──▶ (m, none) ◀──select_mode(m≠chat)
//!   └──────────── start_new_chat() ─────┘
//! ```
//!
//! Invariant: a sub-mode is only ever present while the mode is chat.
//! The fields are private so the only way to change them is through the
//! transitions below, which maintain it.

use std::fmt;

use crate::core::content;
use crate::core::history::HistoryEntry;
use crate::core::mode::{Mode, SubMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// `select_sub_mode` was called while the mode is not chat.
    SubModeOutsideChat { mode: Mode },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::SubModeOutsideChat { mode } => {
                write!(f, "sub-mode can only be chosen in chat mode (current: {mode:?})")
            }
        }
    }
}

impl std::error::Error for NavigationError {}

/// Active `(mode, sub_mode)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    mode: Mode,
    sub_mode: Option<SubMode>,
}

impl NavigationState {
    /// Initial state: chat mode with no sub-mode (mode picker).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sub_mode(&self) -> Option<SubMode> {
        self.sub_mode
    }

    /// Switch modes. Re-entering chat keeps the last sub-mode; any other
    /// mode drops it.
    pub fn select_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode != Mode::Chat {
            self.sub_mode = None;
        }
    }

    /// Choose a chat sub-mode. Rejected outside chat mode; the state is
    /// left untouched in that case.
    pub fn select_sub_mode(&mut self, sub_mode: SubMode) -> Result<(), NavigationError> {
        if self.mode != Mode::Chat {
            return Err(NavigationError::SubModeOutsideChat { mode: self.mode });
        }
        self.sub_mode = Some(sub_mode);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn show_mode_picker(&self) -> bool {
        self.mode == Mode::Chat && self.sub_mode.is_none()
    }

    pub fn header_text(&self) -> String {
        content::header_text(self.mode, self.sub_mode)
    }

    pub fn header_subtitle(&self) -> &'static str {
        content::header_subtitle(self.mode, self.sub_mode)
    }

    pub fn greeting_text(&self) -> &'static str {
        content::greeting_text(self.mode, self.sub_mode)
    }

    pub fn suggestion_list(&self) -> &'static [&'static str] {
        content::suggestion_list(self.mode, self.sub_mode)
    }
}

/// What the sidebar highlights: a history entry or a mode button, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    History(String),
    Mode(Mode),
}

/// Navigation plus the sidebar's history highlight.
///
/// The highlight is kept next to the navigation state so that every
/// transition that has to clear it (mode button, new dialog) does so in
/// the same step that changes the mode.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavigationState,
    selected_history_id: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn selected_history_id(&self) -> Option<&str> {
        self.selected_history_id.as_deref()
    }

    /// Mode button click.
    pub fn select_mode(&mut self, mode: Mode) {
        self.state.select_mode(mode);
        self.selected_history_id = None;
    }

    /// Sub-mode selector or mode picker card. Does not touch the highlight.
    pub fn select_sub_mode(&mut self, sub_mode: SubMode) -> Result<(), NavigationError> {
        self.state.select_sub_mode(sub_mode)
    }

    pub fn select_history_entry(&mut self, entry: &HistoryEntry) {
        self.state.select_mode(entry.mode);
        if let Some(sub_mode) = entry.sub_mode {
            // Entries carry a sub-mode only in chat mode (checked at construction).
            if let Err(e) = self.state.select_sub_mode(sub_mode) {
                log::warn!("History entry {} ignored sub-mode: {}", entry.id, e);
            }
        }
        self.selected_history_id = Some(entry.id.clone());
    }

    pub fn start_new_chat(&mut self) {
        self.state.reset();
        self.selected_history_id = None;
    }

    pub fn highlight(&self) -> Highlight {
        match &self.selected_history_id {
            Some(id) => Highlight::History(id.clone()),
            None => Highlight::Mode(self.state.mode),
        }
    }
}
