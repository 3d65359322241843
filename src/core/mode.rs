//! # Modes
//!
//! The assistant has four top-level modes. Chat mode is further refined by
//! a sub-mode, the other three have none.
//!
//! ```text
//! Mode
//! ├── Chat ──── SubMode::{Information, Text} or none (mode picker)
//! ├── Tutor
//! ├── Career
//! └── Support   (renders the support form instead of a conversation)
//! ```

use serde::{Deserialize, Serialize};

/// Top-level assistant workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Chat,
    Tutor,
    Career,
    Support,
}

impl Mode {
    /// All modes in sidebar order.
    pub const ALL: [Mode; 4] = [Mode::Chat, Mode::Tutor, Mode::Career, Mode::Support];

    /// Sidebar button label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Chat => "Болталка с ИИ",
            Mode::Tutor => "Тьютор",
            Mode::Career => "Профориентация",
            Mode::Support => "Обратиться в поддержку",
        }
    }

    /// Single-glyph marker shown next to the label (the web view used icons).
    pub fn icon(self) -> &'static str {
        match self {
            Mode::Chat => "✉",
            Mode::Tutor => "✎",
            Mode::Career => "✦",
            Mode::Support => "?",
        }
    }
}

/// Refinement of chat mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubMode {
    Information,
    Text,
}

impl SubMode {
    pub const ALL: [SubMode; 2] = [SubMode::Information, SubMode::Text];

    pub fn label(self) -> &'static str {
        match self {
            SubMode::Information => "Работа с информацией",
            SubMode::Text => "Работа с текстом",
        }
    }

    /// Next option in the sidebar selector. An empty selector starts at `Information`.
    pub fn cycle(current: Option<SubMode>) -> SubMode {
        match current {
            None | Some(SubMode::Text) => SubMode::Information,
            Some(SubMode::Information) => SubMode::Text,
        }
    }
}
