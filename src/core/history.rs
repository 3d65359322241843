//! # Dialog History
//!
//! Past dialogs listed in the sidebar. They are navigation shortcuts only:
//! selecting one switches mode/sub-mode, no messages are replayed.
//!
//! The `HistoryStore` trait is the seam where a real history service would
//! plug in. `StaticHistory` keeps entries in memory and starts with the
//! built-in list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::mode::{Mode, SubMode};

/// Number of entries shown before the "show more" toggle is needed.
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    DuplicateId(String),
    /// Entry claims a sub-mode for a mode other than chat.
    SubModeOutsideChat { id: String, mode: Mode },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::DuplicateId(id) => write!(f, "history entry {id} already exists"),
            HistoryError::SubModeOutsideChat { id, mode } => {
                write!(f, "history entry {id} has a sub-mode but mode {mode:?}")
            }
        }
    }
}

impl std::error::Error for HistoryError {}

/// One past dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_mode: Option<SubMode>,
    /// Display-only ("2 часа назад"), not a parsed date.
    pub last_activity: String,
}

impl HistoryEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        mode: Mode,
        sub_mode: Option<SubMode>,
        last_activity: impl Into<String>,
    ) -> Result<Self, HistoryError> {
        let id = id.into();
        if sub_mode.is_some() && mode != Mode::Chat {
            return Err(HistoryError::SubModeOutsideChat { id, mode });
        }
        Ok(Self {
            id,
            title: title.into(),
            mode,
            sub_mode,
            last_activity: last_activity.into(),
        })
    }
}

/// Source of history entries for the sidebar.
pub trait HistoryStore {
    /// Entries in display order (most recent first).
    fn list_history(&self) -> &[HistoryEntry];

    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError>;

    fn find(&self, id: &str) -> Option<&HistoryEntry> {
        self.list_history().iter().find(|entry| entry.id == id)
    }
}

/// In-memory history.
#[derive(Debug, Clone, Default)]
pub struct StaticHistory {
    entries: Vec<HistoryEntry>,
}

impl StaticHistory {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// The five dialogs every session starts with.
    pub fn builtin() -> Self {
        let seed: [(&str, &str, Mode, Option<SubMode>, &str); 5] = [
            ("1", "Помощь с математикой", Mode::Tutor, None, "2 часа назад"),
            ("2", "Анализ текста по литературе", Mode::Chat, Some(SubMode::Text), "5 часов назад"),
            ("3", "Карьера в IT", Mode::Career, None, "Вчера"),
            ("4", "Физика - законы Ньютона", Mode::Tutor, None, "2 дня назад"),
            ("5", "Поиск информации о химии", Mode::Chat, Some(SubMode::Information), "3 дня назад"),
        ];
        let entries = seed
            .into_iter()
            .filter_map(|(id, title, mode, sub, when)| {
                HistoryEntry::new(id, title, mode, sub, when).ok()
            })
            .collect();
        Self { entries }
    }
}

impl HistoryStore for StaticHistory {
    fn list_history(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// New entries go to the top of the list.
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(HistoryError::DuplicateId(entry.id));
        }
        self.entries.insert(0, entry);
        Ok(())
    }
}

/// Entries to render given the "show all" toggle.
pub fn visible_entries(entries: &[HistoryEntry], show_all: bool, preview: usize) -> &[HistoryEntry] {
    if show_all {
        entries
    } else {
        &entries[..entries.len().min(preview)]
    }
}

/// Whether the "show more" toggle should be offered at all.
pub fn needs_toggle(entries: &[HistoryEntry], preview: usize) -> bool {
    entries.len() > preview
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> HistoryEntry {
        HistoryEntry::new(id, format!("Диалог {id}"), Mode::Tutor, None, "сейчас").unwrap()
    }

    #[test]
    fn test_builtin_history_has_five_entries_in_order() {
        let history = StaticHistory::builtin();
        let ids: Vec<&str> = history.list_history().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(history.list_history()[1].sub_mode, Some(SubMode::Text));
    }

    #[test]
    fn test_entry_rejects_sub_mode_outside_chat() {
        let err = HistoryEntry::new("x", "t", Mode::Career, Some(SubMode::Text), "").unwrap_err();
        assert!(matches!(err, HistoryError::SubModeOutsideChat { .. }));
    }

    #[test]
    fn test_append_puts_entry_first_and_rejects_duplicates() {
        let mut history = StaticHistory::builtin();
        history.append(entry("6")).unwrap();
        assert_eq!(history.list_history()[0].id, "6");
        assert_eq!(history.list_history().len(), 6);

        let err = history.append(entry("6")).unwrap_err();
        assert_eq!(err, HistoryError::DuplicateId("6".to_string()));
    }

    #[test]
    fn test_find_by_id() {
        let history = StaticHistory::builtin();
        assert_eq!(history.find("3").map(|e| e.mode), Some(Mode::Career));
        assert!(history.find("missing").is_none());
    }

    #[test]
    fn test_visible_entries_respects_toggle() {
        let entries: Vec<HistoryEntry> = (1..=7).map(|i| entry(&i.to_string())).collect();
        assert_eq!(visible_entries(&entries, false, 5).len(), 5);
        assert_eq!(visible_entries(&entries, true, 5).len(), 7);
        assert!(needs_toggle(&entries, 5));
        assert!(!needs_toggle(&entries[..5], 5));
        assert_eq!(visible_entries(&entries[..3], false, 5).len(), 3);
    }

    #[test]
    fn test_entry_json_omits_missing_sub_mode() {
        let json = serde_json::to_value(entry("1")).unwrap();
        assert!(json.get("sub_mode").is_none());
        assert_eq!(json["mode"], "tutor");
    }
}
