//! # Support Form
//!
//! Ticket form shown in support mode. The form holds only what the user
//! typed plus metadata of an attached file; the file contents are never read.

use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Иван Петров";
pub const DEFAULT_EMAIL: &str = "ivan.petrov@example.com";

/// Ticket category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportTopic {
    PlatformError,
    ContentError,
    AiError,
}

impl SupportTopic {
    pub const ALL: [SupportTopic; 3] = [
        SupportTopic::PlatformError,
        SupportTopic::ContentError,
        SupportTopic::AiError,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SupportTopic::PlatformError => {
                "Что-то не работает/не получается (ошибка в работе платформы)"
            }
            SupportTopic::ContentError => "Вопрос по контенту (ошибка в контенте платформы)",
            SupportTopic::AiError => "Ошибки в ИИ функционале",
        }
    }

    /// Wire value (`platform-error`, ...).
    pub fn key(self) -> &'static str {
        match self {
            SupportTopic::PlatformError => "platform-error",
            SupportTopic::ContentError => "content-error",
            SupportTopic::AiError => "ai-error",
        }
    }

    /// Step through the topic list; `forward = false` walks backwards.
    /// An unset topic starts at the first (or last) entry.
    pub fn cycle(current: Option<SupportTopic>, forward: bool) -> SupportTopic {
        let len = Self::ALL.len();
        let next = match current.and_then(|t| Self::ALL.iter().position(|&x| x == t)) {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        };
        Self::ALL[next]
    }
}

/// Attached file reference. Only the name and size are captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
}

#[derive(Debug)]
pub enum AttachmentError {
    NotAFile(String),
    Io(io::Error),
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentError::NotAFile(path) => write!(f, "not a file: {path}"),
            AttachmentError::Io(e) => write!(f, "cannot read attachment: {e}"),
        }
    }
}

impl std::error::Error for AttachmentError {}

impl Attachment {
    /// Capture metadata for the file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let metadata = std::fs::metadata(path).map_err(AttachmentError::Io)?;
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile(path.display().to_string()));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            file_name,
            size_bytes: metadata.len(),
        })
    }
}

/// Everything the user entered into the support form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportForm {
    pub name: String,
    pub email: String,
    pub topic: Option<SupportTopic>,
    pub description: String,
    pub attachment: Option<Attachment>,
}

impl Default for SupportForm {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_EMAIL)
    }
}

impl SupportForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            topic: None,
            description: String::new(),
            attachment: None,
        }
    }

    /// Submit is enabled once a topic is chosen and the description has
    /// non-whitespace content.
    pub fn can_submit(&self) -> bool {
        self.topic.is_some() && !self.description.trim().is_empty()
    }

    /// Build the ticket payload, or `None` while the form is incomplete.
    pub fn to_ticket(&self) -> Option<SupportTicket> {
        let topic = self.topic?;
        if !self.can_submit() {
            return None;
        }
        Some(SupportTicket {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            topic,
            description: self.description.trim().to_string(),
            attachment: self.attachment.clone(),
        })
    }
}

/// Validated ticket handed to the ticket backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub name: String,
    pub email: String,
    pub topic: SupportTopic,
    pub description: String,
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_form_is_prefilled_and_disabled() {
        let form = SupportForm::default();
        assert_eq!(form.name, DEFAULT_NAME);
        assert_eq!(form.email, DEFAULT_EMAIL);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_whitespace_description_keeps_submit_disabled() {
        let mut form = SupportForm::default();
        form.description = "  ".to_string();
        assert!(!form.can_submit());

        form.topic = Some(SupportTopic::AiError);
        assert!(!form.can_submit());

        form.description = "issue".to_string();
        assert!(form.can_submit());
    }

    #[test]
    fn test_topic_required() {
        let mut form = SupportForm::default();
        form.description = "issue".to_string();
        assert!(!form.can_submit());
        assert!(form.to_ticket().is_none());
    }

    #[test]
    fn test_to_ticket_trims_fields() {
        let mut form = SupportForm::new(" Анна ", "anna@example.com");
        form.topic = Some(SupportTopic::ContentError);
        form.description = "  Ошибка в тесте \n".to_string();
        let ticket = form.to_ticket().unwrap();
        assert_eq!(ticket.name, "Анна");
        assert_eq!(ticket.description, "Ошибка в тесте");
        assert_eq!(ticket.topic, SupportTopic::ContentError);
    }

    #[test]
    fn test_topic_cycle_wraps_both_ways() {
        assert_eq!(SupportTopic::cycle(None, true), SupportTopic::PlatformError);
        assert_eq!(SupportTopic::cycle(None, false), SupportTopic::AiError);
        assert_eq!(
            SupportTopic::cycle(Some(SupportTopic::AiError), true),
            SupportTopic::PlatformError
        );
        assert_eq!(
            SupportTopic::cycle(Some(SupportTopic::PlatformError), false),
            SupportTopic::AiError
        );
    }

    #[test]
    fn test_topic_serializes_as_kebab_case() {
        let json = serde_json::to_string(&SupportTopic::PlatformError).unwrap();
        assert_eq!(json, "\"platform-error\"");
        assert_eq!(SupportTopic::AiError.key(), "ai-error");
    }

    #[test]
    fn test_attachment_captures_name_and_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"screenshot").unwrap();

        let attachment = Attachment::from_path(file.path()).unwrap();
        assert_eq!(attachment.size_bytes, 10);
        assert_eq!(
            attachment.file_name,
            file.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_attachment_rejects_directories_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Attachment::from_path(dir.path()),
            Err(AttachmentError::NotAFile(_))
        ));
        assert!(matches!(
            Attachment::from_path(&dir.path().join("missing.png")),
            Err(AttachmentError::Io(_))
        ));
    }
}
