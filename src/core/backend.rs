//! # Backends
//!
//! Outbound seams: delivering a chat message and submitting a support
//! ticket. No transport exists yet, so `LoggingBackend` records each call
//! in the log file and acknowledges it.

use std::cell::Cell;
use std::fmt;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::core::support::SupportTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend refused the payload. Not retryable.
    Rejected(String),
    /// Backend could not be reached. Retryable.
    Unavailable(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Rejected(msg) => write!(f, "rejected: {msg}"),
            BackendError::Unavailable(msg) => write!(f, "unavailable: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Acknowledgement of a delivered message or ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub id: String,
    pub received_at: DateTime<Utc>,
}

impl Ack {
    fn now() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            received_at: Utc::now(),
        }
    }
}

pub trait MessageBackend {
    fn send_message(&self, text: &str) -> Result<Ack, BackendError>;
}

pub trait TicketBackend {
    fn submit_ticket(&self, ticket: &SupportTicket) -> Result<Ack, BackendError>;
}

/// Writes every outbound call to the log.
#[derive(Debug, Default)]
pub struct LoggingBackend {
    sent_messages: Cell<usize>,
    submitted_tickets: Cell<usize>,
}

impl LoggingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_messages(&self) -> usize {
        self.sent_messages.get()
    }

    pub fn submitted_tickets(&self) -> usize {
        self.submitted_tickets.get()
    }
}

impl MessageBackend for LoggingBackend {
    fn send_message(&self, text: &str) -> Result<Ack, BackendError> {
        let ack = Ack::now();
        self.sent_messages.set(self.sent_messages.get() + 1);
        info!("Message sent: {:?} (id={})", text, ack.id);
        Ok(ack)
    }
}

impl TicketBackend for LoggingBackend {
    fn submit_ticket(&self, ticket: &SupportTicket) -> Result<Ack, BackendError> {
        let payload = serde_json::to_string(ticket)
            .map_err(|e| BackendError::Rejected(format!("ticket not serializable: {e}")))?;
        let ack = Ack::now();
        self.submitted_tickets.set(self.submitted_tickets.get() + 1);
        info!("Support ticket {} submitted: {}", ack.id, payload);
        Ok(ack)
    }
}
