//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::backend::{Ack, BackendError, MessageBackend, TicketBackend};
use crate::core::history::StaticHistory;
use crate::core::state::{App, Profile};
use crate::core::support::SupportTicket;

/// A backend that refuses every call.
pub struct FailingBackend;

impl MessageBackend for FailingBackend {
    fn send_message(&self, _text: &str) -> Result<Ack, BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }
}

impl TicketBackend for FailingBackend {
    fn submit_ticket(&self, _ticket: &SupportTicket) -> Result<Ack, BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }
}

/// Creates a test App with the built-in history and default profile.
pub fn test_app() -> App {
    App::new(Box::new(StaticHistory::builtin()), Profile::default())
}

/// Collects the rendered terminal buffer into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

/// Rendered buffer as one string per terminal row.
pub fn buffer_lines(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        })
        .collect()
}
