//! # Actions
//!
//! Everything that can happen on the page becomes an `Action`.
//! User clicks a mode button? That's `Action::SelectMode(mode)`.
//! Presses Enter in the composer? That's `Action::SendMessage(text)`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing the I/O the caller has to perform.
//! No side effects happen inside `update`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                              │
//!                       dispatch() runs it ◀───┘ (backend call, result fed back)
//! ```

use log::{debug, info, warn};

use crate::core::backend::{Ack, BackendError, MessageBackend, TicketBackend};
use crate::core::mode::{Mode, SubMode};
use crate::core::state::App;
use crate::core::support::SupportTicket;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sidebar mode button.
    SelectMode(Mode),
    /// Sidebar selector or mode picker card.
    SelectSubMode(SubMode),
    /// Sidebar history row, by entry id.
    SelectHistoryEntry(String),
    /// "+ Новый диалог".
    StartNewChat,
    SendMessage(String),
    SubmitTicket(SupportTicket),
    MessageSent(Ack),
    TicketSubmitted(Ack),
    BackendFailed(BackendError),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    DeliverMessage(String),
    DeliverTicket(SupportTicket),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::SelectMode(mode) => {
            app.navigator.select_mode(mode);
            app.status_message.clear();
            Effect::None
        }
        Action::SelectSubMode(sub_mode) => {
            if let Err(e) = app.navigator.select_sub_mode(sub_mode) {
                warn!("Ignoring sub-mode selection: {}", e);
            }
            Effect::None
        }
        Action::SelectHistoryEntry(id) => {
            match app.history.find(&id) {
                Some(entry) => {
                    info!("Opening history entry {} ({:?})", entry.id, entry.mode);
                    app.navigator.select_history_entry(entry);
                    app.status_message.clear();
                }
                None => warn!("Unknown history entry: {}", id),
            }
            Effect::None
        }
        Action::StartNewChat => {
            app.navigator.start_new_chat();
            app.status_message.clear();
            Effect::None
        }
        Action::SendMessage(text) => {
            if text.trim().is_empty() {
                return Effect::None;
            }
            Effect::DeliverMessage(text)
        }
        Action::SubmitTicket(ticket) => Effect::DeliverTicket(ticket),
        Action::MessageSent(ack) => {
            debug!("Message acknowledged: {}", ack.id);
            Effect::None
        }
        Action::TicketSubmitted(ack) => {
            app.status_message = format!("Обращение отправлено (№ {})", short_id(&ack.id));
            Effect::None
        }
        Action::BackendFailed(e) => {
            warn!("Backend call failed: {}", e);
            app.status_message = format!("Ошибка отправки: {e}");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// What a dispatched action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or not); nothing was sent anywhere.
    Idle,
    /// A message or ticket was acknowledged by the backend.
    Delivered,
    /// The backend refused or was unreachable; see `App::status_message`.
    Failed,
    Quit,
}

/// Run `action` through `update` and perform the resulting effect against
/// `backend`, feeding the outcome back in as a follow-up action.
pub fn dispatch<B>(app: &mut App, action: Action, backend: &B) -> Outcome
where
    B: MessageBackend + TicketBackend,
{
    let mut outcome = Outcome::Idle;
    let mut next = Some(action);
    while let Some(action) = next.take() {
        next = match update(app, action) {
            Effect::None => None,
            Effect::Quit => return Outcome::Quit,
            Effect::DeliverMessage(text) => Some(match backend.send_message(&text) {
                Ok(ack) => {
                    outcome = Outcome::Delivered;
                    Action::MessageSent(ack)
                }
                Err(e) => {
                    outcome = Outcome::Failed;
                    Action::BackendFailed(e)
                }
            }),
            Effect::DeliverTicket(ticket) => Some(match backend.submit_ticket(&ticket) {
                Ok(ack) => {
                    outcome = Outcome::Delivered;
                    Action::TicketSubmitted(ack)
                }
                Err(e) => {
                    outcome = Outcome::Failed;
                    Action::BackendFailed(e)
                }
            }),
        };
    }
    outcome
}

fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
