//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page,
//! and translates terminal events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! ```text
//! crossterm ─▶ TuiEvent ─▶ handle_event ─┬─▶ Sidebar  ─▶ SidebarEvent  ─┐
//!                                         └─▶ ChatArea ─▶ ChatAreaEvent ─┴─▶ Action ─▶ dispatch
//! ```
//!
//! Global keys (Ctrl+C, Ctrl+N, Tab, Esc) are handled here; everything
//! else goes to the focused column. Mouse clicks focus the column they
//! land in first.
//!
//! ## Redraw Strategy
//!
//! Nothing on the page animates, so the loop sleeps up to 500ms waiting
//! for input and only redraws after an event arrived.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};

use crate::core::action::{Action, Outcome, dispatch};
use crate::core::backend::{LoggingBackend, MessageBackend, TicketBackend};
use crate::core::config::ResolvedConfig;
use crate::core::mode::SubMode;
use crate::core::navigation::NavigationState;
use crate::core::state::App;
use crate::core::support::SupportForm;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChatArea, ChatAreaEvent, ChatAreaState, Sidebar, SidebarEvent, SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which column receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Main,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub sidebar: SidebarState,
    pub chat_area: ChatAreaState,
    // Layout from the last frame, for mouse routing
    pub sidebar_area: Rect,
    pub main_area: Rect,
}

impl TuiState {
    pub fn new(form: SupportForm) -> Self {
        Self {
            focus: Focus::Sidebar,
            sidebar: SidebarState::new(),
            chat_area: ChatAreaState::new(form),
            sidebar_area: Rect::default(),
            main_area: Rect::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter;
        // terminals without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Route one terminal event. Returns `true` when the app should quit.
pub fn handle_event<B>(app: &mut App, tui: &mut TuiState, event: &TuiEvent, backend: &B) -> bool
where
    B: MessageBackend + TicketBackend,
{
    match event {
        TuiEvent::ForceQuit => return dispatch(app, Action::Quit, backend) == Outcome::Quit,
        TuiEvent::Resize => return false,
        TuiEvent::NewChat => {
            start_new_chat(app, tui, backend);
            return false;
        }
        TuiEvent::FocusNext => {
            tui.focus = match tui.focus {
                Focus::Sidebar => Focus::Main,
                Focus::Main => Focus::Sidebar,
            };
            return false;
        }
        TuiEvent::Escape => {
            tui.focus = Focus::Sidebar;
            return false;
        }
        TuiEvent::MouseClick(col, row) => {
            let position = Position::new(*col, *row);
            if tui.sidebar_area.contains(position) {
                tui.focus = Focus::Sidebar;
            } else if tui.main_area.contains(position) {
                tui.focus = Focus::Main;
            } else {
                return false;
            }
        }
        _ => {}
    }

    // Suggestion hotkeys reach the chat area from either column.
    let target = if matches!(event, TuiEvent::PickSuggestion(_)) {
        Focus::Main
    } else {
        tui.focus
    };
    let before = layout_key(app, tui);

    match target {
        Focus::Sidebar => {
            let sidebar_event = Sidebar::new(&mut tui.sidebar, app, true).handle_event(event);
            if let Some(sidebar_event) = sidebar_event {
                debug!("Sidebar event: {:?}", sidebar_event);
                on_sidebar_event(app, tui, sidebar_event, backend);
            }
        }
        Focus::Main => {
            let chat_event =
                ChatArea::new(&mut tui.chat_area, app.navigator.state(), true).handle_event(event);
            if let Some(chat_event) = chat_event {
                debug!("Chat area event: {:?}", chat_event);
                on_chat_area_event(app, tui, chat_event, backend);
            }
        }
    }
    if layout_key(app, tui) != before {
        forget_layout(tui);
    }
    false
}

/// What decides where rows and cards land on screen.
fn layout_key(app: &App, tui: &TuiState) -> (NavigationState, bool, Option<String>) {
    (
        *app.navigator.state(),
        tui.sidebar.show_all_history,
        tui.chat_area.echoed.clone(),
    )
}

/// Hit-test caches describe the last frame; once the view changes, a click
/// must wait for the next draw instead of landing on a stale row or card.
fn forget_layout(tui: &mut TuiState) {
    tui.sidebar.forget_layout();
    tui.chat_area.forget_layout();
}

fn start_new_chat<B>(app: &mut App, tui: &mut TuiState, backend: &B)
where
    B: MessageBackend + TicketBackend,
{
    dispatch(app, Action::StartNewChat, backend);
    tui.chat_area.reset_conversation();
    forget_layout(tui);
}

fn on_sidebar_event<B>(app: &mut App, tui: &mut TuiState, event: SidebarEvent, backend: &B)
where
    B: MessageBackend + TicketBackend,
{
    match event {
        SidebarEvent::NewChat => start_new_chat(app, tui, backend),
        SidebarEvent::SelectMode(mode) => {
            dispatch(app, Action::SelectMode(mode), backend);
        }
        SidebarEvent::CycleSubMode => {
            let next = SubMode::cycle(app.navigator.state().sub_mode());
            dispatch(app, Action::SelectSubMode(next), backend);
        }
        SidebarEvent::SelectHistory(id) => {
            dispatch(app, Action::SelectHistoryEntry(id), backend);
        }
    }
}

fn on_chat_area_event<B>(app: &mut App, tui: &mut TuiState, event: ChatAreaEvent, backend: &B)
where
    B: MessageBackend + TicketBackend,
{
    match event {
        ChatAreaEvent::SelectSubMode(sub_mode) => {
            dispatch(app, Action::SelectSubMode(sub_mode), backend);
        }
        ChatAreaEvent::Send(text) => {
            dispatch(app, Action::SendMessage(text), backend);
        }
        ChatAreaEvent::SubmitTicket(ticket) => {
            if dispatch(app, Action::SubmitTicket(ticket), backend) == Outcome::Delivered {
                tui.chat_area.support.reset(app.profile.blank_form());
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(app.profile.blank_form());
    let backend = LoggingBackend::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw.
        // A click behind other events is hit-tested against a fresh frame.
        let mut should_quit = false;
        let mut handled_since_draw = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handled_since_draw && matches!(event, TuiEvent::MouseClick(..)) {
                terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            }
            handled_since_draw = true;
            if handle_event(&mut app, &mut tui, &event, &backend) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!(
        "Shutting down: {} messages sent, {} tickets submitted",
        backend.sent_messages(),
        backend.submitted_tickets()
    );
    ratatui::restore();
    Ok(())
}
