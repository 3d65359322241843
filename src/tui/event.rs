use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global shortcuts (handled by the event loop)
    ForceQuit,  // Ctrl+C
    NewChat,    // Ctrl+N
    FocusNext,  // Tab
    Escape,
    Resize,

    // Routed to the focused component
    Submit, // Enter without Shift
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    PickSuggestion(usize), // Alt+1..Alt+4, zero-based
    MouseClick(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::CursorUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::CursorDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Translate a key press. Release/repeat reports (sent when the keyboard
/// enhancement protocol is active) are dropped.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    let modifiers = key_event.modifiers;
    match key_event.code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::ForceQuit)
        }
        KeyCode::Char('n') if modifiers.contains(KeyModifiers::CONTROL) => Some(TuiEvent::NewChat),
        // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
        KeyCode::Char('j') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::InputChar('\n'))
        }
        KeyCode::Char(c @ '1'..='4') if modifiers.contains(KeyModifiers::ALT) => {
            Some(TuiEvent::PickSuggestion(c as usize - '1' as usize))
        }
        KeyCode::Char(_) if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter if modifiers.contains(KeyModifiers::SHIFT) => Some(TuiEvent::InputChar('\n')),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Tab => Some(TuiEvent::FocusNext),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<TuiEvent> {
        map_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_enter_submits_and_shift_enter_inserts_newline() {
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), Some(TuiEvent::Submit));
        assert_eq!(
            press(KeyCode::Enter, KeyModifiers::SHIFT),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn test_alt_digits_pick_suggestions() {
        assert_eq!(
            press(KeyCode::Char('1'), KeyModifiers::ALT),
            Some(TuiEvent::PickSuggestion(0))
        );
        assert_eq!(
            press(KeyCode::Char('4'), KeyModifiers::ALT),
            Some(TuiEvent::PickSuggestion(3))
        );
        assert_eq!(press(KeyCode::Char('5'), KeyModifiers::ALT), None);
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            press(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Some(TuiEvent::NewChat)
        );
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn test_cyrillic_and_shifted_chars_are_input() {
        assert_eq!(
            press(KeyCode::Char('ж'), KeyModifiers::NONE),
            Some(TuiEvent::InputChar('ж'))
        );
        assert_eq!(
            press(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
