//! # Composer Component
//!
//! Multi-line message input at the bottom of the conversation view.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste and editing keys
//! - Enter sends, Shift+Enter (or Ctrl+J) inserts a newline
//! - Refuse to send while the trimmed draft is empty
//! - Show a placeholder when empty and a send hint that dims while disabled
//!
//! ## State Management
//!
//! The draft buffer is internal state owned by the chat area. Whether the
//! composer has keyboard focus is a prop set by the parent each frame.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::content::COMPOSER_PLACEHOLDER;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, VisualLine, cursor_location, inner_width, layout_lines,
    next_char_boundary, offset_at_column, prev_char_boundary,
};

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// Draft sent (Enter pressed with non-blank text). The buffer is already cleared.
    Send(String),
    /// Text or cursor changed.
    ContentChanged,
}

/// Draft editor.
///
/// # Props
///
/// - `focused`: whether keystrokes are routed here (draws the cursor)
///
/// # State
///
/// - `buffer`: the draft
/// - `cursor`: byte offset into `buffer`
/// - `scroll_offset`: first visible visual line
pub struct Composer {
    /// Draft text (Internal State)
    pub buffer: String,
    /// Whether the composer has keyboard focus (Prop)
    pub focused: bool,
    cursor: usize,
    scroll_offset: u16,
    /// Inner width from the last render, used for vertical cursor movement
    last_width: u16,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: false,
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Send is enabled only for drafts with non-whitespace content.
    pub fn can_send(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Replace the draft (suggestion card click). Cursor goes to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Height needed for the current draft, clamped to the visible line limit.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = layout_lines(&self.buffer, inner_width(area_width)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn lines(&self) -> Vec<VisualLine> {
        layout_lines(&self.buffer, self.last_width)
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn move_vertically(&mut self, down: bool) -> bool {
        let lines = self.lines();
        let (row, column) = cursor_location(&self.buffer, &lines, self.cursor);
        let target = if down {
            row + 1
        } else {
            match row.checked_sub(1) {
                Some(r) => r,
                None => return false,
            }
        };
        match lines.get(target) {
            Some(&line) => {
                self.cursor = offset_at_column(&self.buffer, line, column);
                true
            }
            None => false,
        }
    }

    fn update_scroll_offset(&mut self, lines: &[VisualLine]) {
        if lines.len() as u16 <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }
        let (row, _) = cursor_location(&self.buffer, lines, self.cursor);
        let row = row as u16;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_width = inner_width(area.width).max(1);
        let lines = self.lines();
        self.update_scroll_offset(&lines);

        let hint_style = if self.can_send() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Сообщение ")
            .title_bottom(
                Line::styled(" Enter ➤ отправить · Shift+Enter перенос ", hint_style).right_aligned(),
            );

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(COMPOSER_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            let visible: Vec<Line> = lines
                .iter()
                .skip(self.scroll_offset as usize)
                .take(MAX_VISIBLE_LINES as usize)
                .map(|l| Line::raw(&self.buffer[l.start..l.end]))
                .collect();
            Paragraph::new(visible)
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let (row, column) = cursor_location(&self.buffer, &lines, self.cursor);
            let max_column = self.last_width.saturating_sub(1);
            let x = area.x + 1 + (column as u16).min(max_column);
            let y = area.y + 1 + (row as u16).saturating_sub(self.scroll_offset);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp));
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals may deliver pasted line breaks as CRLF.
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&text);
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                ComposerEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                ComposerEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                ComposerEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                ComposerEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    ComposerEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    ComposerEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .move_vertically(false)
                .then_some(ComposerEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .move_vertically(true)
                .then_some(ComposerEvent::ContentChanged),
            TuiEvent::Submit => {
                if !self.can_send() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.clear();
                Some(ComposerEvent::Send(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(composer: &mut Composer, text: &str) {
        for c in text.chars() {
            composer.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut composer = Composer::new();
        type_text(&mut composer, "ab");
        assert_eq!(composer.buffer, "ab");

        let res = composer.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(ComposerEvent::ContentChanged));
        assert_eq!(composer.buffer, "a");
    }

    #[test]
    fn test_enter_sends_and_clears() {
        let mut composer = Composer::new();
        type_text(&mut composer, "hello");

        let res = composer.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(ComposerEvent::Send("hello".to_string())));
        assert!(composer.buffer.is_empty(), "Buffer should be cleared after send");
        assert!(!composer.can_send());
    }

    #[test]
    fn test_blank_draft_cannot_be_sent() {
        let mut composer = Composer::new();
        assert_eq!(composer.handle_event(&TuiEvent::Submit), None);

        type_text(&mut composer, "  \n ");
        assert!(!composer.can_send());
        assert_eq!(composer.handle_event(&TuiEvent::Submit), None);
        assert_eq!(composer.buffer, "  \n ", "blank draft stays in place");
    }

    #[test]
    fn test_newline_char_does_not_send() {
        let mut composer = Composer::new();
        type_text(&mut composer, "a");
        composer.handle_event(&TuiEvent::InputChar('\n'));
        type_text(&mut composer, "b");
        assert_eq!(composer.buffer, "a\nb");
    }

    #[test]
    fn test_set_text_replaces_draft_and_moves_cursor_to_end() {
        let mut composer = Composer::new();
        type_text(&mut composer, "old");
        composer.set_text("Что такое фотосинтез?");
        assert_eq!(composer.buffer, "Что такое фотосинтез?");

        type_text(&mut composer, "!");
        assert_eq!(composer.buffer, "Что такое фотосинтез?!");
    }

    #[test]
    fn test_editing_in_the_middle_of_cyrillic_text() {
        let mut composer = Composer::new();
        type_text(&mut composer, "мир");
        composer.handle_event(&TuiEvent::CursorHome);
        type_text(&mut composer, "о");
        composer.handle_event(&TuiEvent::CursorEnd);
        composer.handle_event(&TuiEvent::CursorLeft);
        composer.handle_event(&TuiEvent::Delete);
        assert_eq!(composer.buffer, "оми");
    }

    #[test]
    fn test_vertical_movement_between_lines() {
        let mut composer = Composer::new();
        type_text(&mut composer, "abc\nd");
        assert_eq!(
            composer.handle_event(&TuiEvent::CursorUp),
            Some(ComposerEvent::ContentChanged)
        );
        type_text(&mut composer, "X");
        assert_eq!(composer.buffer, "aXbc\nd");
        assert_eq!(composer.handle_event(&TuiEvent::CursorUp), None);
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut composer = Composer::new();
        composer.handle_event(&TuiEvent::Paste("a\r\nb".to_string()));
        assert_eq!(composer.buffer, "a\nb");
    }

    #[test]
    fn test_height_grows_and_clamps() {
        let mut composer = Composer::new();
        assert_eq!(composer.calculate_height(40), 3);
        composer.set_text("1\n2\n3");
        assert_eq!(composer.calculate_height(40), 5);
        composer.set_text("1\n2\n3\n4\n5\n6\n7");
        assert_eq!(composer.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut composer = Composer::new();

        terminal.draw(|f| composer.render(f, f.area())).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Напишите ваш вопрос..."));
    }
}
