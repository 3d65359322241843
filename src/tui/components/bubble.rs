use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Who a bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Assistant,
    Student,
}

impl Speaker {
    fn title(self) -> &'static str {
        match self {
            Speaker::Assistant => " ИИ-помощник ",
            Speaker::Student => " Вы ",
        }
    }

    fn style(self) -> Style {
        match self {
            Speaker::Assistant => Style::default().fg(Color::Blue),
            Speaker::Student => Style::default().fg(Color::Green),
        }
    }
}

/// A single chat bubble: the assistant's greeting or the student's last
/// sent message.
///
/// Transient and stateless, created each frame. The parent lays bubbles
/// out with [`calculate_height`](Self::calculate_height), which predicts
/// the rendered height with `textwrap` using options that match
/// `Paragraph`'s wrapping.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub speaker: Speaker,
    pub text: &'a str,
}

impl<'a> Bubble<'a> {
    pub fn new(speaker: Speaker, text: &'a str) -> Self {
        Self { speaker, text }
    }

    /// Height needed to render `text` at `width`, borders included.
    pub fn calculate_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.speaker.style();
        let block = Block::bordered()
            .title(self.speaker.title())
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.text.trim())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Bubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(Bubble::calculate_height("Привет!", 40), 3);
    }

    #[test]
    fn test_long_text_wraps() {
        let text = "Привет! Я твой персональный тьютор. Какую тему или задачу разберём сегодня?";
        // 30 - 4 overhead = 26 columns of content
        let height = Bubble::calculate_height(text, 30);
        assert!(height >= 5, "expected at least 3 wrapped lines, got {height}");
    }

    #[test]
    fn test_empty_text_is_just_borders() {
        assert_eq!(Bubble::calculate_height("   ", 40), VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_too_narrow_still_takes_a_row() {
        assert_eq!(Bubble::calculate_height("text", 3), 1);
    }

    #[test]
    fn test_render_shows_speaker_and_text() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        Bubble::new(Speaker::Student, "hello").render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Вы"));
        assert!(text.contains("hello"));
    }
}
