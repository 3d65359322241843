//! # Suggestion Card
//!
//! A clickable prompt. Stateless: it renders a title (and an optional
//! description line) and, when activated, reports its title back to the
//! parent. The parent decides what selection means; in the conversation
//! view it replaces the draft, on the mode picker it chooses a sub-mode.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

/// Emitted when a card is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSelected(pub String);

#[derive(Clone, Copy)]
pub struct SuggestionCard<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    /// Key hint shown in the border, e.g. "Alt+1".
    pub hotkey: Option<&'a str>,
    pub highlighted: bool,
}

impl<'a> SuggestionCard<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            description: None,
            hotkey: None,
            highlighted: false,
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn hotkey(mut self, hotkey: &'a str) -> Self {
        self.hotkey = Some(hotkey);
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn select(&self) -> SuggestionSelected {
        SuggestionSelected(self.title.to_string())
    }
}

impl Widget for SuggestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.highlighted {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        if let Some(hotkey) = self.hotkey {
            block = block.title(Line::styled(format!(" {hotkey} "), border_style).right_aligned());
        }

        let title_style = if self.highlighted {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut lines = vec![Line::from(Span::styled(self.title, title_style))];
        if let Some(description) = self.description {
            lines.push(Line::from(Span::styled(
                description,
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
