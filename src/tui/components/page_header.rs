//! # PageHeader Component
//!
//! Top bar of the page: product title, tagline and the status message.
//!
//! Stateless; the status message is a prop copied from `App` each frame.
//! It shows delivery results ("Обращение отправлено ...") and backend
//! errors, and is cleared by navigation.
//!
//! ```text
//!  AI-помощник для учебы | Обращение отправлено (№ 1a2b3c4d)
//!  Решай задачи, пиши конспекты и проходи тесты — всё в одном месте
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::content::{PAGE_SUBTITLE, PAGE_TITLE};
use crate::tui::component::Component;

/// Rows taken by the header, bottom border included.
pub const PAGE_HEADER_HEIGHT: u16 = 3;

pub struct PageHeader<'a> {
    pub status_message: &'a str,
}

impl<'a> PageHeader<'a> {
    pub fn new(status_message: &'a str) -> Self {
        Self { status_message }
    }
}

impl Component for PageHeader<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut title = vec![Span::styled(
            format!(" {PAGE_TITLE}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            title.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            title.push(Span::styled(
                self.status_message.to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }

        let lines = vec![
            Line::from(title),
            Line::styled(format!(" {PAGE_SUBTITLE}"), Style::default().fg(Color::DarkGray)),
        ];
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
