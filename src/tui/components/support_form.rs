//! # Support Form Component
//!
//! Shown instead of the conversation when the support mode is active.
//! Name and email come pre-filled from the profile; topic and description
//! start empty and gate the submit button. An attachment is chosen by
//! typing a path and pressing Enter, which records the file's name and size.
//!
//! Keys: Up/Down move between fields, Left/Right cycle the topic,
//! Enter advances (or submits on the button), Shift+Enter breaks a line
//! in the description.

use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::support::{Attachment, SupportForm, SupportTicket, SupportTopic};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const DESCRIPTION_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Topic,
    Description,
    Attachment,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Topic,
        FormField::Description,
        FormField::Attachment,
        FormField::Submit,
    ];

    fn step(self, forward: bool) -> FormField {
        let i = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        let next = if forward {
            (i + 1).min(Self::ORDER.len() - 1)
        } else {
            i.saturating_sub(1)
        };
        Self::ORDER[next]
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Name => "Ваше имя",
            FormField::Email => "Email для ответа",
            FormField::Topic => "Тема обращения",
            FormField::Description => "Описание проблемы",
            FormField::Attachment => "Прикрепить файл (скриншот, документ)",
            FormField::Submit => "Отправить обращение",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SupportFormEvent {
    /// Submit pressed on a complete form.
    Submit(SupportTicket),
    /// A field changed.
    Edited,
}

pub struct SupportFormState {
    pub form: SupportForm,
    pub field: FormField,
    /// Path typed into the attachment field, resolved on Enter.
    pub attachment_path: String,
    pub attachment_error: Option<String>,
}

impl SupportFormState {
    pub fn new(form: SupportForm) -> Self {
        Self {
            form,
            field: FormField::Name,
            attachment_path: String::new(),
            attachment_error: None,
        }
    }

    /// Back to a blank form after a ticket went through.
    pub fn reset(&mut self, form: SupportForm) {
        *self = Self::new(form);
    }

    fn text_field(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.form.name),
            FormField::Email => Some(&mut self.form.email),
            FormField::Description => Some(&mut self.form.description),
            FormField::Attachment => Some(&mut self.attachment_path),
            FormField::Topic | FormField::Submit => None,
        }
    }

    fn attach(&mut self) {
        let path = self.attachment_path.trim();
        if path.is_empty() {
            self.form.attachment = None;
            self.attachment_error = None;
            return;
        }
        match Attachment::from_path(Path::new(path)) {
            Ok(attachment) => {
                log::info!(
                    "Attached {} ({} bytes)",
                    attachment.file_name,
                    attachment.size_bytes
                );
                self.form.attachment = Some(attachment);
                self.attachment_error = None;
            }
            Err(e) => {
                log::warn!("Attachment rejected: {}", e);
                self.form.attachment = None;
                self.attachment_error = Some(e.to_string());
            }
        }
    }
}

/// Transient wrapper created per frame.
pub struct SupportFormView<'a> {
    state: &'a mut SupportFormState,
    focused: bool,
}

impl<'a> SupportFormView<'a> {
    pub fn new(state: &'a mut SupportFormState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn label_line(&self, field: FormField) -> Line<'static> {
        let active = self.focused && self.state.field == field;
        let marker = if active { "› " } else { "  " };
        let style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
        };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(field.label(), style),
        ])
    }

    fn value_line(value: &str, placeholder: &str) -> Line<'static> {
        if value.is_empty() {
            Line::styled(
                format!("    {placeholder}"),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Line::raw(format!("    {value}"))
        }
    }

    fn submit_line(&self) -> Line<'static> {
        let enabled = self.state.form.can_submit();
        let mut style = if enabled {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };
        if self.focused && self.state.field == FormField::Submit {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let marker = if self.focused && self.state.field == FormField::Submit {
            "› "
        } else {
            "  "
        };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(format!("[ {} ]", FormField::Submit.label()), style),
        ])
    }
}

impl Component for SupportFormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let form = &self.state.form;
        let mut lines: Vec<Line> = Vec::new();
        // (line index, column) of the text cursor for the active field
        let mut cursor: Option<(usize, usize)> = None;

        for field in [FormField::Name, FormField::Email] {
            lines.push(self.label_line(field));
            let value = match field {
                FormField::Name => &form.name,
                _ => &form.email,
            };
            if self.state.field == field {
                cursor = Some((lines.len(), 4 + value.width()));
            }
            lines.push(Self::value_line(value, ""));
        }

        lines.push(self.label_line(FormField::Topic));
        let topic = form.topic.map(SupportTopic::label).unwrap_or("Выберите тему");
        let topic_style = if form.topic.is_some() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::raw("    ◂ "),
            Span::styled(topic, topic_style),
            Span::raw(" ▸"),
        ]));

        lines.push(self.label_line(FormField::Description));
        if form.description.is_empty() {
            if self.state.field == FormField::Description {
                cursor = Some((lines.len(), 4));
            }
            lines.push(Self::value_line("", "Подробно опишите вашу проблему..."));
            for _ in 1..DESCRIPTION_LINES {
                lines.push(Line::raw(""));
            }
        } else {
            let described: Vec<&str> = form.description.split('\n').collect();
            let shown = described.len().saturating_sub(DESCRIPTION_LINES);
            for (i, text) in described.iter().skip(shown).enumerate() {
                if self.state.field == FormField::Description && shown + i == described.len() - 1 {
                    cursor = Some((lines.len(), 4 + text.width()));
                }
                lines.push(Self::value_line(text, ""));
            }
            for _ in described.len().min(DESCRIPTION_LINES)..DESCRIPTION_LINES {
                lines.push(Line::raw(""));
            }
        }

        lines.push(self.label_line(FormField::Attachment));
        if self.state.field == FormField::Attachment {
            cursor = Some((lines.len(), 4 + self.state.attachment_path.width()));
        }
        lines.push(Self::value_line(
            &self.state.attachment_path,
            "Путь к файлу, Enter чтобы выбрать",
        ));
        match (&form.attachment, &self.state.attachment_error) {
            (_, Some(err)) => lines.push(Line::styled(
                format!("    {err}"),
                Style::default().fg(Color::Red),
            )),
            (Some(file), None) => lines.push(Line::styled(
                format!("    📎 {} ({} байт)", file.file_name, file.size_bytes),
                Style::default().fg(Color::Green),
            )),
            (None, None) => lines.push(Line::raw("")),
        }

        lines.push(Line::raw(""));
        lines.push(self.submit_line());

        frame.render_widget(Paragraph::new(lines), area);

        if self.focused
            && let Some((row, column)) = cursor
            && (row as u16) < area.height
        {
            let x = area.x + (column as u16).min(area.width.saturating_sub(1));
            frame.set_cursor_position((x, area.y + row as u16));
        }
    }
}

impl EventHandler for SupportFormView<'_> {
    type Event = SupportFormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let state = &mut *self.state;
        match (state.field, event) {
            (_, TuiEvent::CursorUp) => {
                state.field = state.field.step(false);
                None
            }
            (_, TuiEvent::CursorDown) => {
                state.field = state.field.step(true);
                None
            }
            (FormField::Topic, TuiEvent::CursorLeft) => {
                state.form.topic = Some(SupportTopic::cycle(state.form.topic, false));
                Some(SupportFormEvent::Edited)
            }
            (FormField::Topic, TuiEvent::CursorRight | TuiEvent::Submit) => {
                state.form.topic = Some(SupportTopic::cycle(state.form.topic, true));
                Some(SupportFormEvent::Edited)
            }
            (FormField::Attachment, TuiEvent::Submit) => {
                state.attach();
                Some(SupportFormEvent::Edited)
            }
            (FormField::Submit, TuiEvent::Submit) => {
                let ticket = state.form.to_ticket();
                if ticket.is_none() {
                    log::debug!("Submit ignored: topic or description missing");
                }
                ticket.map(SupportFormEvent::Submit)
            }
            (_, TuiEvent::Submit) => {
                state.field = state.field.step(true);
                None
            }
            (FormField::Description, TuiEvent::InputChar(c)) => {
                state.form.description.push(*c);
                Some(SupportFormEvent::Edited)
            }
            (_, TuiEvent::InputChar('\n')) => None,
            (_, TuiEvent::InputChar(c)) => {
                let text = state.text_field()?;
                text.push(*c);
                Some(SupportFormEvent::Edited)
            }
            (_, TuiEvent::Paste(pasted)) => {
                let multiline = state.field == FormField::Description;
                let text = state.text_field()?;
                if multiline {
                    text.push_str(&pasted.replace("\r\n", "\n").replace('\r', "\n"));
                } else {
                    text.push_str(pasted.lines().next().unwrap_or_default());
                }
                Some(SupportFormEvent::Edited)
            }
            (_, TuiEvent::Backspace) => {
                let text = state.text_field()?;
                text.pop()?;
                Some(SupportFormEvent::Edited)
            }
            _ => None,
        }
    }
}
