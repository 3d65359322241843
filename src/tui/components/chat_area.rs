//! # Chat Area Component
//!
//! Right-hand column. Renders a header for the current view and then
//! exactly one of:
//!
//! - the support form (mode = support)
//! - the mode picker (chat mode without a sub-mode)
//! - the conversation view: greeting bubble, the last sent message,
//!   suggestion cards and the composer
//!
//! ```text
//! ┌ ChatArea ──────────────────────────────┐
//! │ Header text                            │
//! │ subtitle                               │
//! ├────────────────────────────────────────┤
//! │ SupportFormView | picker cards |       │
//! │   Bubble(greeting)                     │
//! │   Bubble(echo)                         │
//! │   SuggestionCard x4 (2x2)              │
//! │   Composer                             │
//! └────────────────────────────────────────┘
//! ```
//!
//! `ChatAreaState` owns the draft, the echoed bubble and the support form,
//! so they persist across mode switches. `ChatArea` wraps it per frame
//! together with the navigation state it renders from.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::content::{MODE_PICKER_PROMPT, sub_mode_description};
use crate::core::mode::{Mode, SubMode};
use crate::core::navigation::NavigationState;
use crate::core::support::{SupportForm, SupportTicket};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::bubble::{Bubble, Speaker};
use crate::tui::components::composer::{Composer, ComposerEvent};
use crate::tui::components::suggestion_card::{SuggestionCard, SuggestionSelected};
use crate::tui::components::support_form::{SupportFormEvent, SupportFormState, SupportFormView};
use crate::tui::event::TuiEvent;

const HEADER_HEIGHT: u16 = 3;
const PICKER_CARD_HEIGHT: u16 = 5;
const SUGGESTION_CARD_HEIGHT: u16 = 3;
const SUGGESTION_HOTKEYS: [&str; 4] = ["Alt+1", "Alt+2", "Alt+3", "Alt+4"];
const PICKER_HOTKEYS: [&str; 2] = ["1", "2"];

/// Events the page turns into core actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAreaEvent {
    SelectSubMode(SubMode),
    Send(String),
    SubmitTicket(SupportTicket),
}

/// A clickable card from the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardTarget {
    SubMode(SubMode),
    Suggestion(usize),
}

/// Persistent chat area state.
pub struct ChatAreaState {
    pub composer: Composer,
    /// The last message the student sent, shown as a bubble.
    pub echoed: Option<String>,
    pub support: SupportFormState,
    /// Card under the cursor on the mode picker.
    pub picker_cursor: SubMode,
    card_rects: Vec<(Rect, CardTarget)>,
}

impl ChatAreaState {
    pub fn new(form: SupportForm) -> Self {
        Self {
            composer: Composer::new(),
            echoed: None,
            support: SupportFormState::new(form),
            picker_cursor: SubMode::Information,
            card_rects: Vec::new(),
        }
    }

    /// "+ Новый диалог": forget the echoed bubble. The draft stays.
    pub fn reset_conversation(&mut self) {
        self.echoed = None;
        self.picker_cursor = SubMode::Information;
    }

    /// Drop the card rects from the last frame. Clicks miss until the next draw.
    pub fn forget_layout(&mut self) {
        self.card_rects.clear();
    }

    fn card_at(&self, col: u16, row: u16) -> Option<CardTarget> {
        self.card_rects
            .iter()
            .find(|(rect, _)| rect.contains(Position::new(col, row)))
            .map(|(_, target)| *target)
    }
}

/// Transient wrapper for rendering and input.
pub struct ChatArea<'a> {
    state: &'a mut ChatAreaState,
    nav: &'a NavigationState,
    focused: bool,
}

impl<'a> ChatArea<'a> {
    pub fn new(state: &'a mut ChatAreaState, nav: &'a NavigationState, focused: bool) -> Self {
        Self {
            state,
            nav,
            focused,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let lines = vec![
            Line::styled(
                format!(" {}", self.nav.header_text()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!(" {}", self.nav.header_subtitle()),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_picker(&mut self, frame: &mut Frame, area: Rect) {
        let [prompt_area, cards_area, _] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(PICKER_CARD_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::styled(
                format!(" {MODE_PICKER_PROMPT}"),
                Style::default().fg(Color::Gray),
            )),
            prompt_area,
        );

        let columns: [Rect; 2] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .spacing(1)
                .areas(cards_area);
        for ((sub_mode, rect), hotkey) in SubMode::ALL.iter().zip(columns).zip(PICKER_HOTKEYS) {
            let card = SuggestionCard::new(sub_mode.label())
                .description(sub_mode_description(*sub_mode))
                .hotkey(hotkey)
                .highlighted(self.focused && self.state.picker_cursor == *sub_mode);
            frame.render_widget(card, rect);
            self.state.card_rects.push((rect, CardTarget::SubMode(*sub_mode)));
        }
    }

    fn render_conversation(&mut self, frame: &mut Frame, area: Rect) {
        let suggestions = self.nav.suggestion_list();
        let grid_rows = suggestions.len().div_ceil(2) as u16;
        let composer_height = self.state.composer.calculate_height(area.width);

        let [messages_area, grid_area, composer_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(grid_rows * SUGGESTION_CARD_HEIGHT),
            Constraint::Length(composer_height),
        ])
        .areas(area);

        let mut bubbles = Vec::new();
        let greeting = self.nav.greeting_text();
        if !greeting.is_empty() {
            bubbles.push(Bubble::new(Speaker::Assistant, greeting));
        }
        if let Some(echoed) = self.state.echoed.as_deref() {
            bubbles.push(Bubble::new(Speaker::Student, echoed));
        }
        let mut y = messages_area.y;
        for bubble in bubbles {
            let remaining = messages_area.bottom().saturating_sub(y);
            if remaining == 0 {
                break;
            }
            let height = Bubble::calculate_height(bubble.text, messages_area.width).min(remaining);
            frame.render_widget(bubble, Rect::new(messages_area.x, y, messages_area.width, height));
            y += height;
        }

        let rows = Layout::vertical(vec![Constraint::Length(SUGGESTION_CARD_HEIGHT); grid_rows as usize])
            .split(grid_area);
        for (i, title) in suggestions.iter().enumerate() {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .spacing(1)
                    .areas(rows[i / 2]);
            let rect = if i % 2 == 0 { left } else { right };
            let mut card = SuggestionCard::new(title);
            if let Some(hotkey) = SUGGESTION_HOTKEYS.get(i) {
                card = card.hotkey(hotkey);
            }
            frame.render_widget(card, rect);
            self.state.card_rects.push((rect, CardTarget::Suggestion(i)));
        }

        self.state.composer.focused = self.focused;
        self.state.composer.render(frame, composer_area);
    }

    fn pick_suggestion(&mut self, index: usize) {
        if let Some(title) = self.nav.suggestion_list().get(index) {
            let SuggestionSelected(text) = SuggestionCard::new(title).select();
            self.state.composer.set_text(&text);
        }
    }

    fn activate(&mut self, target: CardTarget) -> Option<ChatAreaEvent> {
        match target {
            CardTarget::SubMode(sub_mode) => {
                self.state.picker_cursor = sub_mode;
                Some(ChatAreaEvent::SelectSubMode(sub_mode))
            }
            CardTarget::Suggestion(index) => {
                self.pick_suggestion(index);
                None
            }
        }
    }

    fn handle_picker(&mut self, event: &TuiEvent) -> Option<ChatAreaEvent> {
        match event {
            TuiEvent::CursorLeft | TuiEvent::CursorRight => {
                self.state.picker_cursor = match self.state.picker_cursor {
                    SubMode::Information => SubMode::Text,
                    SubMode::Text => SubMode::Information,
                };
                None
            }
            TuiEvent::Submit => Some(ChatAreaEvent::SelectSubMode(self.state.picker_cursor)),
            TuiEvent::InputChar('1') => self.activate(CardTarget::SubMode(SubMode::Information)),
            TuiEvent::InputChar('2') => self.activate(CardTarget::SubMode(SubMode::Text)),
            _ => None,
        }
    }

    fn handle_conversation(&mut self, event: &TuiEvent) -> Option<ChatAreaEvent> {
        if let TuiEvent::PickSuggestion(index) = event {
            self.pick_suggestion(*index);
            return None;
        }
        match self.state.composer.handle_event(event)? {
            ComposerEvent::Send(text) => {
                self.state.echoed = Some(text.clone());
                Some(ChatAreaEvent::Send(text))
            }
            ComposerEvent::ContentChanged => None,
        }
    }
}

impl Component for ChatArea<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.card_rects.clear();
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);
        self.render_header(frame, header_area);

        let body_area = body_area.inner(ratatui::layout::Margin::new(1, 1));
        if self.nav.mode() == Mode::Support {
            SupportFormView::new(&mut self.state.support, self.focused).render(frame, body_area);
        } else if self.nav.show_mode_picker() {
            self.render_picker(frame, body_area);
        } else {
            self.render_conversation(frame, body_area);
        }
    }
}

impl EventHandler for ChatArea<'_> {
    type Event = ChatAreaEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if let TuiEvent::MouseClick(col, row) = event {
            let target = self.state.card_at(*col, *row)?;
            return self.activate(target);
        }

        if self.nav.mode() == Mode::Support {
            return match SupportFormView::new(&mut self.state.support, true).handle_event(event)? {
                SupportFormEvent::Submit(ticket) => Some(ChatAreaEvent::SubmitTicket(ticket)),
                SupportFormEvent::Edited => None,
            };
        }
        if self.nav.show_mode_picker() {
            self.handle_picker(event)
        } else {
            self.handle_conversation(event)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::support::SupportTopic;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn nav(mode: Mode, sub_mode: Option<SubMode>) -> NavigationState {
        let mut nav = NavigationState::new();
        nav.select_mode(mode);
        if let Some(sub) = sub_mode {
            nav.select_sub_mode(sub).unwrap();
        }
        nav
    }

    fn render(state: &mut ChatAreaState, nav: &NavigationState) -> String {
        let backend = TestBackend::new(100, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ChatArea::new(state, nav, true).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn type_text(area: &mut ChatArea, text: &str) {
        for c in text.chars() {
            area.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_mode_picker_is_shown_for_chat_without_sub_mode() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let text = render(&mut state, &NavigationState::new());
        assert!(text.contains(MODE_PICKER_PROMPT));
        assert!(text.contains("Работа с информацией"));
        assert!(text.contains("Работа с текстом"));
        assert!(!text.contains("Напишите ваш вопрос..."));
    }

    #[test]
    fn test_picker_keys_choose_a_sub_mode() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let nav = NavigationState::new();
        let mut area = ChatArea::new(&mut state, &nav, true);
        assert_eq!(
            area.handle_event(&TuiEvent::InputChar('2')),
            Some(ChatAreaEvent::SelectSubMode(SubMode::Text))
        );
        area.handle_event(&TuiEvent::CursorRight);
        assert_eq!(
            area.handle_event(&TuiEvent::Submit),
            Some(ChatAreaEvent::SelectSubMode(SubMode::Information))
        );
    }

    #[test]
    fn test_clicking_a_picker_card() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let nav = NavigationState::new();
        render(&mut state, &nav);
        let (rect, _) = state
            .card_rects
            .iter()
            .find(|(_, t)| *t == CardTarget::SubMode(SubMode::Text))
            .copied()
            .unwrap();

        let event = ChatArea::new(&mut state, &nav, true)
            .handle_event(&TuiEvent::MouseClick(rect.x + 2, rect.y + 1));
        assert_eq!(event, Some(ChatAreaEvent::SelectSubMode(SubMode::Text)));
    }

    #[test]
    fn test_conversation_view_shows_greeting_and_suggestions() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let text = render(&mut state, &nav(Mode::Chat, Some(SubMode::Text)));
        assert!(text.contains("Болталка с ИИ • Работа с текстом"));
        assert!(text.contains("Привет! Я помогу написать"));
        assert!(text.contains("Проверь мой текст на ошибки"));
        assert!(text.contains("Напишите ваш вопрос..."));
    }

    #[test]
    fn test_suggestion_replaces_draft_without_sending() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let nav = nav(Mode::Tutor, None);
        let mut area = ChatArea::new(&mut state, &nav, true);
        type_text(&mut area, "old draft");
        assert_eq!(area.handle_event(&TuiEvent::PickSuggestion(2)), None);
        assert_eq!(state.composer.buffer, "Разбери задачу по физике");
        assert!(state.echoed.is_none());
    }

    #[test]
    fn test_send_echoes_and_clears_draft() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let nav = nav(Mode::Career, None);
        let mut area = ChatArea::new(&mut state, &nav, true);
        type_text(&mut area, "hello");
        assert_eq!(
            area.handle_event(&TuiEvent::Submit),
            Some(ChatAreaEvent::Send("hello".to_string()))
        );
        assert_eq!(state.echoed.as_deref(), Some("hello"));
        assert!(state.composer.buffer.is_empty());

        let text = render(&mut state, &nav);
        assert!(text.contains("hello"));
    }

    #[test]
    fn test_support_mode_renders_form_only() {
        let mut state = ChatAreaState::new(SupportForm::default());
        let text = render(&mut state, &nav(Mode::Support, None));
        assert!(text.contains("Обратиться в поддержку"));
        assert!(text.contains("Тема обращения"));
        assert!(!text.contains("Напишите ваш вопрос..."));
        assert!(!text.contains(MODE_PICKER_PROMPT));
    }

    #[test]
    fn test_support_submit_becomes_ticket_event() {
        let mut state = ChatAreaState::new(SupportForm::default());
        state.support.form.topic = Some(SupportTopic::PlatformError);
        state.support.form.description = "Не открывается курс".to_string();
        state.support.field = crate::tui::components::support_form::FormField::Submit;

        let nav = nav(Mode::Support, None);
        let event = ChatArea::new(&mut state, &nav, true).handle_event(&TuiEvent::Submit);
        assert!(matches!(event, Some(ChatAreaEvent::SubmitTicket(t)) if t.topic == SupportTopic::PlatformError));
    }

    #[test]
    fn test_reset_conversation_keeps_draft() {
        let mut state = ChatAreaState::new(SupportForm::default());
        state.echoed = Some("hi".to_string());
        state.composer.set_text("draft");
        state.reset_conversation();
        assert!(state.echoed.is_none());
        assert_eq!(state.composer.buffer, "draft");
    }
}
