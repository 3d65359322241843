//! # Sidebar Component
//!
//! Left column: "+ Новый диалог", the mode buttons, the chat sub-mode
//! selector, dialog history and the support button.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` (cursor, "show all" toggle, hit-test cache)
//! - `Sidebar` is created each frame with borrowed state and `App` props
//!
//! The sidebar never mutates navigation itself. Activating a row emits a
//! `SidebarEvent` and the page turns it into a core `Action`.
//!
//! Every actionable row occupies exactly one terminal line, so a mouse
//! click maps to a row by its `y` coordinate alone.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::content::SUB_MODE_PLACEHOLDER;
use crate::core::history::{HistoryEntry, needs_toggle, visible_entries};
use crate::core::mode::Mode;
use crate::core::navigation::Highlight;
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Width of the sidebar column, including its right border.
pub const SIDEBAR_WIDTH: u16 = 36;

/// One actionable line in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    NewChat,
    Mode(Mode),
    SubModeSelector,
    History(String),
    ToggleHistory,
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    NewChat,
    SelectMode(Mode),
    /// Advance the chat sub-mode selector to its next option.
    CycleSubMode,
    SelectHistory(String),
}

/// Persistent sidebar state.
pub struct SidebarState {
    pub show_all_history: bool,
    cursor: SidebarRow,
    /// Screen line of each row from the last render.
    row_positions: Vec<(u16, SidebarRow)>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            show_all_history: false,
            cursor: SidebarRow::Mode(Mode::Chat),
            row_positions: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &SidebarRow {
        &self.cursor
    }

    /// Drop the row positions from the last frame. Clicks miss until the next draw.
    pub fn forget_layout(&mut self) {
        self.row_positions.clear();
    }

    /// Row drawn at screen line `y` in the last frame.
    fn row_at(&self, y: u16) -> Option<&SidebarRow> {
        self.row_positions
            .iter()
            .find(|(row_y, _)| *row_y == y)
            .map(|(_, row)| row)
    }
}

/// Actionable rows in top-to-bottom order for the current state.
pub fn sidebar_rows(app: &App, show_all_history: bool) -> Vec<SidebarRow> {
    let mut rows = vec![SidebarRow::NewChat, SidebarRow::Mode(Mode::Chat)];
    if app.navigator.state().mode() == Mode::Chat {
        rows.push(SidebarRow::SubModeSelector);
    }
    rows.push(SidebarRow::Mode(Mode::Tutor));
    rows.push(SidebarRow::Mode(Mode::Career));

    let entries = app.history.list_history();
    rows.extend(
        visible_entries(entries, show_all_history, app.history_preview)
            .iter()
            .map(|entry| SidebarRow::History(entry.id.clone())),
    );
    if needs_toggle(entries, app.history_preview) {
        rows.push(SidebarRow::ToggleHistory);
    }
    rows.push(SidebarRow::Mode(Mode::Support));
    rows
}

/// Transient render/event wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    app: &'a App,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a mut SidebarState, app: &'a App, focused: bool) -> Self {
        Self { state, app, focused }
    }

    fn rows(&self) -> Vec<SidebarRow> {
        sidebar_rows(self.app, self.state.show_all_history)
    }

    /// Keep the cursor on a row that still exists (the sub-mode selector
    /// disappears when leaving chat, history rows when collapsing).
    fn clamp_cursor(&mut self, rows: &[SidebarRow]) {
        if !rows.contains(&self.state.cursor) {
            self.state.cursor = match self.state.cursor {
                SidebarRow::SubModeSelector => SidebarRow::Mode(Mode::Chat),
                SidebarRow::History(_) if rows.contains(&SidebarRow::ToggleHistory) => {
                    SidebarRow::ToggleHistory
                }
                _ => SidebarRow::NewChat,
            };
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let rows = self.rows();
        self.clamp_cursor(&rows);
        let Some(index) = rows.iter().position(|r| *r == self.state.cursor) else {
            return;
        };
        let target = if down {
            (index + 1).min(rows.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        self.state.cursor = rows[target].clone();
    }

    fn activate(&mut self, row: SidebarRow) -> Option<SidebarEvent> {
        self.state.cursor = row.clone();
        match row {
            SidebarRow::NewChat => Some(SidebarEvent::NewChat),
            SidebarRow::Mode(mode) => Some(SidebarEvent::SelectMode(mode)),
            SidebarRow::SubModeSelector => Some(SidebarEvent::CycleSubMode),
            SidebarRow::History(id) => Some(SidebarEvent::SelectHistory(id)),
            SidebarRow::ToggleHistory => {
                self.state.show_all_history = !self.state.show_all_history;
                None
            }
        }
    }

    fn row_line(&self, row: &SidebarRow, highlight: &Highlight, width: u16) -> Line<'static> {
        let is_cursor = self.focused && *row == self.state.cursor;
        let is_highlighted = match (row, highlight) {
            (SidebarRow::Mode(mode), Highlight::Mode(active)) => mode == active,
            (SidebarRow::History(id), Highlight::History(active)) => id == active,
            _ => false,
        };

        let mut style = if is_highlighted {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if is_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = if is_highlighted { "▌" } else { " " };

        let nav = self.app.navigator.state();
        let (text, detail) = match row {
            SidebarRow::NewChat => ("[ + Новый диалог ]".to_string(), None),
            SidebarRow::Mode(mode) => {
                let mut label = format!("{} {}", mode.icon(), mode.label());
                if *mode == Mode::Chat {
                    label.push_str(if nav.mode() == Mode::Chat { " ▴" } else { " ▾" });
                }
                (label, None)
            }
            SidebarRow::SubModeSelector => {
                let value = nav.sub_mode().map(|s| s.label()).unwrap_or(SUB_MODE_PLACEHOLDER);
                (format!("  ↳ {value} ⇅"), None)
            }
            SidebarRow::History(id) => match self.app.history.find(id) {
                Some(entry) => history_text(entry),
                None => (id.clone(), None),
            },
            SidebarRow::ToggleHistory => {
                let label = if self.state.show_all_history { "Скрыть" } else { "Показать еще" };
                (format!("  {label}"), None)
            }
        };

        // marker + text + optional "  detail", all within the inner width
        let available = usize::from(width).saturating_sub(1);
        let detail = detail.map(|d| format!("  {d}"));
        let detail_width = detail.as_deref().map(UnicodeWidthStr::width).unwrap_or(0);
        let text = truncate_to_width(&text, available.saturating_sub(detail_width));

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(text, style),
        ];
        if let Some(detail) = detail {
            spans.push(Span::styled(detail, Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }
}

fn history_text(entry: &HistoryEntry) -> (String, Option<String>) {
    (
        format!("{} {}", entry.mode.icon(), entry.title),
        Some(entry.last_activity.clone()),
    )
}

/// Cut `s` to at most `max` display columns, ending with "…" when shortened.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = self.rows();
        self.clamp_cursor(&rows);

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let highlight = self.app.navigator.highlight();
        let mut lines: Vec<Line> = Vec::new();
        let mut positions: Vec<(u16, SidebarRow)> = Vec::new();
        // Support is pinned to the bottom; the separator sits right above it.
        let bottom_y = inner.bottom().saturating_sub(1);

        for row in rows.iter() {
            if *row == SidebarRow::Mode(Mode::Support) {
                continue;
            }
            match row {
                SidebarRow::Mode(Mode::Chat) => lines.push(Line::raw("")),
                SidebarRow::History(_) | SidebarRow::ToggleHistory
                    if !positions
                        .iter()
                        .any(|(_, r)| matches!(r, SidebarRow::History(_))) =>
                {
                    lines.push(Line::raw(""));
                    lines.push(Line::styled(
                        " ◷ История диалогов",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                _ => {}
            }
            let y = inner.y + lines.len() as u16;
            if y + 1 >= bottom_y {
                break;
            }
            positions.push((y, row.clone()));
            lines.push(self.row_line(row, &highlight, inner.width));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if inner.height >= 2 {
            let separator = "─".repeat(usize::from(inner.width));
            frame.render_widget(
                Paragraph::new(Line::styled(separator, Style::default().fg(Color::DarkGray))),
                Rect::new(inner.x, bottom_y - 1, inner.width, 1),
            );
            let support = SidebarRow::Mode(Mode::Support);
            frame.render_widget(
                Paragraph::new(self.row_line(&support, &highlight, inner.width)),
                Rect::new(inner.x, bottom_y, inner.width, 1),
            );
            positions.push((bottom_y, support));
        }

        self.state.row_positions = positions;
    }
}

impl EventHandler for Sidebar<'_> {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.move_cursor(false);
                None
            }
            TuiEvent::CursorDown => {
                self.move_cursor(true);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                let rows = self.rows();
                self.clamp_cursor(&rows);
                self.activate(self.state.cursor.clone())
            }
            TuiEvent::MouseClick(col, row) => {
                let hit = self.state.row_at(*row).cloned()?;
                log::debug!("Sidebar click at ({}, {}) -> {:?}", col, row, hit);
                self.activate(hit)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::history::StaticHistory;
    use crate::core::mode::SubMode;
    use crate::core::state::Profile;
    use crate::test_support::{buffer_lines, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn move_to(state: &mut SidebarState, app: &App, target: &SidebarRow) {
        for _ in 0..32 {
            if state.cursor() == target {
                return;
            }
            Sidebar::new(state, app, true).handle_event(&TuiEvent::CursorDown);
        }
        panic!("row {target:?} not reachable");
    }

    fn activate(state: &mut SidebarState, app: &mut App, target: SidebarRow) -> Option<SidebarEvent> {
        state.cursor = SidebarRow::NewChat;
        move_to(state, app, &target);
        let event = Sidebar::new(state, app, true).handle_event(&TuiEvent::Submit);
        match event.clone() {
            Some(SidebarEvent::SelectMode(mode)) => {
                update(app, Action::SelectMode(mode));
            }
            Some(SidebarEvent::SelectHistory(id)) => {
                update(app, Action::SelectHistoryEntry(id));
            }
            Some(SidebarEvent::NewChat) => {
                update(app, Action::StartNewChat);
            }
            Some(SidebarEvent::CycleSubMode) => {
                let next = SubMode::cycle(app.navigator.state().sub_mode());
                update(app, Action::SelectSubMode(next));
            }
            None => {}
        }
        event
    }

    fn render(state: &mut SidebarState, app: &App) -> Vec<String> {
        let backend = TestBackend::new(SIDEBAR_WIDTH, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Sidebar::new(state, app, false).render(f, f.area()))
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn line_with<'a>(lines: &'a [String], needle: &str) -> &'a str {
        lines
            .iter()
            .find(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("no line contains {needle:?}"))
    }

    fn many_entries(count: usize) -> App {
        let entries = (1..=count)
            .map(|i| {
                HistoryEntry::new(i.to_string(), format!("Диалог {i}"), Mode::Tutor, None, "сегодня")
                    .unwrap()
            })
            .collect();
        App::new(Box::new(StaticHistory::new(entries)), Profile::default())
    }

    #[test]
    fn test_rows_in_initial_state() {
        let app = test_app();
        let rows = sidebar_rows(&app, false);
        assert_eq!(rows[0], SidebarRow::NewChat);
        assert_eq!(rows[1], SidebarRow::Mode(Mode::Chat));
        assert_eq!(rows[2], SidebarRow::SubModeSelector);
        assert_eq!(rows.last(), Some(&SidebarRow::Mode(Mode::Support)));
        assert!(!rows.contains(&SidebarRow::ToggleHistory));
    }

    #[test]
    fn test_sub_mode_selector_only_in_chat() {
        let mut app = test_app();
        update(&mut app, Action::SelectMode(Mode::Tutor));
        assert!(!sidebar_rows(&app, false).contains(&SidebarRow::SubModeSelector));
    }

    #[test]
    fn test_history_click_then_mode_button() {
        let mut app = test_app();
        let mut state = SidebarState::new();

        let event = activate(&mut state, &mut app, SidebarRow::History("1".into()));
        assert_eq!(event, Some(SidebarEvent::SelectHistory("1".into())));
        assert_eq!(app.navigator.state().mode(), Mode::Tutor);
        assert_eq!(app.navigator.state().sub_mode(), None);
        assert_eq!(app.navigator.selected_history_id(), Some("1"));

        let lines = render(&mut state, &app);
        assert!(line_with(&lines, "Помощь с математикой").starts_with('▌'));
        assert!(!line_with(&lines, "Тьютор").starts_with('▌'));

        let event = activate(&mut state, &mut app, SidebarRow::Mode(Mode::Career));
        assert_eq!(event, Some(SidebarEvent::SelectMode(Mode::Career)));
        assert_eq!(app.navigator.selected_history_id(), None);

        let lines = render(&mut state, &app);
        assert!(line_with(&lines, "Профориентация").starts_with('▌'));
        assert!(!line_with(&lines, "Помощь с математикой").starts_with('▌'));
    }

    #[test]
    fn test_sub_mode_selector_cycles() {
        let mut app = test_app();
        let mut state = SidebarState::new();
        activate(&mut state, &mut app, SidebarRow::SubModeSelector);
        assert_eq!(app.navigator.state().sub_mode(), Some(SubMode::Information));
        activate(&mut state, &mut app, SidebarRow::SubModeSelector);
        assert_eq!(app.navigator.state().sub_mode(), Some(SubMode::Text));

        let lines = render(&mut state, &app);
        assert!(line_with(&lines, "↳").contains("Работа с текстом"));
    }

    #[test]
    fn test_new_chat_clears_history_highlight() {
        let mut app = test_app();
        let mut state = SidebarState::new();
        activate(&mut state, &mut app, SidebarRow::History("3".into()));
        activate(&mut state, &mut app, SidebarRow::NewChat);
        assert_eq!(app.navigator.selected_history_id(), None);
        assert!(app.navigator.state().show_mode_picker());
    }

    #[test]
    fn test_toggle_only_changes_visible_entries() {
        let mut app = many_entries(7);
        let mut state = SidebarState::new();
        activate(&mut state, &mut app, SidebarRow::History("2".into()));

        let rows = sidebar_rows(&app, false);
        assert!(rows.contains(&SidebarRow::ToggleHistory));
        assert!(!rows.contains(&SidebarRow::History("6".into())));

        let event = activate(&mut state, &mut app, SidebarRow::ToggleHistory);
        assert_eq!(event, None);
        assert!(state.show_all_history);
        assert!(sidebar_rows(&app, true).contains(&SidebarRow::History("7".into())));
        assert_eq!(app.navigator.selected_history_id(), Some("2"));

        let lines = render(&mut state, &app);
        assert!(line_with(&lines, "Скрыть").contains("Скрыть"));
    }

    #[test]
    fn test_mouse_click_activates_row() {
        let app = test_app();
        let mut state = SidebarState::new();
        let lines = render(&mut state, &app);
        let y = lines
            .iter()
            .position(|l| l.contains("Профориентация"))
            .unwrap() as u16;

        let event = Sidebar::new(&mut state, &app, false).handle_event(&TuiEvent::MouseClick(3, y));
        assert_eq!(event, Some(SidebarEvent::SelectMode(Mode::Career)));
        assert_eq!(state.cursor(), &SidebarRow::Mode(Mode::Career));
    }

    #[test]
    fn test_support_button_pinned_to_bottom() {
        let app = test_app();
        let mut state = SidebarState::new();
        let lines = render(&mut state, &app);
        assert!(lines[23].contains("Обратиться в поддержку"));
        assert!(lines[22].contains('─'));
    }

    #[test]
    fn test_cursor_leaves_vanished_selector() {
        let mut app = test_app();
        let mut state = SidebarState::new();
        state.cursor = SidebarRow::SubModeSelector;
        update(&mut app, Action::SelectMode(Mode::Career));
        Sidebar::new(&mut state, &app, true).handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.cursor(), &SidebarRow::Mode(Mode::Tutor));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Карьера в IT", 20), "Карьера в IT");
        assert_eq!(truncate_to_width("Анализ текста по литературе", 10), "Анализ те…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
