use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::page_header::PAGE_HEADER_HEIGHT;
use crate::tui::components::sidebar::SIDEBAR_WIDTH;
use crate::tui::components::{ChatArea, PageHeader, Sidebar};
use crate::tui::{Focus, TuiState};

/// Draw the whole page and remember where the sidebar and the chat area
/// ended up, for mouse routing.
///
/// ```text
/// ┌ PageHeader ─────────────────────────────────────┐
/// ├ Sidebar ─────────┬ ChatArea ─────────────────────┤
/// │                  │                               │
/// └──────────────────┴───────────────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [header_area, body_area] =
        Layout::vertical([Length(PAGE_HEADER_HEIGHT), Min(0)]).areas(frame.area());
    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);

    PageHeader::new(&app.status_message).render(frame, header_area);

    Sidebar::new(&mut tui.sidebar, app, tui.focus == Focus::Sidebar).render(frame, sidebar_area);
    ChatArea::new(
        &mut tui.chat_area,
        app.navigator.state(),
        tui.focus == Focus::Main,
    )
    .render(frame, main_area);

    tui.sidebar_area = sidebar_area;
    tui.main_area = main_area;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::mode::{Mode, SubMode};
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_initial_page() {
        let app = test_app();
        let mut tui = TuiState::new(app.profile.blank_form());
        let text = draw(&app, &mut tui);

        assert!(text.contains("AI-помощник для учебы"));
        assert!(text.contains("Новый диалог"));
        assert!(text.contains("История диалогов"));
        assert!(text.contains("Выберите, как будем работать:"));
        assert_eq!(tui.sidebar_area.width, SIDEBAR_WIDTH);
        assert_eq!(tui.main_area.x, SIDEBAR_WIDTH);
    }

    #[test]
    fn test_page_after_choosing_text_sub_mode() {
        let mut app = test_app();
        update(&mut app, Action::SelectSubMode(SubMode::Text));
        let mut tui = TuiState::new(app.profile.blank_form());
        let text = draw(&app, &mut tui);

        assert!(text.contains("Болталка с ИИ • Работа с текстом"));
        assert!(text.contains("Помоги написать эссе по литературе"));
        assert!(!text.contains("Выберите, как будем работать:"));
    }

    #[test]
    fn test_support_page() {
        let mut app = test_app();
        update(&mut app, Action::SelectMode(Mode::Support));
        let mut tui = TuiState::new(app.profile.blank_form());
        let text = draw(&app, &mut tui);

        assert!(text.contains("Опишите вашу проблему, и мы поможем её решить"));
        assert!(text.contains("Иван Петров"));
        assert!(text.contains("Отправить обращение"));
    }
}
