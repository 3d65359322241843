use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields (or borrowed state for transient wrappers
/// like `Sidebar<'a>`), so every component shares one `render` signature.
/// `&mut self` lets a component record layout facts during the draw, such
/// as the row each sidebar item landed on, for later hit testing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal input.
///
/// The component consumes low-level `TuiEvent`s and reports what happened
/// in its own vocabulary (`SidebarEvent`, `ComposerEvent`, ...). The page
/// decides what those mean for the shared navigation state.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
