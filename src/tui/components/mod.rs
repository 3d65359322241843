//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `PageHeader`: product title, tagline and status message
//! - `Bubble`: a single chat bubble
//! - `SuggestionCard`: a clickable prompt
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events. Stateful components
//! that also need `App` data are split into a persistent `*State` owned by
//! `TuiState` and a transient wrapper built each frame:
//! - `Sidebar` / `SidebarState`: navigation column
//! - `ChatArea` / `ChatAreaState`: header plus picker, conversation or form
//! - `SupportFormView` / `SupportFormState`: support ticket form
//! - `Composer`: draft editor (owned directly by `ChatAreaState`)
//!
//! Components never mutate core state. They return events, and the page
//! maps those to `Action`s.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── page_header.rs      (top bar)
//! ├── sidebar.rs          (modes, sub-mode selector, history)
//! ├── chat_area.rs        (render selection for the main column)
//! ├── bubble.rs           (chat bubble)
//! ├── suggestion_card.rs  (prompt card)
//! ├── support_form.rs     (support ticket form)
//! └── composer/           (multi-line draft input)
//! ```

pub mod bubble;
pub mod chat_area;
pub mod composer;
pub mod page_header;
pub mod sidebar;
pub mod suggestion_card;
pub mod support_form;

pub use chat_area::{ChatArea, ChatAreaEvent, ChatAreaState};
pub use page_header::PageHeader;
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
