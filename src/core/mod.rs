//! # Core Application Logic
//!
//! The assistant's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Navigation (state)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Backends  │      │  History   │
//!     │  Adapter   │      │ (logging   │      │  store     │
//!     │ (ratatui)  │      │   stub)    │      │ (static)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`mode`]: `Mode` and `SubMode`
//! - [`navigation`]: the mode/sub-mode state machine and sidebar highlight
//! - [`content`]: fixed headers, greetings and suggestions per view
//! - [`history`]: dialog history entries and the `HistoryStore` seam
//! - [`support`]: support form, topics and attachment metadata
//! - [`backend`]: outbound message/ticket seams and the logging stub
//! - [`state`]: the `App` struct, page-level state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: configuration loading and resolution

pub mod action;
pub mod backend;
pub mod config;
pub mod content;
pub mod history;
pub mod mode;
pub mod navigation;
pub mod state;
pub mod support;
