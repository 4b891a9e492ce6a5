//! # Core Application Logic
//!
//! This module contains Booktrack's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (screens)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Spawn(Task)
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ─── tasks::run() ──────▶ │    API     │
//!     │  Adapter   │                          │ + session  │
//!     │ (ratatui)  │ ◀── Action::Completed ── │   store    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and per-screen state
//! - [`action`]: The `Action` enum and `update()`
//! - [`navigation`]: Route stack and tab shell
//! - [`form`]: Text fields shared by every input screen
//! - [`tasks`]: Runs requests and reports back as actions
//! - [`session`]: Token persistence
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod form;
pub mod navigation;
pub mod session;
pub mod state;
pub mod tasks;
