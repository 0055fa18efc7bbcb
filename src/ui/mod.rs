//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`setup`]: The target form (URL rows, interval, requests per check)
//! - [`dashboard`]: The two live line charts (response time, availability)
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current
//! mode:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Mode Content                         │
//! │ (setup/dashboard::render)            │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//! ```

pub mod common;
pub mod dashboard;
pub mod setup;
pub mod theme;

pub use theme::Theme;
