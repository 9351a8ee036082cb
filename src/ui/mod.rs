// SPDX-License-Identifier: MPL-2.0
//! User interface components and styling.
//!
//! Views follow the Elm-style "state down, messages up" pattern: they borrow
//! state and return elements emitting intent messages.
//!
//! - [`gallery`] - Thumbnail strip, detail panel, toolbar, status bar, fullscreen view
//! - [`notifications`] - Toast notification system for user feedback
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod gallery;
pub mod notifications;
pub mod styles;
pub mod theming;
