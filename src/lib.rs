// SPDX-License-Identifier: MPL-2.0
//! `gallery_lens` is a desktop client for a whiteboard capture gallery server,
//! built with the Iced GUI framework.
//!
//! It lists the images of the current server session as a thumbnail strip,
//! shows the selected one in a detail panel and drives the server's delete,
//! session reset, export and upload endpoints.

#![doc(html_root_url = "https://docs.rs/gallery_lens/0.1.0")]

pub mod api;
pub mod app;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod ui;

pub use app::config;
