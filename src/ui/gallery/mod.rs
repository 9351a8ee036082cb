// SPDX-License-Identifier: MPL-2.0
//! Gallery window: thumbnail strip, detail panel, toolbar and status bar.
//!
//! Views take the gallery state by reference and emit [`Message`] intents;
//! the application decides what each intent does.

pub mod cache;
pub mod detail;
pub mod fullscreen;
pub mod status_bar;
pub mod strip;
pub mod toolbar;

pub use cache::{Thumbnail, ThumbnailCache};
pub use detail::Preview;
pub use status_bar::ServerHealth;

use crate::api::{Export, ServerStatus};
use crate::gallery::{GalleryState, ImageDescriptor};
use crate::i18n::fluent::I18n;
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{Column, Container};
use iced::{Element, Length};

/// Widget id of the scrollable thumbnail strip.
pub const THUMBNAIL_STRIP_ID: &str = "gallery-thumbnail-strip";

/// User intents emitted by the gallery views.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ThumbnailClicked(usize),
    ShowPrevious,
    ShowNext,
    DeleteRequested,
    SaveRequested,
    RefreshRequested,
    ExportRequested(Export),
    UploadRequested,
    ResetRequested,
    ToggleFullscreen,
    CycleTheme,
}

/// Everything the gallery views need to render one frame.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryState,
    pub thumbnails: &'a ThumbnailCache,
    pub preview: &'a Preview,
    pub health: &'a ServerHealth,
    pub refreshing: bool,
    pub theme_mode: ThemeMode,
}

/// Data shown by the detail panel for the current image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailModel<'a> {
    pub image: &'a ImageDescriptor,
    /// Zero-based index in the list.
    pub index: usize,
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'a> DetailModel<'a> {
    /// Detail data for the current image, or `None` when the panel is hidden.
    pub fn from_state(state: &'a GalleryState) -> Option<Self> {
        let index = state.current_index()?;
        let image = state.current()?;
        Some(Self {
            image,
            index,
            total: state.len(),
            has_previous: state.has_previous(),
            has_next: state.has_next(),
        })
    }

    /// One-based position label arguments (`index`, `total`).
    pub fn position_args(&self) -> (String, String) {
        ((self.index + 1).to_string(), self.total.to_string())
    }
}

/// Windowed layout: toolbar, detail panel, thumbnail strip, status bar.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let detail = DetailModel::from_state(ctx.gallery);

    let toolbar = Container::new(toolbar::view(toolbar::ViewContext {
        i18n: ctx.i18n,
        has_current: detail.is_some(),
        refreshing: ctx.refreshing,
        theme_mode: ctx.theme_mode,
    }))
    .width(Length::Fill)
    .style(styles::container::panel);

    let detail_panel = detail::view(ctx.i18n, detail.as_ref(), ctx.preview);

    let strip = strip::view(strip::ViewContext {
        i18n: ctx.i18n,
        gallery: ctx.gallery,
        thumbnails: ctx.thumbnails,
    });

    let status = Container::new(status_bar::view(
        ctx.i18n,
        ctx.health,
        ctx.gallery.len(),
        ctx.refreshing,
    ))
    .width(Length::Fill)
    .style(styles::container::panel);

    Column::new()
        .push(toolbar)
        .push(detail_panel)
        .push(strip)
        .push(status)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Formats a Unix timestamp in local time, or `None` when out of range.
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(timestamp, 0).map(|utc| {
        utc.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    })
}

/// Image count shown in the status bar, preferring the server's own count.
pub fn session_count(status: Option<&ServerStatus>, listed: usize) -> u64 {
    status
        .and_then(|status| status.session_image_count)
        .unwrap_or(listed as u64)
}
