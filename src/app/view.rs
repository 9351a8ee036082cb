// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Picks the windowed or fullscreen gallery layout and floats the toast
//! overlay above it.

use super::Message;
use crate::gallery::GalleryState;
use crate::i18n::fluent::I18n;
use crate::ui::gallery::{self, fullscreen, DetailModel, Preview, ServerHealth, ThumbnailCache};
use crate::ui::notifications::{self, Toast};
use crate::ui::theming::ThemeMode;
use iced::widget::{Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryState,
    pub thumbnails: &'a ThumbnailCache,
    pub preview: &'a Preview,
    pub health: &'a ServerHealth,
    pub refreshing: bool,
    pub fullscreen: bool,
    pub theme_mode: ThemeMode,
    pub notifications: &'a notifications::Manager,
}

/// Renders the gallery window with its notifications.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content: Element<'_, gallery::Message> = if ctx.fullscreen {
        let detail = DetailModel::from_state(ctx.gallery);
        fullscreen::view(ctx.i18n, detail.as_ref(), ctx.preview)
    } else {
        gallery::view(gallery::ViewContext {
            i18n: ctx.i18n,
            gallery: ctx.gallery,
            thumbnails: ctx.thumbnails,
            preview: ctx.preview,
            health: ctx.health,
            refreshing: ctx.refreshing,
            theme_mode: ctx.theme_mode,
        })
    };

    let base = Container::new(content.map(Message::Gallery))
        .width(Length::Fill)
        .height(Length::Fill);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(base)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
