// SPDX-License-Identifier: MPL-2.0
//! Top toolbar with gallery-wide actions.

use super::Message;
use crate::api::Export;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, text, Row, Space};
use iced::{alignment, Element, Length, Theme};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Whether an image is shown (enables save and fullscreen).
    pub has_current: bool,
    /// Whether a refresh is in flight (disables the refresh button).
    pub refreshing: bool,
    pub theme_mode: ThemeMode,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let action = |key: &str,
                  message: Option<Message>,
                  style: fn(&Theme, button::Status) -> button::Style| {
        button(text(i18n.tr(key)).align_y(alignment::Vertical::Center))
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .on_press_maybe(message)
            .style(style)
    };

    let theme_label = i18n.tr_with_args(
        "toolbar-theme",
        &[("mode", i18n.tr(ctx.theme_mode.i18n_key()).as_str())],
    );

    Row::new()
        .spacing(spacing::XS)
        .padding(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(action(
            "toolbar-refresh",
            (!ctx.refreshing).then_some(Message::RefreshRequested),
            styles::button::primary,
        ))
        .push(action(
            "toolbar-save",
            ctx.has_current.then_some(Message::SaveRequested),
            styles::button::secondary,
        ))
        .push(action(
            "toolbar-fullscreen",
            ctx.has_current.then_some(Message::ToggleFullscreen),
            styles::button::secondary,
        ))
        .push(action(
            "toolbar-download-archive",
            Some(Message::ExportRequested(Export::Archive)),
            styles::button::secondary,
        ))
        .push(action(
            "toolbar-download-pdf",
            Some(Message::ExportRequested(Export::Pdf)),
            styles::button::secondary,
        ))
        .push(action(
            "toolbar-upload",
            Some(Message::UploadRequested),
            styles::button::secondary,
        ))
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(theme_label))
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .on_press(Message::CycleTheme)
                .style(styles::button::secondary),
        )
        .push(action(
            "toolbar-reset-session",
            Some(Message::ResetRequested),
            styles::button::danger,
        ))
        .into()
}
