// SPDX-License-Identifier: MPL-2.0
//! Fullscreen presentation of the current image.
//!
//! The image fills a black backdrop; translucent controls float above it.

use super::detail::image_content;
use super::{DetailModel, Message, Preview};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, Element, Length};

pub fn view<'a>(
    i18n: &'a I18n,
    detail: Option<&DetailModel<'_>>,
    preview: &'a Preview,
) -> Element<'a, Message> {
    let backdrop = Container::new(image_content(i18n, preview))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::overlay::fullscreen_backdrop);

    let control = |label: String, message: Option<Message>| {
        button(text(label).center())
            .width(Length::Fixed(sizing::NAV_BUTTON_WIDTH))
            .padding(spacing::XS)
            .on_press_maybe(message)
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_HOVER,
            ))
    };

    let exit = Row::new()
        .push(Space::new().width(Length::Fill))
        .push(control(
            i18n.tr("toolbar-exit-fullscreen"),
            Some(Message::ToggleFullscreen),
        ));

    let mut bottom = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);
    if let Some(detail) = detail {
        let (index, total) = detail.position_args();
        let position = i18n.tr_with_args(
            "detail-position",
            &[("index", index.as_str()), ("total", total.as_str())],
        );
        bottom = bottom
            .push(control(
                i18n.tr("detail-previous"),
                detail.has_previous.then_some(Message::ShowPrevious),
            ))
            .push(Space::new().width(Length::Fill))
            .push(
                Container::new(Text::new(position).size(typography::BODY))
                    .padding([spacing::XXS, spacing::SM])
                    .style(styles::overlay::indicator(radius::MD)),
            )
            .push(Space::new().width(Length::Fill))
            .push(control(
                i18n.tr("detail-next"),
                detail.has_next.then_some(Message::ShowNext),
            ));
    }

    let controls = Column::new()
        .padding(spacing::MD)
        .push(exit)
        .push(Space::new().height(Length::Fill))
        .push(bottom)
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(backdrop)
        .push(controls)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
