// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small cards with a severity-colored accent bar and a dismiss
//! button.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, text, Column, Container, Row, Space, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Resolves the text of a notification, including its localized reason.
    pub fn message_text(notification: &Notification, i18n: &I18n) -> String {
        let reason = notification.reason().map(|reason| {
            let args: Vec<(&str, &str)> = reason
                .args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(&reason.key, &args)
        });

        let mut args: Vec<(&str, &str)> = notification
            .message_args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if let Some(reason) = reason.as_deref() {
            args.push(("reason", reason));
        }

        if args.is_empty() {
            i18n.tr(notification.message_key())
        } else {
            i18n.tr_with_args(notification.message_key(), &args)
        }
    }

    /// Renders a single toast notification.
    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let accent_color = notification.severity().color();

        let accent_bar = Container::new(
            Space::new()
                .width(Length::Fixed(spacing::XXS))
                .height(Length::Fixed(spacing::LG)),
        )
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(accent_color)),
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let message_widget = Text::new(Self::message_text(notification, i18n))
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        let dismiss_button = button(text("×").size(typography::BODY_LG))
            .on_press(Message::Dismiss(notification.id()))
            .padding([0.0, spacing::XS])
            .style(dismiss_button_style);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(accent_bar)
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders the toast overlay with all visible notifications, stacked in
    /// the bottom-right corner.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> = manager
            .visible()
            .map(|notification| Self::view(notification, i18n))
            .collect();

        if toasts.is_empty() {
            return Space::new()
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let toast_column = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        Container::new(toast_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    let background = match status {
        button::Status::Hovered => Some(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => Some(opacity::OVERLAY_MEDIUM),
        button::Status::Active | button::Status::Disabled => None,
    }
    .map(|a| iced::Background::Color(Color { a, ..palette::GRAY_400 }));

    button::Style {
        background,
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{ApiError, Error};

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn toast_container_style_uses_accent_color() {
        let accent = palette::SUCCESS_500;
        let style = toast_container_style(&Theme::Dark, accent);

        assert_eq!(style.border.color, accent);
        assert!(style.background.is_some());
    }

    #[test]
    fn message_text_interpolates_arguments() {
        let notification =
            Notification::success("notification-delete-success").with_arg("filename", "a.png");
        assert_eq!(Toast::message_text(&notification, &english()), "Deleted a.png");
    }

    #[test]
    fn message_text_includes_localized_reason() {
        let err = Error::Api(ApiError::Status {
            status: 503,
            endpoint: "/api/images".into(),
        });
        let notification = Notification::error("notification-refresh-error").with_reason(&err);
        let text = Toast::message_text(&notification, &english());

        assert_eq!(text, "Could not load images: server replied with status 503");
    }
}
