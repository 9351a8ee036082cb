// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main action (refresh, save).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_600,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => disabled(theme),
    }
}

/// Secondary action; adapts to light/dark theme.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = matches!(theme, Theme::Light);

    let (bg_color, text_color, border_color) = if is_light {
        (palette::GRAY_100, palette::GRAY_900, palette::GRAY_400)
    } else {
        (palette::GRAY_700, WHITE, palette::GRAY_400)
    };

    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => {
            let hover_bg = if is_light {
                palette::GRAY_200
            } else {
                Color::from_rgb(0.35, 0.35, 0.35)
            };
            button::Style {
                background: Some(Background::Color(hover_bg)),
                text_color,
                border: Border {
                    color: palette::PRIMARY_500,
                    width: 1.0,
                    radius: radius::SM.into(),
                },
                shadow: shadow::SM,
                snap: true,
            }
        }
        button::Status::Disabled => disabled(theme),
    }
}

/// Destructive action (delete, new session).
pub fn danger(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::ERROR_500)),
            text_color: WHITE,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_HOVER,
                ..palette::ERROR_500
            })),
            text_color: WHITE,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => disabled(theme),
    }
}

/// Grayed out, non-interactive.
fn disabled(theme: &Theme) -> button::Style {
    let is_light = matches!(theme, Theme::Light);
    button::Style {
        background: Some(Background::Color(if is_light {
            palette::GRAY_200
        } else {
            palette::GRAY_700
        })),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Translucent button drawn over the fullscreen image.
pub fn overlay(
    text_color: Color,
    alpha_normal: f32,
    alpha_hover: f32,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered => alpha_hover,
            button::Status::Pressed => opacity::OVERLAY_PRESSED,
            button::Status::Disabled => opacity::OVERLAY_SUBTLE,
            button::Status::Active => alpha_normal,
        };

        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..BLACK })),
            text_color: if matches!(status, button::Status::Disabled) {
                Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..text_color
                }
            } else {
                text_color
            },
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            shadow: shadow::MD,
            snap: true,
        }
    }
}

/// Thumbnail tile; the selected one gets a brand-colored frame.
pub fn thumbnail(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let frame = if selected {
            palette::PRIMARY_500
        } else if matches!(status, button::Status::Hovered) {
            palette::PRIMARY_400
        } else {
            Color::TRANSPARENT
        };

        button::Style {
            background: Some(Background::Color(
                theme.extended_palette().background.base.color,
            )),
            text_color: theme.palette().text,
            border: Border {
                color: frame,
                width: if selected {
                    border::WIDTH_MD * 1.5
                } else {
                    border::WIDTH_MD
                },
                radius: radius::SM.into(),
            },
            shadow: if selected { shadow::SM } else { shadow::NONE },
            snap: true,
        }
    }
}
