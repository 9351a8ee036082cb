// SPDX-License-Identifier: MPL-2.0
//! Overlay styles for fullscreen controls and position counters.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

fn container_background() -> Color {
    Color {
        a: opacity::OVERLAY_STRONG,
        ..BLACK
    }
}

fn container_border() -> Color {
    Color {
        a: opacity::OVERLAY_SUBTLE,
        ..WHITE
    }
}

/// Rounded indicator such as the fullscreen position counter.
pub fn indicator(rad: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(container_background())),
        text_color: Some(WHITE),
        border: Border {
            color: container_border(),
            width: 1.0,
            radius: rad.into(),
        },
        ..Default::default()
    }
}

/// Black backdrop behind the fullscreen image.
#[must_use]
pub fn fullscreen_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BLACK)),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::design_tokens::radius;

    #[test]
    fn indicator_uses_translucent_black() {
        let style = indicator(radius::MD)(&Theme::Light);
        match style.background {
            Some(Background::Color(color)) => {
                assert_eq!(color.a, opacity::OVERLAY_STRONG);
                assert_eq!(color.r, 0.0);
            }
            other => panic!("expected color background, got {other:?}"),
        }
    }
}
