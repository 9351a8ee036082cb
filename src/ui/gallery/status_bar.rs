// SPDX-License-Identifier: MPL-2.0
//! Bottom status bar: server health and image counts.

use super::{session_count, Message};
use crate::api::ServerStatus;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{text, Row, Space, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Last known server health, from `GET /api/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServerHealth {
    /// No status received yet.
    #[default]
    Unknown,
    Reachable(ServerStatus),
    Unreachable,
}

impl ServerHealth {
    pub fn status(&self) -> Option<&ServerStatus> {
        match self {
            ServerHealth::Reachable(status) => Some(status),
            ServerHealth::Unknown | ServerHealth::Unreachable => None,
        }
    }

    fn label_key(&self) -> &'static str {
        match self {
            ServerHealth::Reachable(status) if status.is_online() => "status-online",
            ServerHealth::Reachable(_) | ServerHealth::Unknown => "status-unknown",
            ServerHealth::Unreachable => "status-offline",
        }
    }

    fn color(&self) -> Option<Color> {
        match self {
            ServerHealth::Reachable(status) if status.is_online() => Some(palette::SUCCESS_500),
            ServerHealth::Unreachable => Some(palette::ERROR_500),
            ServerHealth::Reachable(_) | ServerHealth::Unknown => None,
        }
    }
}

pub fn view<'a>(
    i18n: &'a I18n,
    health: &'a ServerHealth,
    listed: usize,
    refreshing: bool,
) -> Element<'a, Message> {
    let color = health.color();
    let health_label = Text::new(i18n.tr(health.label_key()))
        .size(typography::CAPTION)
        .style(move |theme: &Theme| text::Style {
            color: color.or(Some(theme.palette().text)),
        });

    let session = session_count(health.status(), listed).to_string();
    let mut row = Row::new()
        .spacing(spacing::MD)
        .padding([spacing::XXS, spacing::SM])
        .align_y(alignment::Vertical::Center)
        .push(health_label)
        .push(
            Text::new(i18n.tr_with_args("status-session-count", &[("count", session.as_str())]))
                .size(typography::CAPTION),
        );

    if let Some(total) = health.status().and_then(|status| status.total_image_count) {
        let total = total.to_string();
        row = row.push(
            Text::new(i18n.tr_with_args("status-total-count", &[("count", total.as_str())]))
                .size(typography::CAPTION),
        );
    }

    row = row.push(Space::new().width(Length::Fill));
    if refreshing {
        row = row.push(Text::new(i18n.tr("status-refreshing")).size(typography::CAPTION));
    }

    row.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn online() -> ServerStatus {
        ServerStatus {
            status: Some("online".to_string()),
            ..ServerStatus::default()
        }
    }

    #[test]
    fn label_follows_health() {
        assert_eq!(ServerHealth::Unknown.label_key(), "status-unknown");
        assert_eq!(ServerHealth::Unreachable.label_key(), "status-offline");
        assert_eq!(ServerHealth::Reachable(online()).label_key(), "status-online");
        assert_eq!(
            ServerHealth::Reachable(ServerStatus::default()).label_key(),
            "status-unknown"
        );
    }

    #[test]
    fn only_reachable_health_exposes_status() {
        assert!(ServerHealth::Reachable(online()).status().is_some());
        assert!(ServerHealth::Unreachable.status().is_none());
    }
}
