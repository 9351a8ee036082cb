// SPDX-License-Identifier: MPL-2.0
//! Detail panel: the large image with its navigation controls.

use super::{format_timestamp, DetailModel, Message};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::image::Handle;
use iced::widget::{button, text, Column, Container, Image, Row, Space, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Large image state for the current selection.
#[derive(Debug, Clone, Default)]
pub enum Preview {
    /// Nothing selected; the panel is hidden.
    #[default]
    Hidden,
    Loading { filename: String },
    Ready { filename: String, handle: Handle },
    Failed { filename: String },
}

impl Preview {
    /// File name the preview belongs to.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Preview::Hidden => None,
            Preview::Loading { filename }
            | Preview::Ready { filename, .. }
            | Preview::Failed { filename } => Some(filename),
        }
    }

    /// Whether the preview shows (or is loading) `filename`.
    pub fn is_for(&self, filename: &str) -> bool {
        self.filename() == Some(filename)
    }

    pub fn handle(&self) -> Option<&Handle> {
        match self {
            Preview::Ready { handle, .. } => Some(handle),
            _ => None,
        }
    }
}

/// Renders the detail panel, or empty space while it is hidden.
pub fn view<'a>(
    i18n: &'a I18n,
    detail: Option<&DetailModel<'_>>,
    preview: &'a Preview,
) -> Element<'a, Message> {
    let Some(detail) = detail else {
        return Space::new().into();
    };

    let (index, total) = detail.position_args();
    let position =
        i18n.tr_with_args("detail-position", &[("index", index.as_str()), ("total", total.as_str())]);
    let mut caption = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(detail.image.filename.clone()).size(typography::BODY_LG))
        .push(Text::new(position).size(typography::BODY_SM));
    if let Some(time) = detail.image.timestamp.and_then(format_timestamp) {
        caption = caption.push(
            Text::new(i18n.tr_with_args("detail-captured-at", &[("time", time.as_str())]))
                .size(typography::CAPTION),
        );
    }

    let image_area = Container::new(image_content(i18n, preview))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::detail_frame);

    let nav_button = |label: String, message: Option<Message>| {
        button(text(label).width(Length::Fill).center())
            .width(Length::Fixed(sizing::NAV_BUTTON_WIDTH))
            .on_press_maybe(message)
            .style(styles::button::secondary)
    };

    let controls = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(nav_button(
            i18n.tr("detail-previous"),
            detail.has_previous.then_some(Message::ShowPrevious),
        ))
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(i18n.tr("detail-delete")))
                .on_press(Message::DeleteRequested)
                .style(styles::button::danger),
        )
        .push(Space::new().width(Length::Fill))
        .push(nav_button(
            i18n.tr("detail-next"),
            detail.has_next.then_some(Message::ShowNext),
        ));

    Column::new()
        .spacing(spacing::XS)
        .padding(spacing::SM)
        .push(caption)
        .push(image_area)
        .push(controls)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Image widget or a status line while the image is unavailable.
pub fn image_content<'a>(i18n: &I18n, preview: &'a Preview) -> Element<'a, Message> {
    match preview {
        Preview::Ready { handle, .. } => Image::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Preview::Loading { .. } => Text::new(i18n.tr("detail-loading")).into(),
        Preview::Failed { .. } => Text::new(i18n.tr("detail-load-failed")).into(),
        Preview::Hidden => Space::new().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_preview_has_no_filename() {
        assert_eq!(Preview::Hidden.filename(), None);
        assert!(!Preview::Hidden.is_for("a.png"));
    }

    #[test]
    fn preview_tracks_its_filename() {
        let loading = Preview::Loading {
            filename: "a.png".to_string(),
        };
        assert!(loading.is_for("a.png"));
        assert!(!loading.is_for("b.png"));
        assert!(loading.handle().is_none());

        let ready = Preview::Ready {
            filename: "a.png".to_string(),
            handle: Handle::from_bytes(vec![0_u8; 4]),
        };
        assert!(ready.handle().is_some());
    }
}
