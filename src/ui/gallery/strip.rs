// SPDX-License-Identifier: MPL-2.0
//! Horizontal thumbnail strip.

use super::{Message, Thumbnail, ThumbnailCache, THUMBNAIL_STRIP_ID};
use crate::gallery::GalleryState;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, Column, Container, Id, Image, Row, Scrollable, Text};
use iced::{alignment, ContentFit, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryState,
    pub thumbnails: &'a ThumbnailCache,
}

/// Renders every image as a clickable tile; the current one is highlighted.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    // Takes the whole window while the detail panel is hidden
    if ctx.gallery.is_empty() {
        return Container::new(Text::new(ctx.i18n.tr("gallery-empty")).size(typography::TITLE_SM))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into();
    }

    let current = ctx.gallery.current_index();
    let tiles = ctx
        .gallery
        .images()
        .iter()
        .enumerate()
        .map(|(index, image)| {
            tile(
                ctx.i18n,
                &image.filename,
                ctx.thumbnails.get(&image.filename),
                index,
                current == Some(index),
            )
        });

    let row = Row::with_children(tiles)
        .spacing(spacing::XS)
        .padding(spacing::XS);

    Scrollable::new(row)
        .id(Id::new(THUMBNAIL_STRIP_ID))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::THUMBNAIL_STRIP_HEIGHT))
        .direction(Direction::Horizontal(Scrollbar::new()))
        .into()
}

fn tile<'a>(
    i18n: &I18n,
    filename: &'a str,
    thumbnail: Option<&Thumbnail>,
    index: usize,
    selected: bool,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(Thumbnail::Ready(handle)) => Image::new(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(sizing::THUMBNAIL_WIDTH))
            .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
            .into(),
        Some(Thumbnail::Failed) => placeholder(i18n.tr("detail-load-failed")),
        Some(Thumbnail::Loading) | None => placeholder("…".to_string()),
    };

    let caption = Text::new(filename)
        .size(typography::CAPTION)
        .width(Length::Fixed(sizing::THUMBNAIL_WIDTH));

    button(Column::new().spacing(spacing::XXS).push(picture).push(caption))
        .padding(spacing::XXS)
        .on_press(Message::ThumbnailClicked(index))
        .style(styles::button::thumbnail(selected))
        .into()
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    Container::new(Text::new(label).size(typography::CAPTION))
        .width(Length::Fixed(sizing::THUMBNAIL_WIDTH))
        .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::thumbnail_placeholder)
        .into()
}
