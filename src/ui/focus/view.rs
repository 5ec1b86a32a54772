// SPDX-License-Identifier: MPL-2.0
//! Focus overlay: header, media canvas, details panel and gallery strip.

use super::canvas::MediaCanvas;
use super::editor::{CategoryChoice, MetadataField};
use super::{FocusMode, FocusState, Message};
use crate::domain::asset::AssetRecord;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{
    button, canvas, container, image, pick_list, scrollable, text_input, Column, Container,
    Row, Space, Text,
};
use iced::{alignment, ContentFit, Element, Length};

/// Renders the overlay. An empty element when focus is closed.
pub fn view(state: &FocusState) -> Element<'_, Message> {
    let Some(asset) = state.focused_asset() else {
        return Space::new().into();
    };

    let position = match (state.mode(), state.gallery_index()) {
        (FocusMode::GalleryImage, Some(index)) => {
            format!("Gallery {} / {}", index + 1, state.gallery_images().len())
        }
        _ if state.is_gallery_pending() => "Searching gallery...".to_string(),
        _ => "Preview".to_string(),
    };

    let header = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(asset.name.as_str()).size(typography::TITLE_SM))
        .push(
            Container::new(Text::new(position).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::overlay::indicator(radius::SM)),
        )
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new("Close").size(typography::BODY))
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::overlay(
                    palette::WHITE,
                    opacity::OVERLAY_MEDIUM,
                    opacity::OVERLAY_HOVER,
                ))
                .on_press(Message::Close),
        );

    let media: Element<'_, Message> = match state.media_path() {
        Some(path) => canvas(MediaCanvas::new(
            image::Handle::from_path(path),
            state.media_size(),
            state.transform(),
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .into(),
        None => Container::new(Text::new("No preview available"))
            .center(Length::Fill)
            .into(),
    };

    let body = Row::new()
        .spacing(spacing::SM)
        .height(Length::Fill)
        .push(media)
        .push(details_panel(state, asset));

    let mut content = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .push(header)
        .push(body);

    if !state.gallery_images().is_empty() {
        content = content.push(gallery_strip(state));
    }

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::overlay::backdrop)
        .into()
}

fn gallery_strip(state: &FocusState) -> Element<'_, Message> {
    let active = match state.mode() {
        FocusMode::GalleryImage => state.gallery_index(),
        _ => None,
    };

    let thumbs = state
        .gallery_images()
        .iter()
        .enumerate()
        .fold(Row::new().spacing(spacing::XS), |row, (index, path)| {
            let thumb = image(image::Handle::from_path(path))
                .width(Length::Fixed(sizing::GALLERY_THUMB))
                .height(Length::Fixed(sizing::GALLERY_THUMB))
                .content_fit(ContentFit::Cover);
            row.push(
                button(
                    container(thumb)
                        .padding(border_padding())
                        .style(styles::overlay::gallery_thumb(active == Some(index))),
                )
                .padding(0)
                .style(button::text)
                .on_press(Message::OpenGalleryImage(index)),
            )
        });

    scrollable(thumbs)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new().width(4.0).scroller_width(4.0),
        ))
        .width(Length::Fill)
        .into()
}

fn border_padding() -> f32 {
    spacing::XXS / 2.0
}

/// Side panel editing tags, notes, the gallery keyword and the category.
fn details_panel<'a>(state: &'a FocusState, asset: &'a AssetRecord) -> Element<'a, Message> {
    let edited = state.editor().edited();

    let fields = MetadataField::ALL.into_iter().fold(
        Column::new().spacing(spacing::XS),
        |column, field| {
            column
                .push(Text::new(field.label()).size(typography::CAPTION))
                .push(
                    text_input(field.placeholder(), edited.value(field))
                        .on_input(move |value| Message::EditField(field, value))
                        .on_submit(Message::SaveMetadata)
                        .padding(spacing::XXS)
                        .size(typography::BODY_SM),
                )
        },
    );

    let category = Column::new()
        .spacing(spacing::XS)
        .push(Text::new("Category").size(typography::CAPTION))
        .push(
            pick_list(
                &CategoryChoice::ALL[..],
                Some(CategoryChoice::of(asset)),
                Message::CategorySelected,
            )
            .text_size(typography::BODY_SM)
            .padding(spacing::XXS)
            .width(Length::Fill),
        );

    let save = button(Text::new("Save").size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::primary)
        .on_press_maybe(
            state
                .editor()
                .has_changes()
                .then_some(Message::SaveMetadata),
        );

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(fields)
            .push(category)
            .push(save),
    )
    .padding(spacing::SM)
    .width(Length::Fixed(sizing::DETAILS_PANEL_WIDTH))
    .style(styles::overlay::indicator(radius::MD))
    .into()
}
