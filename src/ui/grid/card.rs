// SPDX-License-Identifier: MPL-2.0
//! Grid card: the visual element for one asset.
//!
//! [`CardMetrics`] is both the size the card is drawn at and the measurement
//! handed to geometry, so layout math and widgets always agree.

use super::Message;
use crate::application::port::{CellSize, CellSizeProvider};
use crate::domain::asset::AssetRecord;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, image, Column, Container, Space, Text};
use iced::{alignment, ContentFit, Element, Length};
use std::path::Path;

/// Label strip is dropped below this card width.
const MIN_LABELLED_WIDTH: f32 = 80.0;
const LABEL_HEIGHT: f32 = typography::CAPTION + spacing::XS;

/// Card dimensions at scale 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub base_width: f32,
    pub base_height: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            base_width: sizing::CARD_BASE_WIDTH,
            base_height: sizing::CARD_BASE_HEIGHT,
        }
    }
}

impl CellSizeProvider for CardMetrics {
    fn measure(&self, scale: f32) -> CellSize {
        CellSize::new(self.base_width * scale, self.base_height * scale)
    }
}

/// Draws the card for `record` in a `size` box (gap excluded).
pub fn view<'a>(
    index: usize,
    record: &'a AssetRecord,
    media: Option<&'a Path>,
    size: CellSize,
    selected: bool,
) -> Element<'a, Message> {
    let labelled = size.width >= MIN_LABELLED_WIDTH;
    let media_height = if labelled {
        (size.height - LABEL_HEIGHT).max(0.0)
    } else {
        size.height
    };

    let media_area: Element<'a, Message> = match media {
        Some(path) if !record.is_directory => image(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fixed(media_height))
            .content_fit(ContentFit::Cover)
            .into(),
        _ => Container::new(Text::new(badge(record)).size(typography::CAPTION))
            .width(Length::Fill)
            .height(Length::Fixed(media_height))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::thumbnail_placeholder)
            .into(),
    };

    let mut content = Column::new().push(media_area);
    if labelled {
        content = content.push(
            Text::new(record.name.as_str())
                .size(typography::CAPTION)
                .height(Length::Fixed(LABEL_HEIGHT))
                .wrapping(iced::widget::text::Wrapping::None),
        );
    }

    button(content)
        .padding(0)
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .style(styles::button::card(selected))
        .on_press(Message::CellPressed(index))
        .into()
}

/// Empty slot of the same size as a card.
pub fn placeholder<'a>(size: CellSize) -> Element<'a, Message> {
    Space::new()
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .into()
}

fn badge(record: &AssetRecord) -> String {
    if record.is_directory {
        return "Folder".to_string();
    }
    if record.is_missing {
        return "Missing".to_string();
    }
    let extension = record.extension.trim_start_matches('.');
    if extension.is_empty() {
        "File".to_string()
    } else {
        extension.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, dir, file};

    #[test]
    fn metrics_scale_linearly() {
        let metrics = CardMetrics::default();
        let cell = metrics.measure(5.0);
        assert_abs_diff_eq!(cell.width, 200.0);
        assert_abs_diff_eq!(cell.height, 240.0);
    }

    #[test]
    fn badge_describes_record() {
        assert_eq!(badge(&dir("/m/sub")), "Folder");
        assert_eq!(badge(&file("/m/a.safetensors")), "SAFETENSORS");
        let mut missing = file("/m/b.ckpt");
        missing.is_missing = true;
        assert_eq!(badge(&missing), "Missing");
    }
}
