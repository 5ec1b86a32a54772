// SPDX-License-Identifier: MPL-2.0
//! Scrollable grid view.
//!
//! The scrollable content is as tall as the whole grid, but only the cells
//! of the last render exist: a spacer of `vertical_offset` pushes them to the
//! right place and a second spacer fills the rest.

use super::{card, CellKind, GridState, Message, SCROLLABLE_ID};
use crate::domain::asset::AssetRecord;
use iced::widget::{Column, Container, Id, Row, Scrollable, Space};
use iced::{Element, Length};

/// Renders the materialized window of `records`.
#[allow(clippy::cast_precision_loss)]
pub fn view<'a>(
    state: &'a GridState,
    records: &'a [AssetRecord],
    selected: Option<usize>,
) -> Element<'a, Message> {
    let viewport = state.viewport();
    let renderer = state.renderer();
    let card_size = state.card_size();
    let row_height = viewport.row_height();
    let columns = viewport.columns_visible;

    let mut content = Column::new()
        .width(Length::Fill)
        .push(Space::new().height(Length::Fixed(renderer.vertical_offset())));

    let mut rendered_rows = 0usize;
    for chunk in renderer.cells().chunks(columns) {
        let row = chunk.iter().fold(Row::new().spacing(state.gap()), |row, cell| {
            let element = match (cell.kind, records.get(cell.index)) {
                (CellKind::Asset, Some(record)) => card::view(
                    cell.index,
                    record,
                    record.display_image(),
                    card_size,
                    selected == Some(cell.index),
                ),
                _ => card::placeholder(card_size),
            };
            row.push(element)
        });
        content = content.push(
            Container::new(row)
                .width(Length::Fill)
                .height(Length::Fixed(row_height)),
        );
        rendered_rows += 1;
    }

    let rendered_bottom = renderer.vertical_offset() + rendered_rows as f32 * row_height;
    let remaining = (viewport.content_height(records.len()) - rendered_bottom).max(0.0);
    content = content.push(Space::new().height(Length::Fixed(remaining)));

    Scrollable::new(content)
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(Message::Scrolled)
        .into()
}
