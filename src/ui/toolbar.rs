// SPDX-License-Identifier: MPL-2.0
//! Toolbar above the grid: directory actions, search, ordering, listing
//! filters and the card size slider.

use crate::application::port::{SortKey, SortOrder};
use crate::domain::ui::newtypes::grid_zoom_bounds;
use crate::domain::ui::GridZoomPercent;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, checkbox, pick_list, slider, text_input, Container, Row, Space, Text};
use iced::{alignment::Vertical, Element, Length};
use std::path::Path;

/// Contextual data needed to render the toolbar.
pub struct ViewContext<'a> {
    pub directory: Option<&'a Path>,
    pub search: &'a str,
    /// Comma-separated tags every listed asset must carry.
    pub tag_filter: &'a str,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub show_hidden: bool,
    pub hide_folders: bool,
    pub include_subfolders: bool,
    pub zoom: GridZoomPercent,
    pub asset_count: usize,
    pub loading: bool,
}

/// Messages emitted by the toolbar.
#[derive(Debug, Clone)]
pub enum Message {
    OpenFolder,
    ParentDirectory,
    Refresh,
    SearchChanged(String),
    TagFilterChanged(String),
    SortKeySelected(SortKey),
    ToggleSortOrder,
    ShowHiddenToggled(bool),
    HideFoldersToggled(bool),
    SubfoldersToggled(bool),
    ZoomChanged(f32),
    ExportDiagnostics,
}

/// Render the toolbar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let has_directory = ctx.directory.is_some();

    let open_button = button(Text::new("Open folder").size(typography::BODY))
        .style(styles::button::primary)
        .padding([spacing::XXS, spacing::SM])
        .on_press(Message::OpenFolder);

    let up_button = button(Text::new("Up").size(typography::BODY))
        .style(styles::button::unselected)
        .padding([spacing::XXS, spacing::SM])
        .on_press_maybe(has_directory.then_some(Message::ParentDirectory));

    let refresh_button = button(Text::new("Refresh").size(typography::BODY))
        .style(styles::button::unselected)
        .padding([spacing::XXS, spacing::SM])
        .on_press_maybe(has_directory.then_some(Message::Refresh));

    let search = text_input("Search", ctx.search)
        .on_input(Message::SearchChanged)
        .padding(spacing::XXS)
        .size(typography::BODY)
        .width(Length::Fixed(sizing::SEARCH_WIDTH));

    let tags = text_input("Tags", ctx.tag_filter)
        .on_input(Message::TagFilterChanged)
        .padding(spacing::XXS)
        .size(typography::BODY)
        .width(Length::Fixed(sizing::TAG_FILTER_WIDTH));

    let sort_picker = pick_list(
        &SortKey::ALL[..],
        Some(ctx.sort_key),
        Message::SortKeySelected,
    )
    .text_size(typography::BODY)
    .padding(spacing::XXS);

    let order_label = match ctx.sort_order {
        SortOrder::Ascending => "Asc",
        SortOrder::Descending => "Desc",
    };
    let order_button = button(Text::new(order_label).size(typography::BODY))
        .style(styles::button::unselected)
        .padding([spacing::XXS, spacing::XS])
        .on_press(Message::ToggleSortOrder);

    let filters = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(
            checkbox(ctx.show_hidden)
                .label("Hidden")
                .text_size(typography::BODY_SM)
                .on_toggle(Message::ShowHiddenToggled),
        )
        .push(
            checkbox(ctx.hide_folders)
                .label("No folders")
                .text_size(typography::BODY_SM)
                .on_toggle(Message::HideFoldersToggled),
        )
        .push(
            checkbox(ctx.include_subfolders)
                .label("Subfolders")
                .text_size(typography::BODY_SM)
                .on_toggle(Message::SubfoldersToggled),
        );

    let zoom_slider = slider(
        grid_zoom_bounds::MIN_PERCENT..=grid_zoom_bounds::MAX_PERCENT,
        ctx.zoom.value(),
        Message::ZoomChanged,
    )
    .step(1.0)
    .width(Length::Fixed(sizing::SEARCH_WIDTH / 2.0));

    let status = if ctx.loading {
        "Loading...".to_string()
    } else if has_directory {
        format!("{} items", ctx.asset_count)
    } else {
        String::new()
    };

    let export_button = button(Text::new("Diagnostics").size(typography::BODY_SM))
        .style(styles::button::unselected)
        .padding([spacing::XXS, spacing::XS])
        .on_press(Message::ExportDiagnostics);

    let row = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(open_button)
        .push(up_button)
        .push(refresh_button)
        .push(search)
        .push(tags)
        .push(sort_picker)
        .push(order_button)
        .push(filters)
        .push(Space::new().width(Length::Fill))
        .push(Text::new(status).size(typography::CAPTION))
        .push(zoom_slider)
        .push(export_button);

    Container::new(row)
        .padding([spacing::XS, spacing::SM])
        .height(Length::Fixed(sizing::TOOLBAR_HEIGHT))
        .width(Length::Fill)
        .align_y(Vertical::Center)
        .style(styles::container::panel)
        .into()
}

/// Title line for the window: the directory name, or the app name alone.
#[must_use]
pub fn window_title(directory: Option<&Path>) -> String {
    let name = directory.and_then(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| Some(path.display().to_string()))
    });
    match name {
        Some(name) => format!("{name} - AssetLens"),
        None => "AssetLens".to_string(),
    }
}
