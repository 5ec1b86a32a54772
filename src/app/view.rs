// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The toolbar sits above the grid; the focus viewer and the toasts are
//! stacked on top of both.

use super::Message;
use crate::domain::asset::AssetRecord;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::focus::{self, FocusState};
use crate::ui::grid::{self, GridState};
use crate::ui::notifications;
use crate::ui::styles;
use crate::ui::toolbar;
use iced::widget::{button, Column, Container, Stack, Text};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub toolbar: toolbar::ViewContext<'a>,
    pub grid: &'a GridState,
    pub focus: &'a FocusState,
    pub records: &'a [AssetRecord],
    pub notifications: &'a notifications::Manager,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let has_directory = ctx.toolbar.directory.is_some();
    let toolbar_view = toolbar::view(ctx.toolbar).map(Message::Toolbar);

    let body: Element<'_, Message> = if has_directory {
        grid::view(ctx.grid, ctx.records, ctx.focus.selected_index()).map(Message::Grid)
    } else {
        view_empty_state()
    };

    let base = Column::new()
        .push(toolbar_view)
        .push(
            Container::new(body)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill);

    let mut stack = Stack::new().push(base);
    if ctx.focus.is_open() {
        stack = stack.push(focus::view(ctx.focus).map(Message::Focus));
    }
    stack = stack.push(notifications::overlay(ctx.notifications).map(Message::Notification));

    Container::new(stack.width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_empty_state<'a>() -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(iced::Alignment::Center)
        .push(Text::new("No folder open").size(typography::TITLE_MD))
        .push(
            button(Text::new("Open folder").size(typography::BODY))
                .style(styles::button::primary)
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::Toolbar(toolbar::Message::OpenFolder)),
        );

    Container::new(content).center(Length::Fill).into()
}
