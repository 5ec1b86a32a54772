// SPDX-License-Identifier: MPL-2.0
//! Toast column in the bottom-right corner.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Row};
use iced::{alignment, Element, Length};

/// Shown toasts stacked above the bottom edge, with a count of the ones
/// still waiting; empty when there are none.
pub fn overlay(manager: &Manager) -> Element<'_, Message> {
    let mut column = manager
        .visible()
        .fold(Column::new().spacing(spacing::XS), |column, notification| {
            column.push(toast(notification))
        })
        .align_x(alignment::Horizontal::Right);
    let waiting = manager.waiting();
    if waiting > 0 {
        column = column.push(text(format!("+{waiting} more")).size(typography::CAPTION));
    }

    container(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}

fn toast(notification: &Notification) -> Element<'_, Message> {
    let accent = notification.severity().color();
    let glyph = text(glyph(notification.severity()))
        .size(sizing::ICON_SM)
        .color(accent);
    let dismiss = button(text("\u{2715}").size(typography::BODY))
        .on_press(Message::Dismiss(notification.id()))
        .padding(spacing::XXS)
        .style(button::text);

    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(glyph)
        .push(text(notification.text()).size(typography::BODY).width(Length::Fill))
        .push(dismiss);

    container(row)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(styles::container::toast(accent))
        .into()
}

fn glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "\u{2713}",
        Severity::Info => "i",
        Severity::Warning | Severity::Error => "!",
    }
}
