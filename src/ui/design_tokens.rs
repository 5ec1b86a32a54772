// SPDX-License-Identifier: MPL-2.0
//! Shared colors and measurements of the asset browser.
//!
//! Widgets take their sizes from here rather than from literals, so the
//! toolbar, cards, focus viewer and toasts keep one rhythm.

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    /// Selection outline, active thumbnail, primary buttons.
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    // Toast accents
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

/// Alpha values for surfaces drawn over media.
pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    /// Toolbar panel.
    pub const SURFACE: f32 = 0.95;
}

/// Padding and gaps, in steps of 4px.
pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
}

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const TOOLBAR_HEIGHT: f32 = 52.0;

    pub const TOAST_WIDTH: f32 = 320.0;
    pub const SEARCH_WIDTH: f32 = 220.0;
    pub const TAG_FILTER_WIDTH: f32 = 140.0;
    /// Tag, note and category editor beside the focused media.
    pub const DETAILS_PANEL_WIDTH: f32 = 260.0;

    /// Card size at zoom scale 1.0; the 100% zoom step is scale 5.
    pub const CARD_BASE_WIDTH: f32 = 40.0;
    pub const CARD_BASE_HEIGHT: f32 = 48.0;

    /// Edge of a gallery strip thumbnail in the focus viewer.
    pub const GALLERY_THUMB: f32 = 72.0;
}

/// Font sizes.
pub mod typography {
    /// Empty state heading.
    pub const TITLE_MD: f32 = 20.0;
    /// Focus viewer title.
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY: f32 = 14.0;
    pub const BODY_SM: f32 = 13.0;
    /// Card labels, counters.
    pub const CAPTION: f32 = 12.0;
}

pub mod border {
    pub const WIDTH_MD: f32 = 2.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);
    assert!(opacity::OVERLAY_SUBTLE < opacity::OVERLAY_PRESSED);
};
