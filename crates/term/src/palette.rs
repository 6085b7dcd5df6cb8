//! Colour tags to terminal colours.
//!
//! The core only knows [`Color`] tags; this is the single place that turns
//! them into RGB.

use crate::fb::{Rgb, Style};
use crate::types::Color;

/// Play-field background.
pub const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
/// Screen background outside the play field.
pub const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

pub const BORDER: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
pub const EMPTY_DOT: Style = Style::new(Rgb::new(70, 70, 80), FIELD_BG);
pub const LABEL: Style = Style::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
pub const VALUE: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
pub const HINT: Style = Style::new(Rgb::new(130, 130, 140), SCREEN_BG);
pub const OVERLAY: Style = Style::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();

/// RGB for a colour tag.
pub fn rgb_for(color: Color) -> Rgb {
    match color {
        Color::Blue => Rgb::new(80, 120, 230),
        Color::Green => Rgb::new(100, 210, 110),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Pink => Rgb::new(240, 130, 190),
        Color::Teal => Rgb::new(60, 200, 200),
        Color::Purple => Rgb::new(150, 90, 220),
        Color::Magenta => Rgb::new(220, 80, 200),
        Color::Beige => Rgb::new(235, 220, 180),
    }
}

/// Style for an occupied board cell.
pub fn style_for(color: Color) -> Style {
    Style::new(rgb_for(color), FIELD_BG).bold()
}
