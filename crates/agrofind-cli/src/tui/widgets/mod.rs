pub mod category_bar;
pub mod help_bar;
pub mod text_field;

use agrofind_core::present::BadgeColor;
use ratatui::style::Color;

/// Map the presenter's terminal-agnostic colors onto the ratatui palette.
pub fn badge_color(color: BadgeColor) -> Color {
    match color {
        BadgeColor::Blue => Color::Blue,
        BadgeColor::Green => Color::Green,
        BadgeColor::Yellow => Color::Yellow,
        BadgeColor::Gray => Color::DarkGray,
        BadgeColor::Magenta => Color::Magenta,
    }
}
