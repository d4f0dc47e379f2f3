//! Utility functions for the player window.

/// Parse a hex color string ("#rrggbb" or "#rrggbbaa") to a Slint Color
pub fn parse_color(hex: &str) -> Option<slint::Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some(slint::Color::from_rgb_u8(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(slint::Color::from_argb_u8(
            channel(6)?,
            channel(0)?,
            channel(2)?,
            channel(4)?,
        )),
        _ => None,
    }
}
