// Color palettes - TUI colors for each terminal theme

use ratatui::style::Color;

/// Color specification - a named color ("red", "green") or hex ("#00cc00")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSpec(String);

impl ColorSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// Convert to ratatui Color. Unknown names fall back to the terminal default.
    pub fn to_color(&self) -> Color {
        parse_named_color(&self.0)
    }
}

/// Parse named color string to ratatui Color
fn parse_named_color(name: &str) -> Color {
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Color::Reset);
    }
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Colors used to draw the terminal in one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: ColorSpec,
    /// Regular output text
    pub foreground: ColorSpec,
    /// Prompt echo and highlights
    pub accent: ColorSpec,
    /// Status bar background
    pub secondary: ColorSpec,
    pub border: ColorSpec,
    /// Error / glitch lines
    pub glitch: ColorSpec,
}

impl Palette {
    pub fn new(
        background: &str,
        foreground: &str,
        accent: &str,
        secondary: &str,
        border: &str,
    ) -> Self {
        Self {
            background: ColorSpec::new(background),
            foreground: ColorSpec::new(foreground),
            accent: ColorSpec::new(accent),
            secondary: ColorSpec::new(secondary),
            border: ColorSpec::new(border),
            glitch: ColorSpec::new("lightred"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(ColorSpec::new("#00cc00").to_color(), Color::Rgb(0, 0xcc, 0));
        assert_eq!(ColorSpec::new("#zz").to_color(), Color::Reset);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(ColorSpec::new("Cyan").to_color(), Color::Cyan);
        assert_eq!(ColorSpec::new("plaid").to_color(), Color::Reset);
    }
}
