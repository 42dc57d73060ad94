use ratatui::style::Color;

/// The named colors a theme is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub crust: Color,
    pub text: Color,
    pub subtext0: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,
    pub overlay0: Color,
    pub blue: Color,
    pub teal: Color,
    pub green: Color,
    pub yellow: Color,
    pub peach: Color,
    pub mauve: Color,
}

/// Scales an `Rgb` color toward black by `factor` (0.0 = black, 1.0 = unchanged).
/// Other `Color` variants pass through.
#[must_use]
pub fn dim_color(c: Color, factor: f32) -> Color {
    match c {
        Color::Rgb(r, g, b) => {
            let scale = |v: u8| (f32::from(v) * factor.clamp(0.0, 1.0)) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}
