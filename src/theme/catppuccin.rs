use super::palette::Palette;
use ratatui::style::Color;

pub const CATPPUCCIN_MOCHA: Palette = Palette {
    base: Color::Rgb(30, 30, 46),
    crust: Color::Rgb(17, 17, 27),
    text: Color::Rgb(205, 214, 244),
    subtext0: Color::Rgb(166, 173, 200),
    surface0: Color::Rgb(49, 50, 68),
    surface1: Color::Rgb(69, 71, 90),
    surface2: Color::Rgb(88, 91, 112),
    overlay0: Color::Rgb(108, 112, 134),
    blue: Color::Rgb(137, 180, 250),
    teal: Color::Rgb(148, 226, 213),
    green: Color::Rgb(166, 227, 161),
    yellow: Color::Rgb(249, 226, 175),
    peach: Color::Rgb(250, 179, 135),
    mauve: Color::Rgb(203, 166, 247),
};
