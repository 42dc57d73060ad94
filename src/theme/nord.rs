use super::palette::Palette;
use ratatui::style::Color;

pub const NORD: Palette = Palette {
    base: Color::Rgb(46, 52, 64),
    crust: Color::Rgb(43, 48, 59),
    text: Color::Rgb(236, 239, 244),
    subtext0: Color::Rgb(216, 222, 233),
    surface0: Color::Rgb(76, 86, 106),
    surface1: Color::Rgb(59, 66, 82),
    surface2: Color::Rgb(67, 76, 94),
    overlay0: Color::Rgb(129, 161, 193),
    blue: Color::Rgb(129, 161, 193),
    teal: Color::Rgb(143, 188, 187),
    green: Color::Rgb(163, 190, 140),
    yellow: Color::Rgb(235, 203, 139),
    peach: Color::Rgb(208, 135, 112),
    mauve: Color::Rgb(180, 142, 173),
};
