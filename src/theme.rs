use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod gruvbox;
pub mod nord;
pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub base: Style,
    pub border: Style,
    pub border_focus: Style,

    pub backdrop_hint: Style,
    pub backdrop_key: Style,

    pub overlay_title: Style,
    pub query_prompt: Style,
    pub query_text: Style,
    pub query_placeholder: Style,
    pub divider: Style,

    pub list_item: Style,
    pub list_selected: Style,
    pub list_marker: Style,
    pub avatar: Style,
    pub no_results: Style,

    pub badge_block: Style,
    pub badge_pattern: Style,
    pub preview_title: Style,
    pub preview_description: Style,
    pub preview_body: Style,

    pub footer_key: Style,
    pub footer_text: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteType {
    #[default]
    CatppuccinMocha,
    Nord,
    Gruvbox,
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
            PaletteType::Gruvbox => Self::from_palette(&gruvbox::GRUVBOX),
        }
    }

    pub fn from_palette(p: &Palette) -> Self {
        Self {
            base: Style::default().bg(p.base).fg(p.text),
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            backdrop_hint: Style::default()
                .fg(p.surface1)
                .add_modifier(Modifier::BOLD),
            backdrop_key: Style::default()
                .fg(p.overlay0)
                .add_modifier(Modifier::BOLD),

            overlay_title: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            query_prompt: Style::default().fg(p.blue).add_modifier(Modifier::BOLD),
            query_text: Style::default().fg(p.text),
            query_placeholder: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),
            divider: Style::default().fg(p.surface2),

            list_item: Style::default().fg(p.text),
            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            list_marker: Style::default().fg(p.peach).add_modifier(Modifier::BOLD),
            avatar: Style::default()
                .bg(p.mauve)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            no_results: Style::default().fg(p.subtext0).add_modifier(Modifier::DIM),

            badge_block: Style::default()
                .bg(p.teal)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            badge_pattern: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            preview_title: Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            preview_description: Style::default().fg(p.subtext0),
            preview_body: Style::default().fg(p.green).bg(dim_color(p.green, 0.12)),

            footer_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_text: Style::default().fg(p.subtext0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names_round_trip_through_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: PaletteType,
        }
        for (name, expected) in [
            ("catppuccin-mocha", PaletteType::CatppuccinMocha),
            ("nord", PaletteType::Nord),
            ("gruvbox", PaletteType::Gruvbox),
        ] {
            let w: Wrapper = toml::from_str(&format!("theme = \"{name}\"")).unwrap();
            assert_eq!(w.theme, expected);
        }
    }

    #[test]
    fn test_every_palette_builds_distinct_theme() {
        let themes: Vec<Theme> = [
            PaletteType::CatppuccinMocha,
            PaletteType::Nord,
            PaletteType::Gruvbox,
        ]
        .into_iter()
        .map(Theme::from_palette_type)
        .collect();
        assert_ne!(themes[0], themes[1]);
        assert_ne!(themes[1], themes[2]);
    }

    #[test]
    fn test_preview_body_sits_on_dimmed_green() {
        let p = catppuccin::CATPPUCCIN_MOCHA;
        let theme = Theme::from_palette(&p);
        assert_eq!(theme.preview_body.fg, Some(p.green));
        assert_eq!(theme.preview_body.bg, Some(dim_color(p.green, 0.12)));
    }
}
