use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    Dark,
    Light,
}

impl ThemePreset {
    pub const ALL: &[ThemePreset] = &[ThemePreset::Dark, ThemePreset::Light];

    pub fn name(self) -> &'static str {
        match self {
            ThemePreset::Dark => "dark",
            ThemePreset::Light => "light",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemePreset::Light,
            _ => ThemePreset::Dark,
        }
    }
}

pub struct Theme {
    pub bg_page: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub accent: Color,
    pub danger: Color,
}

impl Theme {
    pub fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Dark => Self {
                bg_page: Color::Rgb(16, 16, 20),
                text_primary: Color::Rgb(230, 230, 235),
                text_secondary: Color::Rgb(170, 170, 180),
                text_tertiary: Color::Rgb(110, 110, 122),
                accent: Color::Rgb(122, 162, 247),
                danger: Color::Rgb(247, 118, 142),
            },
            ThemePreset::Light => Self {
                bg_page: Color::Rgb(250, 250, 248),
                text_primary: Color::Rgb(32, 32, 40),
                text_secondary: Color::Rgb(90, 90, 100),
                text_tertiary: Color::Rgb(150, 150, 158),
                accent: Color::Rgb(52, 84, 168),
                danger: Color::Rgb(186, 36, 66),
            },
        }
    }
}
