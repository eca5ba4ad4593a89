use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Colours used by every render function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg_base: Color,
    pub bg_panel: Color,
    pub bg_panel_alt: Color,
    pub bg_highlight: Color,
    pub text_main: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub accent_alt: Color,
}

const DARK: Palette = Palette {
    bg_base: Color::Rgb(12, 18, 28),
    bg_panel: Color::Rgb(20, 32, 46),
    bg_panel_alt: Color::Rgb(26, 40, 58),
    bg_highlight: Color::Rgb(28, 92, 110),
    text_main: Color::Rgb(232, 242, 244),
    text_dim: Color::Rgb(176, 195, 207),
    accent: Color::Rgb(72, 204, 184),
    accent_alt: Color::Rgb(228, 176, 88),
};

const LIGHT: Palette = Palette {
    bg_base: Color::Rgb(238, 242, 246),
    bg_panel: Color::Rgb(250, 251, 253),
    bg_panel_alt: Color::Rgb(228, 234, 240),
    bg_highlight: Color::Rgb(196, 226, 232),
    text_main: Color::Rgb(24, 32, 44),
    text_dim: Color::Rgb(92, 108, 124),
    accent: Color::Rgb(204, 52, 52),
    accent_alt: Color::Rgb(40, 112, 180),
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn palette(&self) -> Palette {
        match self.mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }
}
