use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPalette {
    pub base_fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub matched: Color,
    pub selection: Color,
    pub navigation: Color,
    pub navigation_dir: Color,
}

impl UiPalette {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_fg: Color::Reset,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            matched: parse_color(&config.match_color, Color::Cyan),
            selection: parse_color(&config.selection_color, Color::Blue),
            navigation: parse_color(&config.navigation_color, Color::Gray),
            navigation_dir: parse_color(&config.navigation_dir_color, Color::Cyan),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.base_fg)
    }

    pub fn match_style(&self) -> Style {
        Style::default().bg(self.matched).fg(Color::Black)
    }

    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.selection).fg(Color::White)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        warn!(color = name, "unknown color in config, using default");
        fallback
    })
}
