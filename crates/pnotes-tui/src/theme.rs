use pnotes_core::config::Config;
use tui::style::{Color, Modifier, Style};

use crate::glue::convert_rgb;

/// Styles used by the widgets, derived from the user config.
#[derive(Debug, Clone)]
pub struct NotesTheme {
    pub background: Style,
    pub text: Style,
    pub dim_text: Style,
    pub error_text: Style,
    pub cursor: Style,
    pub info_line: Style,
    pub menu_bar: Style,
    pub menu_selected: Style,
}

impl NotesTheme {
    pub fn from_config(config: &Config) -> Self {
        let bg = convert_rgb(config.background);
        let fg = convert_rgb(config.foreground);
        let text = Style::default().fg(fg).bg(bg);
        let bar = Style::default().fg(bg).bg(fg);
        Self {
            background: Style::default().bg(bg),
            text,
            dim_text: text.add_modifier(Modifier::DIM),
            error_text: Style::default().fg(Color::Red).bg(bg),
            cursor: text.add_modifier(Modifier::REVERSED),
            info_line: bar,
            menu_bar: bar,
            menu_selected: text.add_modifier(Modifier::BOLD),
        }
    }
}
