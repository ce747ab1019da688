use pnotes_core::{
    keymap::{Keymapping, find_key_for_cmd},
    menu::{Menu, MenuAction},
};
use tui::{
    layout::Rect,
    widgets::{Block, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::NotesTheme;

pub const TITLE: &str = "Persistent Notes";
const FILE_LABEL: &str = " File ";

/// The one line bar at the top of the window with the title and the
/// `File` menu.
pub struct MenuBar<'a> {
    theme: &'a NotesTheme,
    menu: &'a Menu,
}

impl<'a> MenuBar<'a> {
    pub fn new(theme: &'a NotesTheme, menu: &'a Menu) -> Self {
        Self { theme, menu }
    }
}

impl Widget for MenuBar<'_> {
    fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
        if area.area() == 0 {
            return;
        }

        buf.set_style(area, self.theme.menu_bar);
        let file_style = if self.menu.is_open() {
            self.theme.menu_selected
        } else {
            self.theme.menu_bar
        };
        buf.set_stringn(area.x, area.y, FILE_LABEL, area.width.into(), file_style);

        let label_width = FILE_LABEL.width();
        let title_width = TITLE.width();
        if area.width as usize > label_width + title_width + 2 {
            let x = area.x + (area.width - title_width as u16) / 2;
            buf.set_string(x, area.y, TITLE, self.theme.menu_bar);
        }
    }
}

/// Entries of the `File` menu drawn below the menu bar.
pub struct MenuDropdown<'a> {
    theme: &'a NotesTheme,
    menu: &'a Menu,
    mappings: &'a [Keymapping],
}

impl<'a> MenuDropdown<'a> {
    pub fn new(theme: &'a NotesTheme, menu: &'a Menu, mappings: &'a [Keymapping]) -> Self {
        Self {
            theme,
            menu,
            mappings,
        }
    }

    pub fn entries(&self) -> Vec<(MenuAction, String)> {
        let labels: Vec<_> = MenuAction::ALL
            .iter()
            .map(|action| {
                let key = find_key_for_cmd(&action.cmd(), self.mappings)
                    .map(|key| key.to_string())
                    .unwrap_or_default();
                (*action, action.label(), key)
            })
            .collect();

        let label_width = labels.iter().map(|(_, l, _)| l.width()).max().unwrap_or(0);
        let key_width = labels.iter().map(|(_, _, k)| k.width()).max().unwrap_or(0);
        labels
            .into_iter()
            .map(|(action, label, key)| {
                (
                    action,
                    format!(" {label:<label_width$}   {key:>key_width$} "),
                )
            })
            .collect()
    }
}

impl Widget for MenuDropdown<'_> {
    fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
        if !self.menu.is_open() || area.area() == 0 {
            return;
        }

        let entries = self.entries();
        let inner_width = entries.iter().map(|(_, e)| e.width()).max().unwrap_or(0) as u16;
        let rect = Rect::new(area.x, area.y, inner_width + 2, entries.len() as u16 + 2)
            .intersection(area);

        Clear.render(rect, buf);
        Block::bordered()
            .style(self.theme.menu_bar)
            .render(rect, buf);

        for (i, (action, entry)) in entries.iter().enumerate() {
            let y = rect.y + 1 + i as u16;
            if y >= rect.bottom().saturating_sub(1) {
                break;
            }
            let style = if *action == self.menu.selected() {
                self.theme.menu_selected
            } else {
                self.theme.menu_bar
            };
            let line = Rect::new(rect.x + 1, y, rect.width.saturating_sub(2), 1);
            buf.set_style(line, style);
            buf.set_stringn(line.x, y, entry, line.width.into(), style);
        }
    }
}
