use std::path::Path;

use encoding_rs::Encoding;
use pnotes_core::byte_size::format_byte_size;
use tui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::theme::NotesTheme;

pub struct InfoLine<'a> {
    pub theme: &'a NotesTheme,
    pub encoding: &'static Encoding,
    pub file: &'a Path,
    pub column: usize,
    pub line: usize,
    pub dirty: bool,
    pub size: usize,
}

impl InfoLine<'_> {
    pub fn left(&self) -> String {
        let mut file = format!(" {}", self.file.to_string_lossy());
        if self.dirty {
            file += " *";
        }
        file
    }

    pub fn right(&self) -> String {
        format!(
            "{}  {}:{}  {} ",
            self.encoding.name(),
            self.line,
            self.column,
            format_byte_size(self.size)
        )
    }
}

impl Widget for InfoLine<'_> {
    fn render(self, area: tui::layout::Rect, buf: &mut tui::buffer::Buffer) {
        let style = self.theme.info_line;
        buf.set_style(area, style);

        let left = self.left();
        let right = self.right();
        let left_width = left.width();
        let right_width = right.width();

        buf.set_stringn(area.x, area.y, &left, area.width.into(), style);

        if area.width as usize > left_width + right_width {
            let x = area.x + area.width - right_width as u16;
            buf.set_string(x, area.y, &right, style);
        }
    }
}
