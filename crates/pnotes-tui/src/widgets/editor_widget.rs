use pnotes_core::buffer::{
    Buffer,
    graphemes::{grapheme_width, tab_width_at},
};
use tui::{
    layout::Rect,
    widgets::{Clear, StatefulWidget, Widget},
};
use unicode_segmentation::UnicodeSegmentation;

use crate::theme::NotesTheme;

pub struct EditorWidget<'a> {
    theme: &'a NotesTheme,
    has_focus: bool,
}

impl<'a> EditorWidget<'a> {
    pub fn new(theme: &'a NotesTheme, has_focus: bool) -> Self {
        Self { theme, has_focus }
    }
}

impl StatefulWidget for EditorWidget<'_> {
    type State = Buffer;

    fn render(
        self,
        area: tui::layout::Rect,
        buf: &mut tui::buffer::Buffer,
        buffer: &mut Self::State,
    ) {
        if area.area() == 0 {
            return;
        }

        Clear.render(area, buf);
        buf.set_style(area, self.theme.background);

        let resized = buffer.get_view_lines() != area.height as usize
            || buffer.get_view_columns() != area.width as usize;
        buffer.set_view_lines(area.height.into());
        buffer.set_view_columns(area.width.into());
        if resized {
            buffer.center_on_cursor();
        }

        let first_col = buffer.col_pos();
        let last_col = first_col + area.width as usize;

        for row in 0..area.height {
            let line_idx = buffer.line_pos() + row as usize;
            if line_idx >= buffer.len_lines() {
                break;
            }

            let y = area.y + row;
            let text = buffer.line(line_idx).to_string();
            let mut col = 0;
            for grapheme in text.graphemes(true) {
                let width = grapheme_width(grapheme, col);
                if col >= last_col {
                    break;
                }

                if col >= first_col && col + width <= last_col {
                    let x = area.x + (col - first_col) as u16;
                    if grapheme == "\t" {
                        let spaces = " ".repeat(tab_width_at(col));
                        buf.set_stringn(x, y, spaces, width, self.theme.text);
                    } else if grapheme.chars().any(|ch| ch.is_control()) {
                        buf.set_stringn(x, y, "\u{FFFD}", width, self.theme.dim_text);
                    } else {
                        buf.set_stringn(x, y, grapheme, width, self.theme.text);
                    }
                }
                col += width;
            }
        }

        if self.has_focus {
            if let Some((column, line)) = buffer.cursor_view_pos() {
                if column < area.width as usize && line < area.height as usize {
                    let rect = Rect::new(area.x + column as u16, area.y + line as u16, 1, 1);
                    buf.set_style(rect, self.theme.cursor);
                }
            }
        }
    }
}
