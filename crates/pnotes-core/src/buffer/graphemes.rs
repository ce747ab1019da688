//! Grapheme aware helpers for walking the text of a `Rope`.
//!
//! Boundaries are always computed within a single line, line endings
//! (including `\r\n`) are stepped over as one unit.
use ropey::{Rope, RopeSlice};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub const TAB_WIDTH: usize = 4;

#[inline]
pub fn tab_width_at(visual_x: usize) -> usize {
    TAB_WIDTH - (visual_x % TAB_WIDTH)
}

#[must_use]
pub fn grapheme_width(g: &str, current_col: usize) -> usize {
    match g.as_bytes().first() {
        None => 0,
        Some(b'\t') => tab_width_at(current_col),
        // ascii control characters are still editable so they get a cell
        Some(byte) if *byte <= 127 => 1,
        Some(_) => UnicodeWidthStr::width(g).max(1),
    }
}

/// Display width of `text` when it starts at column `start_col`.
pub fn str_width(text: &str, start_col: usize) -> usize {
    let mut col = start_col;
    for g in text.graphemes(true) {
        col += grapheme_width(g, col);
    }
    col - start_col
}

/// Byte offset of the first grapheme that starts at or after `column`.
pub fn column_to_byte(text: &str, column: usize) -> usize {
    let mut col = 0;
    for (idx, g) in text.grapheme_indices(true) {
        if col >= column {
            return idx;
        }
        col += grapheme_width(g, col);
    }
    text.len()
}

/// Length in bytes of the line ending at the end of `line`, 0 if there is none.
pub fn line_ending_len(line: RopeSlice) -> usize {
    let len_chars = line.len_chars();
    if len_chars == 0 {
        return 0;
    }

    match line.char(len_chars - 1) {
        '\n' if len_chars >= 2 && line.char(len_chars - 2) == '\r' => 2,
        ch @ ('\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}') => {
            ch.len_utf8()
        }
        _ => 0,
    }
}

pub trait RopeGraphemeExt {
    fn line_without_line_ending(&self, line_idx: usize) -> RopeSlice<'_>;
    fn prev_grapheme_boundary_byte(&self, byte_idx: usize) -> usize;
    fn next_grapheme_boundary_byte(&self, byte_idx: usize) -> usize;
    fn end_of_line_byte(&self, line_idx: usize) -> usize;
}

impl RopeGraphemeExt for Rope {
    fn line_without_line_ending(&self, line_idx: usize) -> RopeSlice<'_> {
        let line = self.line(line_idx);
        line.byte_slice(..line.len_bytes() - line_ending_len(line))
    }

    fn prev_grapheme_boundary_byte(&self, byte_idx: usize) -> usize {
        if byte_idx == 0 {
            return 0;
        }

        let line_idx = self.byte_to_line(byte_idx);
        let line_start = self.line_to_byte(line_idx);
        if byte_idx == line_start {
            return byte_idx - line_ending_len(self.line(line_idx - 1));
        }

        let text = self.line(line_idx).to_string();
        text[..byte_idx - line_start]
            .grapheme_indices(true)
            .next_back()
            .map(|(idx, _)| line_start + idx)
            .unwrap_or(line_start)
    }

    fn next_grapheme_boundary_byte(&self, byte_idx: usize) -> usize {
        if byte_idx >= self.len_bytes() {
            return self.len_bytes();
        }

        let line_idx = self.byte_to_line(byte_idx);
        let line_start = self.line_to_byte(line_idx);
        let line = self.line(line_idx);
        let text_len = line.len_bytes() - line_ending_len(line);
        let offset = byte_idx - line_start;
        if offset >= text_len {
            return line_start + line.len_bytes();
        }

        let text = line.to_string();
        text[offset..text_len]
            .graphemes(true)
            .next()
            .map(|g| byte_idx + g.len())
            .unwrap_or(line_start + text_len)
    }

    fn end_of_line_byte(&self, line_idx: usize) -> usize {
        self.line_to_byte(line_idx) + self.line_without_line_ending(line_idx).len_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_over_crlf_as_one_unit() {
        let rope = Rope::from_str("ab\r\ncd");
        assert_eq!(rope.next_grapheme_boundary_byte(2), 4);
        assert_eq!(rope.prev_grapheme_boundary_byte(4), 2);
    }

    #[test]
    fn combined_graphemes_are_not_split() {
        let rope = Rope::from_str("e\u{301}x");
        assert_eq!(rope.next_grapheme_boundary_byte(0), 3);
        assert_eq!(rope.prev_grapheme_boundary_byte(3), 0);
    }

    #[test]
    fn boundaries_clamp_at_the_ends() {
        let rope = Rope::from_str("a");
        assert_eq!(rope.prev_grapheme_boundary_byte(0), 0);
        assert_eq!(rope.next_grapheme_boundary_byte(1), 1);
    }

    #[test]
    fn tabs_align_to_tab_stops() {
        assert_eq!(str_width("\t", 0), 4);
        assert_eq!(str_width("ab\t", 0), 4);
        assert_eq!(str_width("\t", 1), 3);
        assert_eq!(column_to_byte("a\tb", 4), 2);
    }

    #[test]
    fn line_without_ending() {
        let rope = Rope::from_str("one\r\ntwo\n");
        assert_eq!(rope.line_without_line_ending(0), "one");
        assert_eq!(rope.line_without_line_ending(1), "two");
        assert_eq!(rope.line_without_line_ending(2), "");
        assert_eq!(rope.end_of_line_byte(1), 8);
    }
}
