use core::fmt;
use std::{io, path::Path};

use encoding_rs::Encoding;
use ropey::{Rope, RopeSlice};

use self::graphemes::{RopeGraphemeExt as _, column_to_byte, str_width};

pub mod graphemes;
pub mod input;
pub mod read;
pub mod write;


#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset of the caret.
    pub position: usize,
    /// Column the caret tries to return to when moving between lines.
    pub affinity: usize,
}

pub struct Buffer {
    cursor: Cursor,
    line_pos: usize,
    col_pos: usize,
    rope: Rope,
    dirty: bool,
    pub encoding: &'static Encoding,
    view_lines: usize,
    view_columns: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self {
            cursor: Cursor::default(),
            line_pos: 0,
            col_pos: 0,
            rope: Rope::new(),
            dirty: false,
            encoding: encoding_rs::UTF_8,
            view_lines: 10000,
            view_columns: 10000,
        }
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clean buffer holding `text` with the caret at the end.
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self {
            rope: Rope::from(text),
            ..Default::default()
        };
        buffer.eof();
        buffer
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let (encoding, rope) = read::read_from_file(path)?;
        let mut buffer = Self {
            rope,
            encoding,
            ..Default::default()
        };
        buffer.eof();
        Ok(buffer)
    }

    /// Replaces the whole text and moves the caret to the end.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from(text);
        self.line_pos = 0;
        self.col_pos = 0;
        self.eof();
        self.mark_dirty();
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_blank(&self) -> bool {
        self.rope.chars().all(char::is_whitespace)
    }

    pub fn set_view_lines(&mut self, lines: usize) {
        self.view_lines = lines;
    }

    pub fn get_view_lines(&self) -> usize {
        self.view_lines
    }

    pub fn get_view_columns(&self) -> usize {
        self.view_columns
    }

    pub fn set_view_columns(&mut self, cols: usize) {
        self.view_columns = cols;
    }

    pub fn line_pos(&self) -> usize {
        self.line_pos
    }

    pub fn col_pos(&self) -> usize {
        self.col_pos
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn cursor_line_idx(&self) -> usize {
        self.rope.byte_to_line(self.cursor.position)
    }

    /// Byte column and line index of the caret.
    pub fn cursor_pos(&self) -> (usize, usize) {
        let current_line = self.cursor_line_idx();
        let start_of_line = self.rope.line_to_byte(current_line);
        (self.cursor.position - start_of_line, current_line)
    }

    pub fn cursor_grapheme_column(&self) -> usize {
        let (column_idx, line_idx) = self.cursor_pos();
        let line = self.rope.line(line_idx).byte_slice(..column_idx).to_string();
        str_width(&line, 0)
    }

    /// Caret position relative to the visible part of the buffer.
    pub fn cursor_view_pos(&self) -> Option<(usize, usize)> {
        let line = self.cursor_line_idx();
        let column = self.cursor_grapheme_column();
        if line < self.line_pos
            || line >= self.line_pos + self.view_lines
            || column < self.col_pos
            || column > self.col_pos + self.view_columns
        {
            return None;
        }
        Some((column - self.col_pos, line - self.line_pos))
    }

    /// The line holding the caret, without its line ending.
    pub fn current_line(&self) -> RopeSlice<'_> {
        self.rope.line_without_line_ending(self.cursor_line_idx())
    }

    pub fn line(&self, line_idx: usize) -> RopeSlice<'_> {
        self.rope.line_without_line_ending(line_idx)
    }

    pub fn update_affinity(&mut self) {
        self.cursor.affinity = self.cursor_grapheme_column();
    }

    pub fn vertical_scroll(&mut self, distance: i64) {
        self.line_pos = (self.line_pos as i128 + distance as i128)
            .clamp(0, self.len_lines() as i128 - 1) as usize;
    }

    pub fn horizontal_scroll(&mut self, distance: i64) {
        self.col_pos =
            (self.col_pos as i128 + distance as i128).clamp(0, usize::MAX as i128 - 1) as usize;
    }

    pub fn move_right_char(&mut self) {
        self.cursor.position = self.rope.next_grapheme_boundary_byte(self.cursor.position);
        self.update_affinity();

        self.center_on_cursor();
    }

    pub fn move_left_char(&mut self) {
        self.cursor.position = self.rope.prev_grapheme_boundary_byte(self.cursor.position);
        self.update_affinity();

        self.center_on_cursor();
    }

    fn move_to_line(&mut self, line_idx: usize) {
        let line = self.rope.line_without_line_ending(line_idx).to_string();
        self.cursor.position =
            self.rope.line_to_byte(line_idx) + column_to_byte(&line, self.cursor.affinity);

        self.center_on_cursor();
    }

    pub fn move_down(&mut self, distance: usize) {
        let line_idx = self.cursor_line_idx();
        let new_line_idx = (line_idx + distance).min(self.rope.len_lines().saturating_sub(1));
        if line_idx == new_line_idx {
            return;
        }
        self.move_to_line(new_line_idx);
    }

    pub fn move_up(&mut self, distance: usize) {
        let line_idx = self.cursor_line_idx();
        if line_idx == 0 {
            return;
        }
        self.move_to_line(line_idx.saturating_sub(distance));
    }

    pub fn home(&mut self) {
        self.cursor.position = self.rope.line_to_byte(self.cursor_line_idx());
        self.update_affinity();

        self.center_on_cursor();
    }

    pub fn end(&mut self) {
        self.cursor.position = self.rope.end_of_line_byte(self.cursor_line_idx());
        self.update_affinity();

        self.center_on_cursor();
    }

    pub fn start(&mut self) {
        self.cursor.position = 0;
        self.update_affinity();

        self.center_on_cursor();
    }

    pub fn eof(&mut self) {
        self.cursor.position = self.rope.len_bytes();
        self.update_affinity();

        self.center_on_cursor();
    }

    /// Inserts `text` at the caret and leaves the caret after it.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let char_idx = self.rope.byte_to_char(self.cursor.position);
        self.rope.insert(char_idx, text);
        self.cursor.position += text.len();

        self.update_affinity();
        self.mark_dirty();

        self.center_on_cursor();
    }

    fn remove(&mut self, start_byte_idx: usize, end_byte_idx: usize) {
        if start_byte_idx == end_byte_idx {
            return;
        }

        let start = self.rope.byte_to_char(start_byte_idx);
        let end = self.rope.byte_to_char(end_byte_idx);
        self.rope.remove(start..end);
        self.cursor.position = start_byte_idx;
        self.update_affinity();
        self.mark_dirty();

        self.center_on_cursor();
    }

    pub fn backspace(&mut self) {
        let start_byte_idx = self.rope.prev_grapheme_boundary_byte(self.cursor.position);
        self.remove(start_byte_idx, self.cursor.position);
    }

    pub fn delete(&mut self) {
        let end_byte_idx = self.rope.next_grapheme_boundary_byte(self.cursor.position);
        self.remove(self.cursor.position, end_byte_idx);
    }

    /// Places the caret on `line` at display column `col`, clamped to the text.
    pub fn set_cursor_pos(&mut self, col: usize, line: usize) {
        let line_idx = line.min(self.rope.len_lines().saturating_sub(1));
        let text = self.rope.line_without_line_ending(line_idx).to_string();
        self.cursor.position = self.rope.line_to_byte(line_idx) + column_to_byte(&text, col);
        self.update_affinity();

        self.center_on_cursor();
    }

    pub fn center_on_cursor(&mut self) {
        {
            let cursor_line = self.rope.byte_to_line(self.cursor.position);
            let start_line = self.line_pos;
            let end_line = self.line_pos + self.view_lines;
            if cursor_line < start_line || cursor_line >= end_line {
                self.line_pos = cursor_line.saturating_sub(self.view_lines / 2);
            }
        }

        {
            let cursor_col = self.cursor_grapheme_column();
            let start_col = self.col_pos;
            let end_col = self.col_pos + self.view_columns;

            if cursor_col < start_col {
                self.horizontal_scroll(-((start_col - cursor_col) as i64));
            } else if cursor_col >= end_col {
                self.horizontal_scroll((cursor_col - end_col + 1) as i64);
            }
        }
    }
}
