//! The note buffer controller.
//!
//! Owns the single note buffer and the path it is persisted to. Task lines
//! are lines starting with `<number>. `, their numbers are never stored and
//! are always derived from the buffer text.
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;

use crate::{
    buffer::{Buffer, write},
    error::NotesError,
};

pub const FIRST_TASK: &str = "1. ";
pub const NOTES_FILE_NAME: &str = ".persistent_notes.txt";

/// `~/.persistent_notes.txt`
pub fn default_notes_path() -> Result<PathBuf, NotesError> {
    let Some(dirs) = directories::BaseDirs::new() else {
        return Err(NotesError::NoHomeDir);
    };
    Ok(dirs.home_dir().join(NOTES_FILE_NAME))
}

// `\d` is any Unicode decimal digit (`\p{Nd}`), not only ASCII.
fn task_line_regex() -> &'static Regex {
    static TASK_LINE: OnceLock<Regex> = OnceLock::new();
    TASK_LINE.get_or_init(|| Regex::new(r"(?m)^(\d+)\.\s").expect("task line regex is valid"))
}

fn is_decimal_digit(ch: char) -> bool {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    DIGIT
        .get_or_init(|| Regex::new(r"^\d$").expect("digit regex is valid"))
        .is_match(ch.encode_utf8(&mut [0; 4]))
}

/// Value of a Unicode decimal digit.
///
/// Decimal digits are encoded in runs of whole `0..=9` sets with ascending
/// code points, so the value is the distance to the start of the run modulo 10.
fn digit_value(ch: char) -> u8 {
    if let Some(value) = ch.to_digit(10) {
        return value as u8;
    }

    let mut start = ch as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    ((ch as u32 - start) % 10) as u8
}

/// Adds one to a decimal number of any length. The result uses ASCII digits.
fn increment_decimal(digits: &str) -> String {
    let ascii: String = digits
        .chars()
        .map(|ch| char::from(b'0' + digit_value(ch)))
        .collect();
    let mut out: Vec<u8> = ascii.trim_start_matches('0').bytes().collect();
    let mut idx = out.len();
    loop {
        if idx == 0 {
            out.insert(0, b'1');
            break;
        }
        idx -= 1;
        if out[idx] == b'9' {
            out[idx] = b'0';
        } else {
            out[idx] += 1;
            break;
        }
    }
    out.into_iter().map(char::from).collect()
}

/// Number for the next task line: the textually last task number plus one,
/// or `1` when the text has no task lines.
///
/// The last match in document order wins, not the largest number. The text
/// is scanned as if it ended with a line break so a bare `"7."` on the final
/// line still counts.
pub fn next_task_number(text: &str) -> String {
    let text = format!("{text}\n");
    match task_line_regex().captures_iter(&text).last() {
        Some(captures) => increment_decimal(&captures[1]),
        None => String::from("1"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// A numbered line was inserted, the default line break must not happen.
    Handled,
    /// Nothing was inserted, the caller inserts a plain line break.
    Default,
}

pub struct Notes {
    buffer: Buffer,
    path: PathBuf,
}

impl Notes {
    /// Loads the notes at `path`. A missing or blank file starts a fresh
    /// list, any other content is kept verbatim.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, NotesError> {
        let path = path.into();
        let buffer = match Buffer::from_file(&path) {
            Ok(buffer) if !buffer.is_blank() => {
                tracing::info!("Loaded {} bytes from `{}`", buffer.len_bytes(), path.display());
                buffer
            }
            Ok(mut buffer) => {
                tracing::info!("`{}` is blank, starting a new list", path.display());
                buffer.set_text(FIRST_TASK);
                buffer.mark_clean();
                buffer
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!("`{}` does not exist, starting a new list", path.display());
                Buffer::with_text(FIRST_TASK)
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self { buffer, path })
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn next_task_number(&self) -> String {
        next_task_number(&self.buffer.to_string())
    }

    /// Handles Enter pressed with the caret on the current line.
    pub fn on_enter(&mut self) -> EnterOutcome {
        if self.buffer.current_line().chars().all(char::is_whitespace) {
            return EnterOutcome::Default;
        }

        let number = self.next_task_number();
        self.buffer.insert_text(&format!("\n{number}. "));
        EnterOutcome::Handled
    }

    /// Writes the whole buffer to the notes file.
    pub fn save(&mut self) -> Result<usize, NotesError> {
        let (encoding, written) =
            write::write(self.buffer.encoding, self.buffer.rope(), &self.path).inspect_err(
                |err| tracing::error!("Could not save notes to `{}`: {err}", self.path.display()),
            )?;
        self.buffer.encoding = encoding;
        self.buffer.mark_clean();
        tracing::info!("Saved {written} bytes to `{}`", self.path.display());
        Ok(written)
    }

    /// Resets the buffer to a fresh list and removes the notes file.
    /// Only call this after the user confirmed it.
    pub fn clear(&mut self) -> Result<(), NotesError> {
        self.buffer.set_text(FIRST_TASK);
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Removed `{}`", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                tracing::error!("Could not remove `{}`: {err}", self.path.display());
                Err(err.into())
            }
        }
    }

    /// Best effort save before the application exits.
    pub fn on_close(&mut self) {
        let _ = self.save();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;
    use crate::cmd::Cmd;

    fn notes_with(text: &str) -> (TempDir, Notes) {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let path = tmp_dir.path().join(NOTES_FILE_NAME);
        fs::write(&path, text).unwrap();
        let notes = Notes::load(&path).unwrap();
        (tmp_dir, notes)
    }

    #[test]
    fn load_missing_file_starts_fresh() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let notes = Notes::load(tmp_dir.path().join(NOTES_FILE_NAME)).unwrap();
        assert_eq!(notes.buffer().to_string(), "1. ");
        assert!(!notes.buffer().is_dirty());
        assert_eq!(notes.buffer().cursor().position, 3);
    }

    #[test]
    fn load_blank_file_starts_fresh() {
        let (_tmp_dir, notes) = notes_with("  \n\t\n ");
        assert_eq!(notes.buffer().to_string(), "1. ");
    }

    #[test]
    fn load_keeps_content_verbatim() {
        let (_tmp_dir, notes) = notes_with("hello");
        assert_eq!(notes.buffer().to_string(), "hello");

        let (_tmp_dir, notes) = notes_with("  3. out of order\n1. x\n\n");
        assert_eq!(notes.buffer().to_string(), "  3. out of order\n1. x\n\n");
    }

    #[test]
    fn load_directory_is_an_error() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        assert!(Notes::load(tmp_dir.path()).is_err());
    }

    #[test]
    fn next_number_without_tasks() {
        assert_eq!(next_task_number(""), "1");
        assert_eq!(next_task_number("hello\nworld"), "1");
        assert_eq!(next_task_number(" 1. indented"), "1");
        assert_eq!(next_task_number("1.no space"), "1");
    }

    #[test]
    fn next_number_uses_last_match() {
        assert_eq!(next_task_number("1. a\n2. b"), "3");
        assert_eq!(next_task_number("5. x"), "6");
        assert_eq!(next_task_number("1. a\n9. b\n3. c"), "4");
        assert_eq!(next_task_number("1. a\nnote\n\n2. b\nmore"), "3");
    }

    #[test]
    fn next_number_accepts_unicode_digits() {
        assert_eq!(next_task_number("\u{663}. x"), "4");
        assert_eq!(next_task_number("\u{661}\u{660}. x"), "11");
        assert_eq!(next_task_number("\u{966}\u{967}\u{969}. x"), "14");
        // mathematical bold nine and double-struck zero share one run
        assert_eq!(next_task_number("\u{1D7D7}. x"), "10");
        assert_eq!(next_task_number("\u{1D7D8}. x"), "1");
        assert_eq!(next_task_number("1. a\n\u{FF15}. b"), "6");
    }

    #[test]
    fn next_number_on_bare_final_line() {
        assert_eq!(next_task_number("1. a\n7."), "8");
        assert_eq!(next_task_number("1. a\n7.\t"), "8");
    }

    #[test]
    fn next_number_handles_any_length() {
        assert_eq!(next_task_number("9. x"), "10");
        assert_eq!(next_task_number("099. x"), "100");
        assert_eq!(next_task_number("0. x"), "1");
        assert_eq!(
            next_task_number("99999999999999999999999999. x"),
            "100000000000000000000000000"
        );
    }

    #[test]
    fn enter_after_task_line() {
        let (_tmp_dir, mut notes) = notes_with("1. task one");
        assert_eq!(notes.on_enter(), EnterOutcome::Handled);
        assert_eq!(notes.buffer().to_string(), "1. task one\n2. ");
        assert_eq!(notes.buffer().cursor().position, notes.buffer().len_bytes());
    }

    #[test]
    fn enter_after_two_task_lines() {
        let (_tmp_dir, mut notes) = notes_with("1. a\n2. b");
        notes.on_enter();
        assert_eq!(notes.buffer().to_string(), "1. a\n2. b\n3. ");
    }

    #[test]
    fn enter_follows_last_number_not_count() {
        let (_tmp_dir, mut notes) = notes_with("5. x");
        assert_eq!(notes.next_task_number(), "6");
        notes.on_enter();
        assert_eq!(notes.buffer().to_string(), "5. x\n6. ");
    }

    #[test]
    fn enter_on_plain_text_line_starts_numbering() {
        let (_tmp_dir, mut notes) = notes_with("shopping");
        notes.on_enter();
        assert_eq!(notes.buffer().to_string(), "shopping\n1. ");
    }

    #[test]
    fn enter_on_blank_line_is_left_to_default() {
        let (_tmp_dir, mut notes) = notes_with("1. a\n   ");
        assert_eq!(notes.on_enter(), EnterOutcome::Default);
        assert_eq!(notes.buffer().to_string(), "1. a\n   ");
    }

    #[test]
    fn enter_inserts_at_caret_in_middle_of_line() {
        let (_tmp_dir, mut notes) = notes_with("1. milk eggs");
        notes.buffer_mut().set_cursor_pos(7, 0);
        notes.on_enter();
        assert_eq!(notes.buffer().to_string(), "1. milk\n2.  eggs");
    }

    #[test]
    fn numbering_continues_while_typing() {
        let (_tmp_dir, mut notes) = notes_with("");
        for text in ["a", "b", "c"] {
            notes.buffer_mut().handle_input(Cmd::Insert { text: text.into() });
            notes.on_enter();
        }
        assert_eq!(notes.buffer().to_string(), "1. a\n2. b\n3. c\n4. ");
    }

    #[test]
    fn save_then_load_round_trips() {
        let (tmp_dir, mut notes) = notes_with("");
        notes.buffer_mut().set_text("1. a\r\n2. b\n\n  free text\t\n3. ");
        notes.save().unwrap();
        assert!(!notes.buffer().is_dirty());

        let reloaded = Notes::load(tmp_dir.path().join(NOTES_FILE_NAME)).unwrap();
        assert_eq!(reloaded.buffer().to_string(), notes.buffer().to_string());
        assert_eq!(
            fs::read(notes.path()).unwrap(),
            notes.buffer().to_string().as_bytes()
        );
    }

    #[test]
    fn typing_outside_legacy_code_page_survives_save() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let path = tmp_dir.path().join(NOTES_FILE_NAME);
        let (bytes, _, _) =
            encoding_rs::WINDOWS_1252.encode("1. köp smör och ost åt kräftskivan");
        fs::write(&path, &bytes).unwrap();

        let mut notes = Notes::load(&path).unwrap();
        assert_ne!(notes.buffer().encoding, encoding_rs::UTF_8);
        notes.on_enter();
        notes.buffer_mut().insert_text("kaffe ☕");
        notes.save().unwrap();
        assert_eq!(notes.buffer().encoding, encoding_rs::UTF_8);

        let reloaded = Notes::load(&path).unwrap();
        assert_eq!(reloaded.buffer().to_string(), notes.buffer().to_string());
        assert!(reloaded.buffer().to_string().ends_with("\n2. kaffe ☕"));
    }

    #[test]
    fn save_failure_keeps_buffer() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let path = tmp_dir.path().join("missing").join(NOTES_FILE_NAME);
        let mut notes = Notes::load(&path).unwrap();
        notes.buffer_mut().insert_text("keep me");

        assert!(notes.save().is_err());
        assert_eq!(notes.buffer().to_string(), "1. keep me");
        assert!(notes.buffer().is_dirty());
    }

    #[test]
    fn clear_resets_and_removes_file() {
        let (_tmp_dir, mut notes) = notes_with("1. a\n2. b");
        notes.clear().unwrap();
        assert_eq!(notes.buffer().to_string(), "1. ");
        assert!(!notes.path().exists());
    }

    #[test]
    fn clear_tolerates_missing_file() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let mut notes = Notes::load(tmp_dir.path().join(NOTES_FILE_NAME)).unwrap();
        notes.buffer_mut().insert_text("x");
        notes.clear().unwrap();
        assert_eq!(notes.buffer().to_string(), "1. ");
    }

    #[test]
    fn close_saves() {
        let (_tmp_dir, mut notes) = notes_with("1. a");
        notes.on_enter();
        notes.on_close();
        assert_eq!(fs::read_to_string(notes.path()).unwrap(), "1. a\n2. ");
    }

    #[test]
    fn close_with_failing_save_does_not_panic() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let mut notes = Notes::load(tmp_dir.path().join("missing").join("notes.txt")).unwrap();
        notes.on_close();
    }
}
