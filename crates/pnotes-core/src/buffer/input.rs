use super::Buffer;
use crate::cmd::Cmd;

impl Buffer {
    /// Applies plain editing commands. `Enter` is not handled here since
    /// line breaks are owned by the note controller.
    pub fn handle_input(&mut self, input: Cmd) {
        use Cmd::*;
        match input {
            MoveRight => self.move_right_char(),
            MoveLeft => self.move_left_char(),
            MoveUp { distance } => self.move_up(distance),
            MoveDown { distance } => self.move_down(distance),
            PageUp => self.move_up(self.get_view_lines().max(1)),
            PageDown => self.move_down(self.get_view_lines().max(1)),
            Home => self.home(),
            End => self.end(),
            Start => self.start(),
            Eof => self.eof(),
            Insert { text } => self.insert_text(&text),
            Char { ch } => self.insert_text(ch.encode_utf8(&mut [0; 4])),
            Backspace => self.backspace(),
            Delete => self.delete(),
            VerticalScroll(distance) => self.vertical_scroll(distance),
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_characters() {
        let mut buffer = Buffer::with_text("1. ");
        for ch in "buy milk".chars() {
            buffer.handle_input(Cmd::Char { ch });
        }
        assert_eq!(buffer.to_string(), "1. buy milk");
    }

    #[test]
    fn enter_is_ignored_by_the_buffer() {
        let mut buffer = Buffer::with_text("1. a");
        buffer.handle_input(Cmd::Enter);
        assert_eq!(buffer.to_string(), "1. a");
    }

    #[test]
    fn paging_moves_by_view_height() {
        let text: String = (1..=20).map(|i| format!("{i}. task\n")).collect();
        let mut buffer = Buffer::with_text(&text);
        buffer.set_view_lines(5);
        buffer.handle_input(Cmd::Start);
        buffer.handle_input(Cmd::PageDown);
        assert_eq!(buffer.cursor_line_idx(), 5);
        buffer.handle_input(Cmd::PageUp);
        assert_eq!(buffer.cursor_line_idx(), 0);
    }
}
