use pnotes_core::status_line::{StatusLine, StatusState};
use tui::widgets::StatefulWidget;

use crate::theme::NotesTheme;

pub struct StatusLineWidget<'a> {
    theme: &'a NotesTheme,
}

impl<'a> StatusLineWidget<'a> {
    pub fn new(theme: &'a NotesTheme) -> Self {
        Self { theme }
    }
}

impl StatefulWidget for StatusLineWidget<'_> {
    type State = StatusLine;

    fn render(
        self,
        area: tui::layout::Rect,
        buf: &mut tui::buffer::Buffer,
        state: &mut Self::State,
    ) {
        buf.set_style(area, self.theme.background);

        let (msg, style) = match state.state() {
            StatusState::Nothing => return,
            StatusState::Message(msg) => (msg.clone(), self.theme.text),
            StatusState::Error(msg) => (msg.clone(), self.theme.error_text),
            StatusState::Prompt {
                selected,
                prompt,
                alt1_char,
                alt2_char,
                ..
            } => (
                StatusLine::get_prompt(*selected, prompt, *alt1_char, *alt2_char),
                self.theme.text,
            ),
        };

        for (i, line) in msg.lines().enumerate() {
            if i >= area.height.into() {
                break;
            }
            buf.set_stringn(
                area.x + 1,
                area.y + i as u16,
                line,
                (area.width as usize).saturating_sub(1),
                style,
            );
        }
    }
}
