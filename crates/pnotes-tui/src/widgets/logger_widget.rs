use pnotes_core::logger::LoggerState;
use tui::widgets::{Clear, StatefulWidget, Widget};

use crate::theme::NotesTheme;

pub struct LoggerWidget<'a> {
    theme: &'a NotesTheme,
}

impl<'a> LoggerWidget<'a> {
    pub fn new(theme: &'a NotesTheme) -> Self {
        Self { theme }
    }
}

impl StatefulWidget for LoggerWidget<'_> {
    type State = LoggerState;

    fn render(
        self,
        area: tui::layout::Rect,
        buf: &mut tui::buffer::Buffer,
        state: &mut Self::State,
    ) {
        if area.area() == 0 {
            return;
        }

        Clear.render(area, buf);
        buf.set_style(area, self.theme.background);

        // newest message sits right above the title line
        let rows = area.height.saturating_sub(1);
        for y in 0..rows {
            match state.messages.get(y as usize + state.lines_scrolled_up) {
                Some(msg) => {
                    let string = format!("{:>5} {} {}", msg.level, msg.target, msg.fields.message);
                    buf.set_stringn(
                        area.x,
                        area.y + rows - y - 1,
                        string,
                        area.width.into(),
                        self.theme.text,
                    );
                }
                None => break,
            }
        }

        let line_area = tui::layout::Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        buf.set_style(line_area, self.theme.info_line);
        buf.set_stringn(
            line_area.x,
            line_area.y,
            format!(" Log ({} messages)", state.messages.len()),
            line_area.width.into(),
            self.theme.info_line,
        );
    }
}
