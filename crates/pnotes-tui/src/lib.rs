use std::sync::mpsc;

use anyhow::Result;
use pnotes_core::{
    engine::Engine,
    event_loop_proxy::EventLoopProxy,
    logger::{self, LogMessage},
};
use theme::NotesTheme;
use tui::{
    Terminal,
    backend::Backend,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
};
use widgets::{
    editor_widget::EditorWidget,
    info_line::InfoLine,
    logger_widget::LoggerWidget,
    menu_bar::{MenuBar, MenuDropdown},
    status_line_widget::StatusLineWidget,
};

pub mod glue;
pub mod theme;
pub mod widgets;

pub struct TuiApp<B: Backend> {
    pub engine: Engine,
    pub terminal: Terminal<B>,
    pub theme: NotesTheme,
}

impl<B: Backend> TuiApp<B> {
    pub fn new<P: EventLoopProxy + 'static>(
        proxy: P,
        backend: B,
        recv: mpsc::Receiver<LogMessage>,
    ) -> Result<Self> {
        let engine = Engine::new(Box::new(proxy), recv)?;
        Self::with_engine(engine, backend)
    }

    pub fn with_engine(engine: Engine, backend: B) -> Result<Self> {
        logger::set_proxy(engine.proxy.dup());
        let theme = NotesTheme::from_config(&engine.config);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            engine,
            terminal,
            theme,
        })
    }

    pub fn render(&mut self) -> Result<()> {
        let Self {
            engine,
            terminal,
            theme,
        } = self;
        terminal.draw(|frame| {
            let area = frame.area();
            draw(engine, theme, frame.buffer_mut(), area);
        })?;
        Ok(())
    }
}

/// Lays out the window: menu bar, text area, optional log pane, info line
/// and status line from top to bottom.
pub fn draw(engine: &mut Engine, theme: &NotesTheme, buf: &mut tui::buffer::Buffer, size: Rect) {
    if size.area() == 0 {
        return;
    }

    buf.set_style(size, theme.background);

    let menu_area = Rect::new(size.x, size.y, size.width, 1);
    MenuBar::new(theme, &engine.menu).render(menu_area, buf);

    let status_height = (engine.status_line.height() as u16).min(size.height.saturating_sub(1));
    let status_area = Rect::new(
        size.x,
        size.bottom().saturating_sub(status_height),
        size.width,
        status_height,
    );
    StatusLineWidget::new(theme).render(status_area, buf, &mut engine.status_line);

    let mut editor_area = Rect::new(
        size.x,
        size.y + 1,
        size.width,
        size.height.saturating_sub(1 + status_height),
    );

    if engine.config.show_info_line && editor_area.height > 0 {
        editor_area.height -= 1;
        let info_area = Rect::new(size.x, editor_area.bottom(), size.width, 1);
        let buffer = engine.notes.buffer();
        InfoLine {
            theme,
            encoding: buffer.encoding,
            file: engine.notes.path(),
            column: buffer.cursor_grapheme_column() + 1,
            line: buffer.cursor_line_idx() + 1,
            dirty: buffer.is_dirty(),
            size: buffer.len_bytes(),
        }
        .render(info_area, buf);
    }

    if engine.show_logger {
        let logger_height = editor_area.height / 2;
        editor_area.height -= logger_height;
        let logger_area = Rect::new(size.x, editor_area.bottom(), size.width, logger_height);
        LoggerWidget::new(theme).render(logger_area, buf, &mut engine.logger_state);
    }

    let has_focus = !engine.menu.is_open() && !engine.status_line.has_focus();
    EditorWidget::new(theme, has_focus).render(editor_area, buf, engine.notes.buffer_mut());

    let dropdown_area = Rect::new(
        size.x,
        size.y + 1,
        size.width,
        size.height.saturating_sub(1),
    );
    MenuDropdown::new(theme, &engine.menu, engine.get_current_keymappings())
        .render(dropdown_area, buf);
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use pnotes_core::{
        cmd::Cmd,
        config::Config,
        event_loop_proxy::{EventLoopControlFlow, NoopEventLoop},
        notes::{NOTES_FILE_NAME, Notes},
    };
    use tempdir::TempDir;
    use tui::backend::TestBackend;

    use super::*;

    fn app(tmp_dir: &TempDir) -> TuiApp<TestBackend> {
        let (_tx, rx) = mpsc::channel();
        let notes = Notes::load(tmp_dir.path().join(NOTES_FILE_NAME)).unwrap();
        let engine = Engine::with_notes(notes, Config::default(), Box::new(NoopEventLoop), rx);
        TuiApp::with_engine(engine, TestBackend::new(100, 10)).unwrap()
    }

    fn row(app: &TuiApp<TestBackend>, y: u16) -> String {
        let buf = app.terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_window() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let mut app = app(&tmp_dir);
        let mut control_flow = EventLoopControlFlow::Wait;
        for ch in "milk".chars() {
            app.engine
                .handle_input_command(Cmd::Char { ch }, &mut control_flow);
        }
        app.render().unwrap();

        assert!(row(&app, 0).contains("Persistent Notes"));
        assert!(row(&app, 1).starts_with("1. milk"));
        let info = row(&app, 8);
        assert!(info.contains(NOTES_FILE_NAME));
        assert!(info.contains(" *"));
        assert!(info.contains("1:8"));
    }

    #[test]
    fn renders_menu_and_prompt() {
        let tmp_dir = TempDir::new("pnotes").unwrap();
        let mut app = app(&tmp_dir);
        let mut control_flow = EventLoopControlFlow::Wait;
        app.engine
            .handle_input_command(Cmd::ToggleMenu, &mut control_flow);
        app.render().unwrap();
        assert!(row(&app, 2).contains("Save"));
        assert!(row(&app, 2).contains("Ctrl+S"));
        assert!(row(&app, 3).contains("Clear"));

        app.engine.handle_input_command(Cmd::Char { ch: 'c' }, &mut control_flow);
        app.render().unwrap();
        assert!(row(&app, 9).contains("Are you sure you want to clear all notes?: y / n"));
    }
}
