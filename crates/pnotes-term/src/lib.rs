use std::{
    io::{self, IsTerminal, Stdout},
    sync::mpsc,
};

use anyhow::{Result, bail};
use crossterm::{
    event::{self, Event, KeyEventKind, MouseEventKind},
    execute, terminal,
};
use event_loop::{TuiEvent, TuiEventLoop};
use glue::{convert_keycode, convert_modifier};
use pnotes_core::{cmd::Cmd, event_loop_proxy::EventLoopControlFlow, keymap, logger::LogMessage};
use pnotes_tui::TuiApp;

mod event_loop;
mod glue;

const SCROLL_LINES: i64 = 3;

pub fn run(recv: mpsc::Receiver<LogMessage>) -> Result<()> {
    if !io::stdout().is_terminal() {
        bail!("stdout is not a tty");
    }

    let event_loop = TuiEventLoop::new();
    let backend = tui::backend::CrosstermBackend::new(io::stdout());
    let tui_app = TuiApp::new(event_loop.create_proxy(), backend, recv)?;

    let term_app = TermApp { tui_app };
    term_app.run(event_loop)
}

pub struct TermApp {
    tui_app: TuiApp<tui::backend::CrosstermBackend<Stdout>>,
}

impl TermApp {
    pub fn run(mut self, event_loop: TuiEventLoop) -> Result<()> {
        tracing::info!("Starting tui app");
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            event::EnableBracketedPaste,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::Purge),
            event::EnableMouseCapture,
        )?;

        // Reset terminal to non raw mode on panic
        std::panic::set_hook(Box::new(move |info| {
            let _ = execute!(
                io::stdout(),
                event::DisableMouseCapture,
                event::DisableBracketedPaste,
                terminal::LeaveAlternateScreen,
            );
            let _ = terminal::disable_raw_mode();
            println!();
            let backtrace = std::backtrace::Backtrace::force_capture();
            println!("{backtrace}\n{info}");
        }));

        event_loop.run(|event, control_flow| self.handle_event(event, control_flow));
        tracing::info!("Exiting tui app");
        Ok(())
    }

    pub fn handle_event(&mut self, event: TuiEvent, control_flow: &mut EventLoopControlFlow) {
        match event {
            TuiEvent::Crossterm(event) => self.handle_crossterm_event(event, control_flow),
            TuiEvent::AppEvent(event) => self.tui_app.engine.handle_app_event(event, control_flow),
            TuiEvent::Render => {
                self.tui_app.engine.do_polling(control_flow);
                if let Err(err) = self.tui_app.render() {
                    tracing::error!("Error rendering: {err}");
                }
            }
        }
    }

    pub fn handle_crossterm_event(
        &mut self,
        event: event::Event,
        control_flow: &mut EventLoopControlFlow,
    ) {
        let input = match event {
            Event::Key(event) => {
                if event.kind == KeyEventKind::Press || event.kind == KeyEventKind::Repeat {
                    tracing::trace!("{:?}", event);
                    keymap::get_command_from_input(
                        convert_keycode(event.code),
                        convert_modifier(event.modifiers),
                        self.tui_app.engine.get_current_keymappings(),
                    )
                } else {
                    None
                }
            }
            Event::Mouse(event) => match event.kind {
                MouseEventKind::ScrollUp => Some(Cmd::VerticalScroll(-SCROLL_LINES)),
                MouseEventKind::ScrollDown => Some(Cmd::VerticalScroll(SCROLL_LINES)),
                _ => None,
            },
            Event::Paste(text) => Some(Cmd::Insert {
                text: text.replace("\r\n", "\n").replace('\r', "\n"),
            }),
            _ => None,
        };

        if let Some(input) = input {
            self.tui_app.engine.handle_input_command(input, control_flow);
        }
    }
}

impl Drop for TermApp {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            self.tui_app.terminal.backend_mut(),
            event::DisableMouseCapture,
            event::DisableBracketedPaste,
            terminal::LeaveAlternateScreen,
        );
        let _ = self.tui_app.terminal.show_cursor();
    }
}
