use std::sync::mpsc;

use anyhow::Result;

use crate::{
    cmd::Cmd,
    config::Config,
    event_loop_proxy::{EventLoopControlFlow, EventLoopProxy, UserEvent},
    keymap::{self, Keymapping},
    logger::{LogMessage, LoggerState},
    menu::{Menu, MenuAction},
    notes::{self, EnterOutcome, Notes},
    status_line::{PromptEvent, StatusLine},
};

pub struct Engine {
    pub notes: Notes,
    pub config: Config,
    pub status_line: StatusLine,
    pub menu: Menu,
    pub logger_state: LoggerState,
    pub show_logger: bool,
    pub key_mappings: Vec<Keymapping>,
    pub proxy: Box<dyn EventLoopProxy>,
}

impl Engine {
    pub fn new(proxy: Box<dyn EventLoopProxy>, recv: mpsc::Receiver<LogMessage>) -> Result<Self> {
        let config = match Config::load_from_default_location() {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("Error loading config: {err}");
                Config::default()
            }
        };

        let notes = Notes::load(notes::default_notes_path()?)?;

        Ok(Self::with_notes(notes, config, proxy, recv))
    }

    pub fn with_notes(
        notes: Notes,
        config: Config,
        proxy: Box<dyn EventLoopProxy>,
        recv: mpsc::Receiver<LogMessage>,
    ) -> Self {
        Self {
            notes,
            config,
            status_line: StatusLine::new(proxy.dup()),
            menu: Menu::default(),
            logger_state: LoggerState::new(recv),
            show_logger: false,
            key_mappings: keymap::get_default_mappings(),
            proxy,
        }
    }

    pub fn get_current_keymappings(&self) -> &[Keymapping] {
        &self.key_mappings
    }

    pub fn do_polling(&mut self, control_flow: &mut EventLoopControlFlow) {
        self.logger_state.update();
        if *control_flow != EventLoopControlFlow::Exit {
            *control_flow = EventLoopControlFlow::Wait;
        }
    }

    pub fn handle_input_command(&mut self, input: Cmd, control_flow: &mut EventLoopControlFlow) {
        match input {
            Cmd::Quit => return self.close(control_flow),
            Cmd::Save => {
                self.menu.close();
                return self.save();
            }
            Cmd::ToggleLogger => {
                self.show_logger = !self.show_logger;
                return;
            }
            Cmd::ToggleMenu => {
                if !self.status_line.has_focus() {
                    self.menu.toggle();
                }
                return;
            }
            _ => (),
        }

        if self.status_line.has_focus() {
            self.status_line.handle_input(input);
            return;
        }

        if self.menu.is_open() {
            match self.menu.handle_input(input) {
                Some(MenuAction::Save) => self.save(),
                Some(MenuAction::Clear) => self.request_clear(),
                None => (),
            }
            return;
        }

        if self.show_logger && matches!(input, Cmd::VerticalScroll(_) | Cmd::Escape) {
            if input == Cmd::Escape && self.logger_state.lines_scrolled_up == 0 {
                self.show_logger = false;
            }
            self.logger_state.handle_input(input);
            return;
        }

        if input.is_edit() {
            self.status_line.reset();
        }

        match input {
            Cmd::Enter => {
                if self.notes.on_enter() == EnterOutcome::Default {
                    self.notes.buffer_mut().insert_text("\n");
                }
            }
            Cmd::Clear => self.request_clear(),
            Cmd::Escape => self.status_line.reset(),
            input => self.notes.buffer_mut().handle_input(input),
        }
    }

    pub fn handle_app_event(&mut self, event: UserEvent, control_flow: &mut EventLoopControlFlow) {
        match event {
            UserEvent::PromptEvent(event) => match event {
                PromptEvent::Nop => (),
                PromptEvent::Clear => self.clear(),
            },
            UserEvent::Close => {
                tracing::info!("Close requested, saving notes");
                self.close(control_flow);
            }
        }

        if *control_flow != EventLoopControlFlow::Exit {
            self.proxy.request_render();
        }
    }

    pub fn save(&mut self) {
        match self.notes.save() {
            Ok(_) => self.status_line.set_msg(&self.config.save_message),
            Err(err) => self
                .status_line
                .set_error(format!("Could not save notes: {err}")),
        }
    }

    pub fn request_clear(&mut self) {
        self.status_line.set_prompt(
            "Are you sure you want to clear all notes?",
            ('y', PromptEvent::Clear),
            ('n', PromptEvent::Nop),
        );
    }

    fn clear(&mut self) {
        match self.notes.clear() {
            Ok(()) => self.status_line.set_msg("Notes cleared"),
            Err(err) => self
                .status_line
                .set_error(format!("Could not delete notes file: {err}")),
        }
    }

    pub fn close(&mut self, control_flow: &mut EventLoopControlFlow) {
        self.notes.on_close();
        *control_flow = EventLoopControlFlow::Exit;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::{Mutex, mpsc},
    };

    use tempdir::TempDir;

    use super::*;
    use crate::{notes::NOTES_FILE_NAME, status_line::StatusState};

    struct ChannelProxy(Mutex<mpsc::Sender<UserEvent>>);

    impl EventLoopProxy for ChannelProxy {
        fn send(&self, event: UserEvent) {
            let _ = self.0.lock().unwrap().send(event);
        }
        fn request_render(&self) {}
        fn dup(&self) -> Box<dyn EventLoopProxy> {
            Box::new(ChannelProxy(Mutex::new(self.0.lock().unwrap().clone())))
        }
    }

    struct Harness {
        tmp_dir: TempDir,
        engine: Engine,
        events: mpsc::Receiver<UserEvent>,
        control_flow: EventLoopControlFlow,
    }

    impl Harness {
        fn new(text: Option<&str>) -> Self {
            let tmp_dir = TempDir::new("pnotes").unwrap();
            let path = tmp_dir.path().join(NOTES_FILE_NAME);
            if let Some(text) = text {
                fs::write(&path, text).unwrap();
            }
            let (tx, events) = mpsc::channel();
            let (_log_tx, log_rx) = mpsc::channel();
            let engine = Engine::with_notes(
                Notes::load(&path).unwrap(),
                Config::default(),
                Box::new(ChannelProxy(Mutex::new(tx))),
                log_rx,
            );
            Self {
                tmp_dir,
                engine,
                events,
                control_flow: EventLoopControlFlow::Wait,
            }
        }

        fn input(&mut self, cmd: Cmd) {
            self.engine.handle_input_command(cmd, &mut self.control_flow);
        }

        fn type_str(&mut self, text: &str) {
            for ch in text.chars() {
                self.input(Cmd::Char { ch });
            }
        }

        fn pump(&mut self) {
            while let Ok(event) = self.events.try_recv() {
                self.engine.handle_app_event(event, &mut self.control_flow);
            }
        }

        fn text(&self) -> String {
            self.engine.notes.buffer().to_string()
        }
    }

    #[test]
    fn enter_numbers_tasks() {
        let mut h = Harness::new(None);
        h.type_str("milk");
        h.input(Cmd::Enter);
        h.type_str("eggs");
        h.input(Cmd::Enter);
        assert_eq!(h.text(), "1. milk\n2. eggs\n3. ");
    }

    #[test]
    fn enter_on_blank_line_inserts_plain_newline() {
        let mut h = Harness::new(Some("1. a\n"));
        h.input(Cmd::Enter);
        assert_eq!(h.text(), "1. a\n\n");
    }

    #[test]
    fn save_shows_confirmation() {
        let mut h = Harness::new(None);
        h.type_str("x");
        h.input(Cmd::Save);
        assert_eq!(
            *h.engine.status_line.state(),
            StatusState::Message("Notes saved successfully!".into())
        );
        assert!(!h.engine.notes.buffer().is_dirty());
        assert_eq!(fs::read_to_string(h.engine.notes.path()).unwrap(), "1. x");

        h.type_str("y");
        assert_eq!(*h.engine.status_line.state(), StatusState::Nothing);
    }

    #[test]
    fn failed_save_is_reported() {
        let mut h = Harness::new(None);
        let missing = h.tmp_dir.path().join("missing").join(NOTES_FILE_NAME);
        h.engine.notes = Notes::load(&missing).unwrap();
        h.input(Cmd::Save);
        assert!(matches!(
            h.engine.status_line.state(),
            StatusState::Error(msg) if msg.starts_with("Could not save notes")
        ));
        assert_eq!(h.control_flow, EventLoopControlFlow::Wait);
    }

    #[test]
    fn clear_requires_confirmation() {
        let mut h = Harness::new(Some("1. a\n2. b"));
        h.input(Cmd::Clear);
        assert!(h.engine.status_line.has_focus());
        h.type_str("n");
        h.input(Cmd::Enter);
        h.pump();
        assert_eq!(h.text(), "1. a\n2. b");

        h.input(Cmd::Clear);
        h.type_str("y");
        h.input(Cmd::Enter);
        h.pump();
        assert_eq!(h.text(), "1. ");
        assert!(!h.engine.notes.path().exists());
    }

    #[test]
    fn menu_clear_goes_through_prompt() {
        let mut h = Harness::new(Some("1. a"));
        h.input(Cmd::ToggleMenu);
        assert!(h.engine.menu.is_open());
        h.input(Cmd::MoveDown { distance: 1 });
        h.input(Cmd::Enter);
        assert!(!h.engine.menu.is_open());
        assert!(h.engine.status_line.has_focus());
        assert_eq!(h.text(), "1. a");
    }

    #[test]
    fn menu_save() {
        let mut h = Harness::new(None);
        h.input(Cmd::ToggleMenu);
        h.input(Cmd::Enter);
        assert!(h.engine.notes.path().exists());
    }

    #[test]
    fn quit_saves_and_exits() {
        let mut h = Harness::new(None);
        h.type_str("bread");
        h.input(Cmd::Quit);
        assert_eq!(h.control_flow, EventLoopControlFlow::Exit);
        assert_eq!(
            fs::read_to_string(h.engine.notes.path()).unwrap(),
            "1. bread"
        );
    }

    #[test]
    fn close_event_saves_and_exits() {
        let mut h = Harness::new(Some("1. a"));
        h.input(Cmd::Enter);
        h.type_str("b");
        h.engine
            .handle_app_event(UserEvent::Close, &mut h.control_flow);
        assert_eq!(h.control_flow, EventLoopControlFlow::Exit);
        assert_eq!(
            fs::read_to_string(h.engine.notes.path()).unwrap(),
            "1. a\n2. b"
        );
        assert!(!h.engine.notes.buffer().is_dirty());
    }

    #[test]
    fn close_event_from_proxy_is_handled() {
        let mut h = Harness::new(None);
        h.type_str("x");
        h.engine.proxy.send(UserEvent::Close);
        h.pump();
        assert_eq!(h.control_flow, EventLoopControlFlow::Exit);
        assert!(h.engine.notes.path().exists());
    }

    #[test]
    fn escape_hides_logger() {
        let mut h = Harness::new(None);
        h.input(Cmd::ToggleLogger);
        assert!(h.engine.show_logger);
        h.input(Cmd::Escape);
        assert!(!h.engine.show_logger);
    }
}
