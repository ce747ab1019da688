use std::{
    collections::VecDeque,
    io::Write,
    sync::{Mutex, mpsc},
};

use serde::Deserialize;

use crate::{cmd::Cmd, event_loop_proxy::EventLoopProxy};

const MAX_MESSAGES: usize = 5000;

static PROXY: Mutex<Option<Box<dyn EventLoopProxy>>> = Mutex::new(None);

pub fn set_proxy(proxy: Box<dyn EventLoopProxy>) {
    if let Ok(mut guard) = PROXY.lock() {
        *guard = Some(proxy);
    }
}

/// Receives the json formatted output of the tracing subscriber and
/// forwards every complete line to the log pane.
pub struct LoggerSink {
    bytes: Vec<u8>,
    sender: mpsc::Sender<LogMessage>,
}

impl LoggerSink {
    pub fn new(sender: mpsc::Sender<LogMessage>) -> Self {
        Self {
            bytes: Vec::new(),
            sender,
        }
    }
}

impl Write for LoggerSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.extend_from_slice(buf);

        let mut consumed = 0;
        while let Some(offset) = self.bytes[consumed..].iter().position(|b| *b == b'\n') {
            let line = &self.bytes[consumed..consumed + offset];
            if let Ok(msg) = serde_json::from_slice(line) {
                let _ = self.sender.send(msg);
            }
            consumed += offset + 1;
        }

        self.bytes.drain(..consumed);

        if consumed > 0 {
            if let Ok(guard) = PROXY.lock() {
                if let Some(proxy) = &*guard {
                    proxy.request_render();
                }
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LogMessage {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub fields: Fields,
}

#[derive(Debug, Deserialize)]
pub struct Fields {
    pub message: String,
}

#[derive(Debug)]
pub struct LoggerState {
    pub lines_scrolled_up: usize,
    pub messages: VecDeque<LogMessage>,
    recv: mpsc::Receiver<LogMessage>,
}

impl LoggerState {
    pub fn new(recv: mpsc::Receiver<LogMessage>) -> Self {
        Self {
            lines_scrolled_up: 0,
            messages: VecDeque::new(),
            recv,
        }
    }

    pub fn update(&mut self) {
        while let Ok(msg) = self.recv.try_recv() {
            self.messages.push_front(msg);
            if self.lines_scrolled_up != 0 {
                self.lines_scrolled_up += 1;
            }
        }

        self.messages.truncate(MAX_MESSAGES);
    }

    pub fn handle_input(&mut self, input: Cmd) {
        match input {
            Cmd::VerticalScroll(distance) => {
                self.lines_scrolled_up = if distance < 0 {
                    self.lines_scrolled_up
                        .saturating_add(distance.unsigned_abs() as usize)
                } else {
                    self.lines_scrolled_up.saturating_sub(distance as usize)
                };
                self.lines_scrolled_up = self.lines_scrolled_up.min(self.messages.len());
            }
            Cmd::MoveUp { distance } => {
                self.lines_scrolled_up =
                    (self.lines_scrolled_up + distance).min(self.messages.len());
            }
            Cmd::MoveDown { distance } => {
                self.lines_scrolled_up = self.lines_scrolled_up.saturating_sub(distance);
            }
            Cmd::Eof | Cmd::End | Cmd::Escape => self.lines_scrolled_up = 0,
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"{"timestamp":"2024-01-01T00:00:00Z","level":"INFO","target":"pnotes","fields":{"message":"hello"}}"#;

    #[test]
    fn sink_splits_lines() {
        let (tx, rx) = mpsc::channel();
        let mut sink = LoggerSink::new(tx);
        let (first, second) = LINE.split_at(20);
        sink.write_all(first.as_bytes()).unwrap();
        assert!(rx.try_recv().is_err());
        sink.write_all(second.as_bytes()).unwrap();
        sink.write_all(b"\n").unwrap();
        sink.write_all(format!("{LINE}\nnot json\n").as_bytes()).unwrap();

        let messages: Vec<_> = rx.try_iter().collect();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].fields.message, "hello");
        assert_eq!(messages[0].level, "INFO");
    }

    #[test]
    fn state_keeps_newest_first() {
        let (tx, rx) = mpsc::channel();
        let mut sink = LoggerSink::new(tx);
        let mut state = LoggerState::new(rx);
        sink.write_all(format!("{LINE}\n").as_bytes()).unwrap();
        sink.write_all(format!("{}\n", LINE.replace("hello", "world")).as_bytes())
            .unwrap();
        state.update();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].fields.message, "world");

        state.handle_input(Cmd::VerticalScroll(-1));
        assert_eq!(state.lines_scrolled_up, 1);
        state.handle_input(Cmd::VerticalScroll(-10));
        assert_eq!(state.lines_scrolled_up, 2);
        state.handle_input(Cmd::Escape);
        assert_eq!(state.lines_scrolled_up, 0);
    }
}
