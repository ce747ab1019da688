//! The line at the bottom of the screen used for messages, errors and
//! yes/no prompts.
use std::fmt;

use crate::{
    cmd::Cmd,
    event_loop_proxy::{EventLoopProxy, UserEvent},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Nop,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedPrompt {
    Alt1,
    Alt2,
    Neither,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusState {
    Prompt {
        selected: SelectedPrompt,
        prompt: String,
        alt1_char: char,
        alt1_event: PromptEvent,
        alt2_char: char,
        alt2_event: PromptEvent,
    },
    Message(String),
    Error(String),
    Nothing,
}

pub struct StatusLine {
    proxy: Box<dyn EventLoopProxy>,
    state: StatusState,
}

impl StatusLine {
    pub fn new(proxy: Box<dyn EventLoopProxy>) -> Self {
        Self {
            proxy,
            state: StatusState::Nothing,
        }
    }

    pub fn set_msg(&mut self, msg: impl fmt::Display) {
        self.state = StatusState::Message(msg.to_string());
    }

    pub fn set_error(&mut self, msg: impl fmt::Display) {
        let msg = msg.to_string();
        tracing::error!("{}", msg);
        match &mut self.state {
            StatusState::Error(error) => {
                error.push('\n');
                error.push_str(&msg);
            }
            state => *state = StatusState::Error(msg),
        }
    }

    pub fn reset(&mut self) {
        self.state = StatusState::Nothing;
    }

    /// Shows a prompt that is answered by typing one of the two characters
    /// followed by enter. The chosen event is sent through the event loop.
    pub fn set_prompt(
        &mut self,
        prompt: impl Into<String>,
        (alt1_char, alt1_event): (char, PromptEvent),
        (alt2_char, alt2_event): (char, PromptEvent),
    ) {
        debug_assert!(
            alt1_char.is_ascii_alphabetic()
                && alt2_char.is_ascii_alphabetic()
                && alt1_char != alt2_char
        );
        self.state = StatusState::Prompt {
            selected: SelectedPrompt::Neither,
            prompt: prompt.into(),
            alt1_char: alt1_char.to_ascii_lowercase(),
            alt1_event,
            alt2_char: alt2_char.to_ascii_lowercase(),
            alt2_event,
        };
    }

    pub fn has_focus(&self) -> bool {
        matches!(self.state, StatusState::Prompt { .. })
    }

    pub fn state(&self) -> &StatusState {
        &self.state
    }

    pub fn height(&self) -> usize {
        match &self.state {
            StatusState::Message(string) => string.lines().count(),
            StatusState::Error(string) => string.lines().count(),
            _ => 1,
        }
        .max(1)
    }

    pub fn handle_input(&mut self, input: Cmd) {
        let StatusState::Prompt {
            selected,
            alt1_char,
            alt1_event,
            alt2_char,
            alt2_event,
            ..
        } = &mut self.state
        else {
            return;
        };

        let mut chars = Vec::new();
        match input {
            Cmd::Char { ch } => chars.push(ch),
            Cmd::Insert { text } => chars.extend(text.chars()),
            Cmd::Enter => chars.push('\n'),
            Cmd::Escape => {
                self.reset();
                return;
            }
            _ => (),
        }

        for ch in chars {
            let ch = ch.to_ascii_lowercase();
            if ch == *alt1_char {
                *selected = SelectedPrompt::Alt1;
            }

            if ch == *alt2_char {
                *selected = SelectedPrompt::Alt2;
            }

            if ch == '\n' || ch == '\r' {
                let event = match selected {
                    SelectedPrompt::Alt1 => alt1_event.clone(),
                    SelectedPrompt::Alt2 => alt2_event.clone(),
                    SelectedPrompt::Neither => continue,
                };
                self.proxy.send(UserEvent::PromptEvent(event));
                self.reset();
                break;
            }
        }
    }

    pub fn get_prompt(
        selected: SelectedPrompt,
        prompt: &str,
        alt1_char: char,
        alt2_char: char,
    ) -> String {
        let alt1 = if selected == SelectedPrompt::Alt1 {
            alt1_char.to_ascii_uppercase()
        } else {
            alt1_char
        };

        let alt2 = if selected == SelectedPrompt::Alt2 {
            alt2_char.to_ascii_uppercase()
        } else {
            alt2_char
        };

        format!("{prompt}: {alt1} / {alt2}")
    }
}
