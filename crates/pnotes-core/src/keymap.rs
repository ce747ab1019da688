pub mod keycode;
use std::fmt;

use keycode::{KeyCode, KeyModifiers};

use crate::cmd::Cmd;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub keycode: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub const fn new(keycode: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { keycode, modifiers }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifiers, self.keycode)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Exclusiveness {
    #[default]
    Exclusive,
    NonExclusive,
    Ignores(KeyModifiers),
}

#[derive(Debug, Clone)]
pub struct Keymapping {
    pub key: Key,
    pub cmd: Cmd,
    pub exclusiveness: Exclusiveness,
}

impl Keymapping {
    pub fn new(key: Key, cmd: Cmd, exclusiveness: Exclusiveness) -> Self {
        Self {
            key,
            cmd,
            exclusiveness,
        }
    }
}

pub fn get_command_from_input(
    keycode: KeyCode,
    modifiers: KeyModifiers,
    mappings: &[Keymapping],
) -> Option<Cmd> {
    let normalized_keycode = match keycode {
        KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
        keycode => keycode,
    };
    for Keymapping {
        key,
        cmd,
        exclusiveness,
    } in mappings
    {
        let matches = match exclusiveness {
            Exclusiveness::Exclusive => {
                *key == Key::new(normalized_keycode, modifiers)
            }
            Exclusiveness::NonExclusive => {
                key.keycode == normalized_keycode && modifiers.contains(key.modifiers)
            }
            Exclusiveness::Ignores(ignored) => {
                let mut non_ignored = modifiers;
                non_ignored.remove(*ignored);
                key.keycode == normalized_keycode && non_ignored == key.modifiers
            }
        };
        if matches {
            return Some(cmd.clone());
        }
    }

    if let KeyCode::Char(ch) = keycode {
        if modifiers == KeyModifiers::empty() || modifiers == KeyModifiers::SHIFT {
            return Some(Cmd::Char { ch });
        }
    }

    None
}

/// First key bound to `cmd`, used to show accelerators in the menu.
pub fn find_key_for_cmd<'a>(cmd: &Cmd, mappings: &'a [Keymapping]) -> Option<&'a Key> {
    mappings
        .iter()
        .find(|mapping| mapping.cmd == *cmd)
        .map(|mapping| &mapping.key)
}

pub fn get_default_mappings() -> Vec<Keymapping> {
    use Exclusiveness::*;
    let shift = KeyModifiers::SHIFT;
    let none = KeyModifiers::empty();
    let ctrl = KeyModifiers::CONTROL;
    vec![
        Keymapping::new(Key::new(KeyCode::Char('s'), ctrl), Cmd::Save, Exclusive),
        Keymapping::new(Key::new(KeyCode::Char('q'), ctrl), Cmd::Quit, Exclusive),
        Keymapping::new(Key::new(KeyCode::Char('l'), ctrl), Cmd::ToggleLogger, Exclusive),
        Keymapping::new(Key::new(KeyCode::F(10), none), Cmd::ToggleMenu, Exclusive),
        Keymapping::new(
            Key::new(KeyCode::Char('f'), KeyModifiers::ALT),
            Cmd::ToggleMenu,
            Exclusive,
        ),
        Keymapping::new(Key::new(KeyCode::Esc, none), Cmd::Escape, Exclusive),
        Keymapping::new(Key::new(KeyCode::Enter, none), Cmd::Enter, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::Backspace, none), Cmd::Backspace, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::Delete, none), Cmd::Delete, Ignores(shift)),
        Keymapping::new(
            Key::new(KeyCode::Tab, none),
            Cmd::Insert { text: "\t".into() },
            Exclusive,
        ),
        Keymapping::new(Key::new(KeyCode::Left, none), Cmd::MoveLeft, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::Right, none), Cmd::MoveRight, Ignores(shift)),
        Keymapping::new(
            Key::new(KeyCode::Up, none),
            Cmd::MoveUp { distance: 1 },
            Ignores(shift),
        ),
        Keymapping::new(
            Key::new(KeyCode::Down, none),
            Cmd::MoveDown { distance: 1 },
            Ignores(shift),
        ),
        Keymapping::new(Key::new(KeyCode::PageUp, none), Cmd::PageUp, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::PageDown, none), Cmd::PageDown, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::Home, ctrl), Cmd::Start, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::End, ctrl), Cmd::Eof, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::Home, none), Cmd::Home, Ignores(shift)),
        Keymapping::new(Key::new(KeyCode::End, none), Cmd::End, Ignores(shift)),
    ]
}
