use crossterm::event;
use pnotes_core::keymap::keycode::{KeyCode, KeyModifiers};

pub fn convert_keycode(keycode: event::KeyCode) -> KeyCode {
    match keycode {
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Char(ch) => KeyCode::Char(ch),
        event::KeyCode::Esc => KeyCode::Esc,
        _ => KeyCode::Null,
    }
}

pub fn convert_modifier(modifier: event::KeyModifiers) -> KeyModifiers {
    let pairs = [
        (event::KeyModifiers::SHIFT, KeyModifiers::SHIFT),
        (event::KeyModifiers::CONTROL, KeyModifiers::CONTROL),
        (event::KeyModifiers::ALT, KeyModifiers::ALT),
        (event::KeyModifiers::SUPER, KeyModifiers::SUPER),
        (event::KeyModifiers::HYPER, KeyModifiers::HYPER),
        (event::KeyModifiers::META, KeyModifiers::META),
    ];

    let mut output = KeyModifiers::empty();
    for (from, to) in pairs {
        if modifier.contains(from) {
            output |= to;
        }
    }
    output
}
