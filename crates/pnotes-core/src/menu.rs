use crate::cmd::Cmd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Save,
    Clear,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [MenuAction::Save, MenuAction::Clear];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Save => "Save",
            MenuAction::Clear => "Clear",
        }
    }

    pub fn mnemonic(&self) -> char {
        match self {
            MenuAction::Save => 's',
            MenuAction::Clear => 'c',
        }
    }

    pub fn cmd(&self) -> Cmd {
        match self {
            MenuAction::Save => Cmd::Save,
            MenuAction::Clear => Cmd::Clear,
        }
    }
}

/// The "File" dropdown of the menu bar.
#[derive(Debug, Default)]
pub struct Menu {
    open: bool,
    selected: usize,
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> MenuAction {
        MenuAction::ALL[self.selected]
    }

    pub fn open(&mut self) {
        self.open = true;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Returns the chosen action once the user activates an entry.
    pub fn handle_input(&mut self, input: Cmd) -> Option<MenuAction> {
        if !self.open {
            return None;
        }

        let len = MenuAction::ALL.len();
        match input {
            Cmd::MoveUp { .. } => self.selected = (self.selected + len - 1) % len,
            Cmd::MoveDown { .. } => self.selected = (self.selected + 1) % len,
            Cmd::Home | Cmd::Start => self.selected = 0,
            Cmd::End | Cmd::Eof => self.selected = len - 1,
            Cmd::Escape => self.close(),
            Cmd::Enter => {
                self.close();
                return Some(self.selected());
            }
            Cmd::Char { ch } => {
                let ch = ch.to_ascii_lowercase();
                if let Some(action) = MenuAction::ALL.iter().find(|a| a.mnemonic() == ch) {
                    self.close();
                    return Some(*action);
                }
            }
            _ => (),
        }
        None
    }
}
