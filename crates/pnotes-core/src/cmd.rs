#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Char { ch: char },
    Insert { text: String },
    Enter,
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveUp { distance: usize },
    MoveDown { distance: usize },
    PageUp,
    PageDown,
    Home,
    End,
    Start,
    Eof,
    VerticalScroll(i64),
    Escape,
    Save,
    Clear,
    Quit,
    ToggleMenu,
    ToggleLogger,
}

impl Cmd {
    /// Commands that change the text of the buffer.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::Char { .. } | Self::Insert { .. } | Self::Enter | Self::Backspace | Self::Delete
        )
    }
}
