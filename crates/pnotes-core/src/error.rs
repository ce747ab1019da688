use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum NotesError {
    NoHomeDir,
    Io(io::Error),
}

impl fmt::Display for NotesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHomeDir => write!(f, "Unable to find home directory"),
            Self::Io(err) => err.fmt(f),
        }
    }
}

impl Error for NotesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::NoHomeDir => None,
        }
    }
}

impl From<io::Error> for NotesError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
