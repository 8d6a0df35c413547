// One error type for the whole tool.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    InvalidParameter(String), // A size/width/radius outside its allowed range
    Io { path: PathBuf, source: io::Error }, // Reading/writing a file failed
    Encode(String),           // Turning the canvas into PNG bytes failed
    NameExhausted(String),    // No free "<name> N.png" slot within the probe cap
    Metadata(String),         // The sprite import record could not be serialized
    Config(String),           // Settings file could not be parsed or serialized
    WindowInit(String),       // Creating the preview window failed
    WindowUpdate(String),     // Updating the preview window buffer failed
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(s) => write!(f, "Invalid parameter: {s}"),
            Error::Io { path, source } => write!(f, "I/O error at {}: {source}", path.display()),
            Error::Encode(s) => write!(f, "PNG encode error: {s}"),
            Error::NameExhausted(s) => write!(f, "No free file name for {s}"),
            Error::Metadata(s) => write!(f, "Import record error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
