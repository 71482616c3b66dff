use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptbankError>;

#[derive(Debug, Error)]
pub enum OptbankError {
    #[error("Option '{name}' is already registered (by provider '{owner}')")]
    DuplicateOption { name: String, owner: String },

    #[error("Short option '-{short}' of '{second}' is already used by '{first}'")]
    DuplicateShort {
        short: char,
        first: String,
        second: String,
    },

    #[error(
        "Options '{first}' and '{second}' share the attribute '{attr}' in provider '{provider}'"
    )]
    AttrCollision {
        provider: String,
        first: String,
        second: String,
        attr: String,
    },

    #[error("Provider '{provider}' has priority {priority}; priorities must be <= 0")]
    InvalidPriority { provider: String, priority: i32 },

    #[error("Unsupported action '{action}' for option '{name}'")]
    UnsupportedAction { name: String, action: String },

    #[error("Invalid value for '{name}': {value:?} ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Unknown option '{name}'")]
    UnknownOption { name: String },

    #[error("The config file {path} doesn't exist")]
    MissingFile { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Syntax error in {path} (line {line}): {reason}")]
    SyntaxError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Command line error: {0}")]
    CommandLine(#[from] clap::Error),

    /// A help pseudo-option was given. Not a failure: print `text` and exit 0.
    #[error("{text}")]
    DisplayHelp { level: u8, text: String },

    #[error("App name is required: call .app_name() on the builder")]
    AppNameRequired,
}

impl OptbankError {
    /// Process exit status matching the error: `0` for help output, `2` for
    /// bad user input, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            OptbankError::DisplayHelp { .. } => 0,
            OptbankError::InvalidValue { .. }
            | OptbankError::UnknownOption { .. }
            | OptbankError::CommandLine(_) => 2,
            _ => 1,
        }
    }

    /// True for mistakes in option definitions rather than in user input.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            OptbankError::DuplicateOption { .. }
                | OptbankError::DuplicateShort { .. }
                | OptbankError::AttrCollision { .. }
                | OptbankError::InvalidPriority { .. }
                | OptbankError::UnsupportedAction { .. }
        )
    }
}
