use std::path::{Path, PathBuf};

/// Where to look for a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// The user's home directory.
    Home,
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// Configuration-file dialect, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `[section]` headers, `key = value` lines, `#`/`;` comments.
    Ini,
    /// Settings nested under a namespace table, e.g. `[tool.myapp.section]`.
    Toml,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Dialect::Toml,
            _ => Dialect::Ini,
        }
    }
}

/// A config operation, independent of any CLI framework.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Write the current configuration as a config file.
    Gen { output: Option<PathBuf> },
    /// Show one option's value and help.
    Get { key: String },
    /// Show every option's value.
    List,
}
