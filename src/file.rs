//! Configuration files: discovery, dialect readers and section normalization.
//!
//! Whatever the dialect, a file is reduced to [`ConfigSections`]: an ordered
//! `section → key → string` mapping. Typed interpretation of the strings is
//! left to each option's validator.
//!
//! # Dialects
//!
//! - **INI**: `[section]` headers, `key = value` (or `key: value`) lines,
//!   whole-line comments starting with `#` or `;`, inline comments introduced
//!   by whitespace followed by `#` or `;`, and indented continuation lines.
//!   Keys are lowercased.
//! - **TOML**: settings live under a namespace table (`[tool.<app>]` by
//!   default); each child table is a section. Scalars are rendered as
//!   strings and arrays as comma-joined lists.
//!
//! # Section names
//!
//! Titles are passed through a [`SectionNormalizer`] once per file: an
//! optional `"<app>."` prefix is stripped and the title uppercased, so
//! `[lint.Reports]`, `[reports]` and `[REPORTS]` all land in `REPORTS`.
//! Sections that normalize to the same title are merged.
//!
//! # Discovery
//!
//! [`find_config_file`] looks for `<app>rc`, `.<app>rc` and the TOML file
//! named by [`ReaderOptions::toml_file`] (only if it contains the namespace
//! table) in a list of
//! [`SearchPath`]s, highest priority last. An explicit override path (e.g.
//! from the `<APP>RC` environment variable) wins over everything else.

use std::path::{Path, PathBuf};

use crate::error::{OptbankError, Result};
use crate::merge::merge_sections;
use crate::types::{Dialect, SearchPath};

/// Raw configuration: sections in first-seen order, each an ordered list of
/// `(key, value)` pairs with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSections {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl ConfigSections {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(title, _)| title.as_str())
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let (_, entries) = self.sections.iter().find(|(title, _)| title == section)?;
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` in `section`, creating the section if needed.
    pub fn insert(&mut self, section: &str, key: &str, value: &str) {
        let pos = match self.sections.iter().position(|(title, _)| title == section) {
            Some(pos) => pos,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };
        let entries = &mut self.sections[pos].1;
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
    }

    fn ensure_section(&mut self, section: &str) {
        if !self.sections.iter().any(|(title, _)| title == section) {
            self.sections.push((section.to_string(), Vec::new()));
        }
    }

    /// Every `(section, key, value)` triple, in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.sections.iter().flat_map(|(title, entries)| {
            entries
                .iter()
                .map(move |(k, v)| (title.as_str(), k.as_str(), v.as_str()))
        })
    }

    /// Rename every section through `normalizer`, merging sections that end
    /// up with the same title.
    pub fn normalized(self, normalizer: &SectionNormalizer) -> ConfigSections {
        let mut out = ConfigSections::default();
        for (title, entries) in self.sections {
            let mut one = ConfigSections::default();
            let title = normalizer.normalize(&title);
            one.ensure_section(&title);
            for (k, v) in entries {
                one.insert(&title, &k, &v);
            }
            out = merge_sections(out, one);
        }
        out
    }
}

/// Maps raw section titles to registry group titles.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionNormalizer {
    prefix: Option<String>,
}

impl SectionNormalizer {
    /// Strip `"{prefix}."` from titles before uppercasing them.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: Some(format!("{prefix}.")),
        }
    }

    /// Only uppercase.
    pub fn uppercase() -> Self {
        Self { prefix: None }
    }

    pub fn normalize(&self, title: &str) -> String {
        let title = match &self.prefix {
            Some(prefix) => title.strip_prefix(prefix.as_str()).unwrap_or(title),
            None => title,
        };
        if title.is_empty() {
            String::new()
        } else {
            title.to_uppercase()
        }
    }
}

/// Settings for reading configuration files.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    /// Path of the namespace table holding the settings in TOML files.
    pub toml_namespace: Vec<String>,
    pub normalizer: SectionNormalizer,
    /// TOML file name considered during discovery.
    pub toml_file: String,
}

impl ReaderOptions {
    /// `[tool.{app}]` namespace in `pyproject.toml`, `"{app}."` section
    /// prefix.
    pub fn for_app(app_name: &str) -> Self {
        Self {
            toml_namespace: vec!["tool".to_string(), app_name.to_string()],
            normalizer: SectionNormalizer::with_prefix(app_name),
            toml_file: "pyproject.toml".to_string(),
        }
    }
}

/// Read and normalize the configuration file at `path`.
pub fn read_config_file(path: &Path, opts: &ReaderOptions) -> Result<ConfigSections> {
    let path = expand_home(path);
    if !path.exists() {
        return Err(OptbankError::MissingFile { path });
    }
    let content = std::fs::read_to_string(&path).map_err(|e| OptbankError::IoError {
        path: path.clone(),
        source: e,
    })?;
    let raw = match Dialect::from_path(&path) {
        Dialect::Ini => parse_ini(&content, &path)?,
        Dialect::Toml => parse_toml(&content, &path, &opts.toml_namespace)?,
    };
    Ok(raw.normalized(&opts.normalizer))
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(user) = directories::UserDirs::new()
    {
        return user.home_dir().join(rest);
    }
    path.to_path_buf()
}

/// Parse INI-dialect text. Section titles are returned as written.
pub fn parse_ini(content: &str, path: &Path) -> Result<ConfigSections> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut sections = ConfigSections::default();
    let mut section: Option<String> = None;
    // Key of the value being read, and the indentation of its line.
    let mut last_key: Option<(String, usize)> = None;

    let syntax = |line: usize, reason: &str| OptbankError::SyntaxError {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    };

    for (i, line) in content.lines().enumerate() {
        let lineno = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // A line indented deeper than its key's line continues the value.
        let indent = line.len() - line.trim_start().len();
        if let (Some(sect), Some((key, key_indent))) = (&section, &last_key)
            && indent > *key_indent
        {
            let current = sections.get(sect, key).unwrap_or_default();
            let value = strip_inline_comment(trimmed);
            let joined = if current.is_empty() {
                value.to_string()
            } else {
                format!("{current}\n{value}")
            };
            sections.insert(sect, key, &joined);
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            let Some(title) = header.strip_suffix(']') else {
                return Err(syntax(lineno, "unterminated section header"));
            };
            let title = title.trim().to_string();
            sections.ensure_section(&title);
            section = Some(title);
            last_key = None;
            continue;
        }

        let Some(sect) = &section else {
            return Err(syntax(lineno, "key outside of any section"));
        };
        let Some(split) = trimmed.find(['=', ':']) else {
            return Err(syntax(lineno, "expected 'key = value'"));
        };
        let key = trimmed[..split].trim().to_lowercase();
        if key.is_empty() {
            return Err(syntax(lineno, "empty key"));
        }
        let value = strip_inline_comment(trimmed[split + 1..].trim());
        sections.insert(sect, &key, value);
        last_key = Some((key, indent));
    }
    Ok(sections)
}

/// Drop a trailing comment: `#` or `;` preceded by whitespace.
fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if (*b == b'#' || *b == b';') && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return value[..i].trim_end();
        }
    }
    value
}

/// Parse TOML text, keeping only the tables under `namespace`.
pub fn parse_toml(content: &str, path: &Path, namespace: &[String]) -> Result<ConfigSections> {
    let root: toml::Table = toml::from_str(content).map_err(|e| OptbankError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut sections = ConfigSections::default();
    let Some(settings) = toml_namespace(&root, namespace) else {
        return Ok(sections);
    };
    for (title, value) in settings {
        let toml::Value::Table(table) = value else {
            log::debug!("ignoring non-table entry '{title}' in {}", path.display());
            continue;
        };
        sections.ensure_section(title);
        for (key, value) in table {
            sections.insert(title, key, &toml_to_string(value));
        }
    }
    Ok(sections)
}

fn toml_namespace<'a>(root: &'a toml::Table, namespace: &[String]) -> Option<&'a toml::Table> {
    let mut current = root;
    for segment in namespace {
        current = current.get(segment)?.as_table()?;
    }
    Some(current)
}

fn toml_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Resolve a [`SearchPath`] to a directory. `None` if it cannot be resolved.
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().to_path_buf())
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Find the configuration file to use.
///
/// `rc_override` wins if it names an existing file. Otherwise the search
/// paths are tried from the end (highest priority) backward; in each
/// directory `<app>rc`, `.<app>rc` and `opts.toml_file` are considered, the
/// TOML file only if it holds the namespace table.
pub fn find_config_file(
    app_name: &str,
    search_paths: &[SearchPath],
    rc_override: Option<&Path>,
    opts: &ReaderOptions,
) -> Option<PathBuf> {
    if let Some(path) = rc_override {
        let path = expand_home(path);
        if path.is_file() {
            return Some(path);
        }
        log::debug!("ignoring config override {}: not a file", path.display());
    }
    let candidates = [
        format!("{app_name}rc"),
        format!(".{app_name}rc"),
        opts.toml_file.clone(),
    ];
    for sp in search_paths.iter().rev() {
        let Some(dir) = resolve_search_path(sp, app_name) else {
            continue;
        };
        for name in &candidates {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            if Dialect::from_path(&path) == Dialect::Toml && !has_toml_namespace(&path, opts) {
                continue;
            }
            return Some(path);
        }
    }
    None
}

fn has_toml_namespace(path: &Path, opts: &ReaderOptions) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str::<toml::Table>(&content).ok())
        .is_some_and(|root| toml_namespace(&root, &opts.toml_namespace).is_some())
}
