//! Static option definitions.
//!
//! An [`OptionDef`] describes one configurable setting: its name, how raw
//! input is validated ([`Kind`]), how a new value is applied ([`Action`]), its
//! default, and how it shows up in help output and configuration files.
//! Definitions are built once, when a provider is constructed, and never
//! change afterwards.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::value::Value;

/// How a raw value is validated and converted.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Any string.
    String,
    /// Any string except the empty one.
    NonEmptyString,
    /// `y`/`yes`/`true` or `n`/`no`/`false`.
    Bool,
    Int,
    Float,
    /// One value out of a fixed set.
    Choice(Vec<String>),
    /// Comma-separated values, each out of a fixed set.
    MultipleChoice(Vec<String>),
    /// Comma-separated list of strings.
    Csv,
    Regex,
    /// Comma-separated list of regular expressions.
    RegexCsv,
    /// Takes no value on the command line; only its presence matters.
    Flag,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::NonEmptyString => "non_empty_string",
            Kind::Bool => "yn",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Choice(_) => "choice",
            Kind::MultipleChoice(_) => "multiple_choice",
            Kind::Csv => "csv",
            Kind::Regex => "regexp",
            Kind::RegexCsv => "regexp_csv",
            Kind::Flag => "flag",
        }
    }

    /// Placeholder shown in help output, e.g. `--jobs=<int>`.
    fn default_metavar(&self) -> String {
        match self {
            Kind::Bool => "<y or n>".into(),
            Kind::Choice(choices) => format!("<{}>", choices.join("|")),
            other => format!("<{}>", other.name()),
        }
    }
}

/// Hook invoked by [`Action::Callback`] options with the option name and the
/// validated value (or `None` when the option carries no value).
pub type Callback = Arc<dyn Fn(&str, Option<&Value>) -> Result<()> + Send + Sync>;

/// The mutation applied when an option receives a value.
#[derive(Clone)]
pub enum Action {
    Store,
    ToggleTrue,
    ToggleFalse,
    Count,
    Append,
    Callback(Callback),
}

impl Action {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&Value>) -> Result<()> + Send + Sync + 'static,
    {
        Action::Callback(Arc::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Store => "store",
            Action::ToggleTrue => "store_true",
            Action::ToggleFalse => "store_false",
            Action::Count => "count",
            Action::Append => "append",
            Action::Callback(_) => "callback",
        }
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, Action::Callback(_))
    }

    /// Toggle and count options never consume a value.
    pub fn is_valueless(&self) -> bool {
        matches!(self, Action::ToggleTrue | Action::ToggleFalse | Action::Count)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of one option.
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub name: String,
    pub kind: Kind,
    pub action: Action,
    pub default: Option<Value>,
    pub group: Option<String>,
    pub level: u8,
    pub short: Option<char>,
    pub deprecated: bool,
    pub help: String,
    pub metavar: Option<String>,
}

impl OptionDef {
    pub fn new(name: &str, kind: Kind) -> Self {
        let action = if kind == Kind::Flag {
            Action::ToggleTrue
        } else {
            Action::Store
        };
        Self {
            name: name.to_string(),
            kind,
            action,
            default: None,
            group: None,
            level: 0,
            short: None,
            deprecated: false,
            help: String::new(),
            metavar: None,
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn default_value<V: Into<Value>>(mut self, value: V) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    /// Key under which the provider stores this option's value.
    pub fn attr_name(&self) -> String {
        attr_name(&self.name)
    }

    /// Whether the option consumes a value on the command line.
    pub fn takes_value(&self) -> bool {
        !self.action.is_valueless() && self.kind != Kind::Flag
    }

    pub fn display_metavar(&self) -> String {
        self.metavar
            .clone()
            .unwrap_or_else(|| self.kind.default_metavar())
    }
}

/// `max-line-length` → `max_line_length`.
pub fn attr_name(option_name: &str) -> String {
    option_name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_name_replaces_hyphens() {
        assert_eq!(attr_name("max-line-length"), "max_line_length");
        assert_eq!(attr_name("jobs"), "jobs");
    }

    #[test]
    fn flag_kind_defaults_to_toggle() {
        let def = OptionDef::new("verbose", Kind::Flag);
        assert!(matches!(def.action, Action::ToggleTrue));
        assert!(!def.takes_value());
    }

    #[test]
    fn store_takes_value() {
        let def = OptionDef::new("jobs", Kind::Int).default_value(1i64);
        assert!(def.takes_value());
        assert_eq!(def.default, Some(Value::Int(1)));
    }

    #[test]
    fn count_takes_no_value_even_with_int_kind() {
        let def = OptionDef::new("verbosity", Kind::Int).action(Action::Count);
        assert!(!def.takes_value());
    }

    #[test]
    fn metavar_falls_back_to_kind() {
        let def = OptionDef::new("jobs", Kind::Int);
        assert_eq!(def.display_metavar(), "<int>");
        let def = OptionDef::new("fmt", Kind::Choice(vec!["text".into(), "json".into()]));
        assert_eq!(def.display_metavar(), "<text|json>");
        let def = OptionDef::new("rcfile", Kind::String).metavar("<file>");
        assert_eq!(def.display_metavar(), "<file>");
    }

    #[test]
    fn action_debug_uses_name() {
        let cb = Action::callback(|_, _| Ok(()));
        assert_eq!(format!("{cb:?}"), "callback");
        assert!(cb.is_callback());
    }
}
