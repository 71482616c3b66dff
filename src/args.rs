//! Command-line tokenizing, delegated to clap's builder API.
//!
//! A clap [`Command`] is built at runtime from the registered
//! [`OptionDef`]s. Clap does the tokenizing; this module turns its matches
//! back into `(option name, raw value)` pairs in argv order so the registry
//! can dispatch them through the same path as every other source.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};

use crate::error::{OptbankError, Result};
use crate::option::{Action, OptionDef};
use crate::value::Value;

const POSITIONALS: &str = "__positionals";

/// Result of tokenizing argv.
#[derive(Debug, Default, PartialEq)]
pub struct Parsed {
    /// Option assignments in the order they appeared.
    pub assignments: Vec<(String, Value)>,
    pub positionals: Vec<String>,
}

/// Marker passed for options that take no value.
pub fn presence() -> Value {
    Value::Bool(true)
}

/// Build the clap command for `defs`.
///
/// Long names must match exactly, repeating a single-valued option keeps the
/// last occurrence, and clap's own help and version flags are disabled: help
/// is provided through the registry's help options.
pub fn command(app_name: &str, defs: &[&OptionDef]) -> Command {
    let mut cmd = Command::new(app_name.to_string())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true);

    for def in defs {
        let mut arg = Arg::new(def.name.clone()).long(def.name.clone());
        if let Some(short) = def.short {
            arg = arg.short(short);
        }
        arg = if !def.takes_value() {
            match def.action {
                Action::Count => arg.action(ArgAction::Count),
                _ => arg.action(ArgAction::SetTrue),
            }
        } else {
            let action = match def.action {
                Action::Append => ArgAction::Append,
                _ => ArgAction::Set,
            };
            arg.action(action)
                .num_args(1)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(String))
        };
        cmd = cmd.arg(arg);
    }

    cmd.arg(
        Arg::new(POSITIONALS)
            .action(ArgAction::Append)
            .num_args(0..)
            .value_parser(clap::value_parser!(String)),
    )
}

/// Tokenize `argv` against `defs`.
///
/// Unknown options fail with [`OptbankError::UnknownOption`]; other clap
/// errors (missing values and the like) with [`OptbankError::CommandLine`].
pub fn parse<I, S>(app_name: &str, argv: I, defs: &[&OptionDef]) -> Result<Parsed>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    let matches = command(app_name, defs)
        .try_get_matches_from(&argv)
        .map_err(map_clap_error)?;

    let mut indexed: Vec<(usize, String, Value)> = Vec::new();
    for def in defs {
        let id = def.name.as_str();
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            continue;
        }
        if !def.takes_value() {
            let index = matches.index_of(id).unwrap_or(0);
            let times = match def.action {
                Action::Count => usize::from(matches.get_count(id)),
                _ => 1,
            };
            for _ in 0..times {
                indexed.push((index, def.name.clone(), presence()));
            }
            continue;
        }
        let indices = matches.indices_of(id).into_iter().flatten();
        let values = matches.get_many::<String>(id).into_iter().flatten();
        for (index, raw) in indices.zip(values) {
            indexed.push((index, def.name.clone(), Value::Str(raw.clone())));
        }
    }
    indexed.sort_by_key(|(index, _, _)| *index);

    let positionals = matches
        .get_many::<String>(POSITIONALS)
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    Ok(Parsed {
        assignments: indexed
            .into_iter()
            .map(|(_, name, value)| (name, value))
            .collect(),
        positionals,
    })
}

fn map_clap_error(err: clap::Error) -> OptbankError {
    use clap::error::{ContextKind, ErrorKind};

    if err.kind() == ErrorKind::UnknownArgument
        && let Some(arg) = err.get(ContextKind::InvalidArg)
    {
        let name = arg.to_string();
        let name = name.trim_start_matches('-').to_string();
        return OptbankError::UnknownOption { name };
    }
    OptbankError::CommandLine(err)
}
