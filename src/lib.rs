//! Layered option resolution for command-line tools. Register providers,
//! point at a config file, pass argv, and read the values back.
//!
//! Optbank resolves the effective configuration of a tool from three
//! sources: built-in defaults, a configuration file (INI or TOML), and the
//! command line. Options are declared by independent *providers*, each
//! owning a slice of one flat option namespace and the record of its current
//! values.
//!
//! ```ignore
//! let resolved = Optbank::builder()
//!     .app_name("lint")
//!     .provider(core)
//!     .provider(design)
//!     .args(std::env::args().skip(1))
//!     .load()?;
//!
//! let width = resolved.registry.get_value("max-line-length");
//! ```
//!
//! That single call registers both providers, looks for `lintrc`, `.lintrc`
//! or a `pyproject.toml` with a `[tool.lint]` table, applies it over the
//! defaults, and then applies the command line.
//!
//! # Providers and the registry
//!
//! An [`OptionDef`] describes one option: its name, how raw input is
//! validated ([`Kind`]), what happens when it receives a value ([`Action`]),
//! its default, group, help level and help text. A [`Provider`] bundles
//! definitions under a name and a priority; anything implementing
//! [`OptionsProvider`] can be registered.
//!
//! The [`Registry`] enforces that every option name is unique across all
//! providers. Registration is all-or-nothing: a provider that collides with
//! an existing name is rejected and the registry is left unchanged.
//! Providers are kept in descending priority order (priorities are `<= 0`),
//! registration order breaking ties.
//!
//! # Layer precedence
//!
//! ```text
//! Defaults              OptionDef::default_value
//!        ↑ overridden by
//! Config file           [SECTION] key = value
//!        ↑ overridden by
//! Command line          --key value
//! ```
//!
//! Each layer is applied through the option's action, so the same rules hold
//! whichever source supplied the value:
//!
//! - **store** keeps the validated value.
//! - **toggle-true** / **toggle-false** / **count** store the fixed values
//!   `0`, `1` and `0`, whatever the input.
//! - **append** accumulates into a list, across layers.
//! - **callback** hands the value to a function and stores nothing.
//!
//! Unknown keys in a configuration file are skipped, so one file can serve
//! tools that load different providers. Unknown command-line options are an
//! error.
//!
//! # Groups and help
//!
//! Options are bound to [`Group`]s: an explicit group named in the
//! definition, or a group named after the provider. A group is both a help
//! section and a configuration-file section (`[REPORTS]`). Options and groups
//! carry a help level; `--help` shows level 0 and the registry synthesizes
//! `--long-help`, `--long-long-help`, ... for each higher level in use. Help
//! interpolates each option's current value, so it reflects the file.
//!
//! A help option ends command-line processing with
//! [`OptbankError::DisplayHelp`]; print its text and exit with status 0.
//!
//! # Generating and inspecting
//!
//! [`Registry::generate`] writes the current values as an INI file that reads
//! back to the same values. [`ConfigAction`] and [`ConfigResult`] provide
//! `config gen|get|list` operations independent of any CLI layout.
//!
//! # Environment
//!
//! `{APP}RC` names a configuration file that wins over discovery.
//! `{APP}HOME` names the directory of the [`StatsCache`], a best-effort
//! store for data kept between runs.

pub mod error;
pub mod types;

pub mod args;
mod builder;
mod cache;
mod env;
pub mod file;
mod help;
pub(crate) mod merge;
mod option;
pub mod ops;
mod provider;
mod registry;
pub mod resolve;
pub mod validate;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::{Optbank, OptbankBuilder, Resolved};
pub use cache::StatsCache;
pub use env::EnvSettings;
pub use error::{OptbankError, Result};
pub use file::{ConfigSections, ReaderOptions, SectionNormalizer};
pub use ops::ConfigResult;
pub use option::{Action, Callback, Kind, OptionDef};
pub use provider::{OptionsProvider, Provider, Values};
pub use registry::{Group, Registry};
pub use types::{ConfigAction, Dialect, SearchPath};
pub use value::Value;
