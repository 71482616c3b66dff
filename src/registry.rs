//! The option registry: many providers, one flat namespace.
//!
//! The registry keeps
//!
//! - the providers, ordered by descending priority (registration order breaks
//!   ties),
//! - a map from every option name to the provider that owns it,
//! - named [`Group`]s, each both a help section and a config-file section,
//! - the highest help level in use, from which the `--long-help`,
//!   `--long-long-help`, ... pseudo-options are synthesized.
//!
//! Values reach providers in three strictly ordered stages:
//! [`load_defaults`](Registry::load_defaults), then
//! [`apply_config_file`](Registry::apply_config_file), then
//! [`apply_command_line`](Registry::apply_command_line). Each stage overwrites
//! whatever the previous one set for the options it touches.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use crate::args;
use crate::error::{OptbankError, Result};
use crate::file::{self, ConfigSections, ReaderOptions};
use crate::help;
use crate::ops;
use crate::option::{Action, Kind, OptionDef};
use crate::provider::OptionsProvider;
use crate::validate;
use crate::value::Value;

const HELP_SHORT: char = 'h';

/// Who answers for an option name.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Owner {
    /// Index into `Registry::providers` (registration order).
    Provider(usize),
    /// A synthesized help option for the given level.
    Help(u8),
}

/// A named bucket of options: one help section and, unless titled
/// `DEFAULT`, one configuration-file section.
#[derive(Debug, Clone)]
pub struct Group {
    pub title: String,
    pub description: Option<String>,
    pub level: u8,
    members: Vec<(usize, String)>,
}

impl Group {
    fn new(title: &str, description: Option<String>, level: u8) -> Self {
        Self {
            title: title.to_string(),
            description,
            level,
            members: Vec::new(),
        }
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(_, name)| name.as_str())
    }

    pub fn is_config_section(&self) -> bool {
        self.title != "DEFAULT"
    }
}

pub struct Registry {
    app_name: String,
    providers: Vec<Box<dyn OptionsProvider>>,
    /// Indices into `providers`, highest priority first.
    order: Vec<usize>,
    owners: HashMap<String, Owner>,
    /// Short alias to option name; `h` belongs to `--help`.
    shorts: HashMap<char, String>,
    groups: Vec<Group>,
    top_level: Vec<(usize, String)>,
    help_options: Vec<OptionDef>,
    max_level: u8,
    reader: ReaderOptions,
}

impl Registry {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            providers: Vec::new(),
            order: Vec::new(),
            owners: HashMap::new(),
            shorts: HashMap::from([(HELP_SHORT, "help".to_string())]),
            groups: Vec::new(),
            top_level: Vec::new(),
            help_options: Vec::new(),
            max_level: 0,
            reader: ReaderOptions::for_app(app_name),
        }
    }

    /// Replace the config-file reader settings (TOML namespace, section
    /// normalization).
    pub fn with_reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Register a provider whose ungrouped options form their own group.
    pub fn register<P: OptionsProvider + 'static>(&mut self, provider: P) -> Result<()> {
        self.register_with(provider, true)
    }

    /// Register a provider. With `own_group` false, options that name no
    /// group are bound at top level instead of under the provider's name.
    ///
    /// Registration is all-or-nothing: on error the registry is unchanged.
    pub fn register_with<P: OptionsProvider + 'static>(
        &mut self,
        provider: P,
        own_group: bool,
    ) -> Result<()> {
        self.register_boxed(Box::new(provider), own_group)
    }

    /// [`register_with`](Self::register_with) for an already boxed provider.
    pub fn register_boxed(
        &mut self,
        provider: Box<dyn OptionsProvider>,
        own_group: bool,
    ) -> Result<()> {
        if provider.priority() > 0 {
            return Err(OptbankError::InvalidPriority {
                provider: provider.name().to_string(),
                priority: provider.priority(),
            });
        }
        let mut incoming = HashSet::new();
        let mut attrs: HashMap<String, &str> = HashMap::new();
        let mut shorts: HashMap<char, &str> = HashMap::new();
        for def in provider.definitions() {
            if let Some(owner) = self.owners.get(&def.name) {
                return Err(OptbankError::DuplicateOption {
                    name: def.name.clone(),
                    owner: self.owner_name(*owner),
                });
            }
            if !incoming.insert(def.name.as_str()) {
                return Err(OptbankError::DuplicateOption {
                    name: def.name.clone(),
                    owner: provider.name().to_string(),
                });
            }
            if let Some(first) = attrs.insert(def.attr_name(), &def.name) {
                return Err(OptbankError::AttrCollision {
                    provider: provider.name().to_string(),
                    first: first.to_string(),
                    second: def.name.clone(),
                    attr: def.attr_name(),
                });
            }
            if let Some(short) = def.short {
                let taken = self
                    .shorts
                    .get(&short)
                    .map(String::as_str)
                    .or_else(|| shorts.get(&short).copied());
                if let Some(first) = taken {
                    return Err(OptbankError::DuplicateShort {
                        short,
                        first: first.to_string(),
                        second: def.name.clone(),
                    });
                }
                shorts.insert(short, &def.name);
            }
        }

        let idx = self.providers.len();
        let pos = self
            .order
            .iter()
            .position(|&i| provider.priority() > self.providers[i].priority())
            .unwrap_or(self.order.len());
        self.order.insert(pos, idx);

        let own_title = provider.name().to_uppercase();
        for def in provider.definitions() {
            self.owners.insert(def.name.clone(), Owner::Provider(idx));
            if let Some(short) = def.short {
                self.shorts.insert(short, def.name.clone());
            }
            self.max_level = self.max_level.max(def.level);
            let member = (idx, def.name.clone());
            match &def.group {
                Some(group) => {
                    let title = group.to_uppercase();
                    let doc = provider
                        .option_groups()
                        .iter()
                        .find(|(g, _)| g.to_uppercase() == title)
                        .map(|(_, doc)| doc.clone());
                    self.group_mut(&title, doc, provider.level()).members.push(member);
                }
                None if own_group => {
                    let doc = provider.doc().map(str::to_string);
                    self.group_mut(&own_title, doc, provider.level())
                        .members
                        .push(member);
                }
                None => self.top_level.push(member),
            }
        }
        log::debug!(
            "registered provider '{}' (priority {}, {} options)",
            provider.name(),
            provider.priority(),
            provider.definitions().len()
        );
        self.providers.push(provider);
        Ok(())
    }

    /// Add a help-only section, shown from `level` upwards.
    pub fn add_help_section(&mut self, title: &str, description: &str, level: u8) {
        let title = title.to_uppercase();
        self.group_mut(&title, Some(description.to_string()), level);
        self.max_level = self.max_level.max(level);
    }

    fn group_mut(&mut self, title: &str, description: Option<String>, level: u8) -> &mut Group {
        let pos = match self.groups.iter().position(|g| g.title == title) {
            Some(pos) => pos,
            None => {
                self.groups.push(Group::new(title, description, level));
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos]
    }

    fn owner_name(&self, owner: Owner) -> String {
        match owner {
            Owner::Provider(i) => self.providers[i].name().to_string(),
            Owner::Help(_) => "help".to_string(),
        }
    }

    /// Providers, highest priority first.
    pub fn providers(&self) -> impl Iterator<Item = &dyn OptionsProvider> {
        self.order.iter().map(|&i| self.providers[i].as_ref())
    }

    pub fn provider(&self, name: &str) -> Option<&dyn OptionsProvider> {
        self.providers().find(|p| p.name() == name)
    }

    fn provider_for(&self, option: &str) -> Option<&dyn OptionsProvider> {
        match self.owners.get(option)? {
            Owner::Provider(i) => Some(self.providers[*i].as_ref()),
            Owner::Help(_) => None,
        }
    }

    pub fn definition(&self, option: &str) -> Option<&OptionDef> {
        self.provider_for(option)?.definition(option).ok()
    }

    /// Current value of any registered option.
    pub fn get_value(&self, option: &str) -> Option<&Value> {
        self.provider_for(option)?.get_value(option)
    }

    /// Set one option on whichever provider owns it.
    pub fn set_option(&mut self, option: &str, value: Option<Value>) -> Result<()> {
        match self.owners.get(option) {
            Some(Owner::Provider(i)) => self.providers[*i].set_option(option, value, None),
            _ => Err(OptbankError::UnknownOption {
                name: option.to_string(),
            }),
        }
    }

    /// Programmatic overrides. Keys may use underscores in place of hyphens;
    /// unknown keys are an error.
    pub fn load_configuration<I, K>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        for (key, value) in pairs {
            let option = key.as_ref().replace('_', "-");
            self.set_option(&option, Some(value))?;
        }
        Ok(())
    }

    /// Seed every provider from its definitions' defaults.
    pub fn load_defaults(&mut self) -> Result<()> {
        for &i in &self.order {
            self.providers[i].load_defaults()?;
        }
        Ok(())
    }

    /// Read and normalize a configuration file without applying it.
    ///
    /// `None` means no file is configured: the result is empty. A path that
    /// does not exist is an error.
    pub fn read_config_file(&mut self, path: Option<&Path>) -> Result<ConfigSections> {
        self.ensure_help_options()?;
        let Some(path) = path else {
            log::debug!("no config file found, using default configuration");
            return Ok(ConfigSections::default());
        };
        let sections = file::read_config_file(path, &self.reader)?;
        log::debug!("using config file {}", path.display());
        Ok(sections)
    }

    /// Dispatch values read from a configuration file.
    ///
    /// Keys that match no registered option are skipped: a file may hold
    /// settings for providers that are not loaded. Invalid values still fail.
    pub fn apply_config_file(&mut self, sections: &ConfigSections) -> Result<()> {
        for (section, key, raw) in sections.entries() {
            let Some(Owner::Provider(i)) = self.owners.get(key).copied() else {
                log::debug!("ignoring unknown option '{key}' in section [{section}]");
                continue;
            };
            match set_from_file(self.providers[i].as_mut(), key, raw) {
                Ok(()) => {}
                Err(OptbankError::UnknownOption { .. }) => {
                    log::debug!("ignoring option '{key}' in section [{section}]");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Parse `argv` (without the program name) and apply every option it
    /// sets, in order. Returns the positional arguments.
    ///
    /// A help option stops processing with [`OptbankError::DisplayHelp`].
    pub fn apply_command_line<I, S>(&mut self, argv: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_help_options()?;
        let parsed = {
            let defs: Vec<&OptionDef> = self
                .help_options
                .iter()
                .chain(self.providers().flat_map(|p| p.definitions()))
                .collect();
            args::parse(&self.app_name, argv, &defs)?
        };
        for (name, value) in parsed.assignments {
            match self.owners.get(&name).copied() {
                Some(Owner::Help(level)) => {
                    return Err(OptbankError::DisplayHelp {
                        level,
                        text: self.help(level),
                    });
                }
                Some(Owner::Provider(i)) => self.providers[i].set_option(&name, Some(value), None)?,
                None => return Err(OptbankError::UnknownOption { name }),
            }
        }
        Ok(parsed.positionals)
    }

    /// Make sure there is one help option per level up to `max_level`:
    /// `--help`, `--long-help`, `--long-long-help`, ...
    fn ensure_help_options(&mut self) -> Result<()> {
        for level in 0..=self.max_level {
            let name = help_option_name(level);
            match self.owners.get(&name) {
                Some(Owner::Help(_)) => continue,
                Some(owner) => {
                    return Err(OptbankError::DuplicateOption {
                        name,
                        owner: self.owner_name(*owner),
                    });
                }
                None => {}
            }
            let mut def = OptionDef::new(&name, Kind::Flag)
                .action(Action::callback(|_, _| Ok(())))
                .help(&help_option_text(level));
            if level == 0 {
                def = def.short(HELP_SHORT);
            }
            self.owners.insert(name, Owner::Help(level));
            self.help_options.push(def);
        }
        Ok(())
    }

    /// Render help for every option and group visible at `level`.
    pub fn help(&self, level: u8) -> String {
        help::render(self, level)
    }

    /// Write the current configuration as a configuration file.
    pub fn generate<W: Write>(&self, out: &mut W, skip_groups: &[&str]) -> std::io::Result<()> {
        ops::generate(self, out, skip_groups)
    }

    pub(crate) fn help_options(&self) -> &[OptionDef] {
        &self.help_options
    }

    pub(crate) fn top_level_entries(&self) -> Vec<(&OptionDef, Option<&Value>)> {
        self.entries(&self.top_level)
    }

    pub(crate) fn group_entries<'a>(
        &'a self,
        group: &'a Group,
    ) -> Vec<(&'a OptionDef, Option<&'a Value>)> {
        self.entries(&group.members)
    }

    fn entries<'a>(
        &'a self,
        members: &'a [(usize, String)],
    ) -> Vec<(&'a OptionDef, Option<&'a Value>)> {
        members
            .iter()
            .filter_map(|(i, name)| {
                let provider = self.providers[*i].as_ref();
                let def = provider.definition(name).ok()?;
                Some((def, provider.get_value(name)))
            })
            .collect()
    }
}

/// Apply one raw config-file value.
///
/// A file holds the whole list of an `Append` option, comma-joined, so the
/// list is rebuilt from its entries instead of growing the current one.
fn set_from_file(provider: &mut dyn OptionsProvider, key: &str, raw: &str) -> Result<()> {
    if !matches!(provider.definition(key)?.action, Action::Append) {
        return provider.set_option(key, Some(Value::Str(raw.to_string())), None);
    }
    provider.set_option(key, None, Some(&Action::Store))?;
    for entry in validate::split_csv(raw) {
        provider.set_option(key, Some(Value::Str(entry)), None)?;
    }
    Ok(())
}

fn help_option_name(level: u8) -> String {
    let mut name = "long-".repeat(level as usize);
    name.push_str("help");
    name
}

fn help_option_text(level: u8) -> String {
    if level == 0 {
        "show this help message and exit".to_string()
    } else {
        format!("{} verbose help.", vec!["more"; level as usize].join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{core_provider, design_provider, registry};
    use crate::provider::{Provider, Values};

    #[test]
    fn providers_ordered_by_priority_then_registration() {
        let mut reg = Registry::new("lint");
        reg.register(Provider::new("a", vec![]).unwrap().with_priority(-1))
            .unwrap();
        reg.register(Provider::new("b", vec![]).unwrap().with_priority(0))
            .unwrap();
        reg.register(Provider::new("c", vec![]).unwrap().with_priority(-1))
            .unwrap();
        reg.register(Provider::new("d", vec![]).unwrap().with_priority(-5))
            .unwrap();
        let names: Vec<&str> = reg.providers().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn positive_priority_rejected() {
        let mut reg = Registry::new("lint");
        let err = reg
            .register(Provider::new("a", vec![]).unwrap().with_priority(1))
            .unwrap_err();
        assert!(matches!(err, OptbankError::InvalidPriority { priority: 1, .. }));
    }

    #[test]
    fn duplicate_option_rejected_atomically() {
        let mut reg = registry();
        let clash = Provider::new(
            "other",
            vec![
                OptionDef::new("fresh-option", Kind::Int),
                OptionDef::new("max-line-length", Kind::Int),
            ],
        )
        .unwrap();
        let err = reg.register(clash).unwrap_err();
        match err {
            OptbankError::DuplicateOption { name, owner } => {
                assert_eq!(name, "max-line-length");
                assert_eq!(owner, "core");
            }
            other => panic!("Expected DuplicateOption, got: {other:?}"),
        }
        assert!(reg.provider("other").is_none());
        assert!(reg.definition("fresh-option").is_none());
    }

    #[test]
    fn short_alias_clash_across_providers_rejected() {
        let mut reg = Registry::new("lint");
        let alpha = OptionDef::new("alpha", Kind::Int).short('x');
        let beta = OptionDef::new("beta", Kind::Int).short('x');
        reg.register(Provider::new("a", vec![alpha]).unwrap()).unwrap();
        let err = reg.register(Provider::new("b", vec![beta]).unwrap()).unwrap_err();
        match &err {
            OptbankError::DuplicateShort { short, first, second } => {
                assert_eq!(*short, 'x');
                assert_eq!(first, "alpha");
                assert_eq!(second, "beta");
            }
            other => panic!("Expected DuplicateShort, got: {other:?}"),
        }
        assert!(err.is_definition_error());
        assert!(reg.definition("beta").is_none());
        reg.apply_command_line(["-x", "1"]).unwrap();
        assert_eq!(reg.get_value("alpha"), Some(&Value::Int(1)));
    }

    #[test]
    fn short_alias_clash_within_provider_rejected() {
        let mut reg = Registry::new("lint");
        let defs = vec![
            OptionDef::new("alpha", Kind::Int).short('x'),
            OptionDef::new("beta", Kind::Int).short('x'),
        ];
        let err = reg.register(Provider::new("a", defs).unwrap()).unwrap_err();
        assert!(matches!(err, OptbankError::DuplicateShort { short: 'x', .. }));
        assert!(reg.provider("a").is_none());
    }

    #[test]
    fn short_h_is_reserved_for_help() {
        let mut reg = Registry::new("lint");
        let host = OptionDef::new("host", Kind::String).short('h');
        let err = reg.register(Provider::new("net", vec![host]).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            OptbankError::DuplicateShort { short: 'h', ref first, .. } if first == "help"
        ));
        let err = reg.apply_command_line(["-h"]).unwrap_err();
        assert!(matches!(err, OptbankError::DisplayHelp { level: 0, .. }));
    }

    /// Bare trait implementation, without `Provider::new`'s checks.
    struct Raw {
        definitions: Vec<OptionDef>,
        values: Values,
    }

    impl OptionsProvider for Raw {
        fn name(&self) -> &str {
            "raw"
        }

        fn definitions(&self) -> &[OptionDef] {
            &self.definitions
        }

        fn values(&self) -> &Values {
            &self.values
        }

        fn values_mut(&mut self) -> &mut Values {
            &mut self.values
        }
    }

    #[test]
    fn attr_collision_in_custom_provider_rejected() {
        let raw = Raw {
            definitions: vec![
                OptionDef::new("max-args", Kind::Int).default_value(1),
                OptionDef::new("max_args", Kind::Int).default_value(2),
            ],
            values: Values::new(),
        };
        let mut reg = Registry::new("lint");
        let err = reg.register(raw).unwrap_err();
        match err {
            OptbankError::AttrCollision { provider, first, second, attr } => {
                assert_eq!(provider, "raw");
                assert_eq!(first, "max-args");
                assert_eq!(second, "max_args");
                assert_eq!(attr, "max_args");
            }
            other => panic!("Expected AttrCollision, got: {other:?}"),
        }
        assert!(reg.provider("raw").is_none());
        assert!(reg.definition("max-args").is_none());
    }

    #[test]
    fn config_file_replaces_append_list() {
        let mut reg = registry();
        reg.apply_command_line(["--load-plugins", "stale"]).unwrap();
        let mut sections = ConfigSections::default();
        sections.insert("CORE", "load-plugins", "a, b,c");
        reg.apply_config_file(&sections).unwrap();
        assert_eq!(reg.get_value("load-plugins"), Some(&Value::list(["a", "b", "c"])));

        // Command line still accumulates on top of the file.
        reg.apply_command_line(["--load-plugins", "d"]).unwrap();
        assert_eq!(
            reg.get_value("load-plugins"),
            Some(&Value::list(["a", "b", "c", "d"]))
        );
    }

    #[test]
    fn own_group_binds_ungrouped_options_under_provider_name() {
        let reg = registry();
        let core = reg.groups().iter().find(|g| g.title == "CORE").unwrap();
        assert!(core.option_names().any(|n| n == "max-line-length"));
        assert_eq!(core.description.as_deref(), Some("Core settings."));
    }

    #[test]
    fn explicit_groups_merge_across_providers() {
        let reg = registry();
        let reports: Vec<&Group> = reg.groups().iter().filter(|g| g.title == "REPORTS").collect();
        assert_eq!(reports.len(), 1);
        let names: Vec<&str> = reports[0].option_names().collect();
        assert!(names.contains(&"output-format"));
        assert!(names.contains(&"score"));
    }

    #[test]
    fn without_own_group_options_go_top_level() {
        let mut reg = Registry::new("lint");
        reg.register_with(core_provider(), false).unwrap();
        assert!(reg.groups().iter().all(|g| g.title != "CORE"));
        let top: Vec<&str> = reg
            .top_level_entries()
            .iter()
            .map(|(d, _)| d.name.as_str())
            .collect();
        assert!(top.contains(&"max-line-length"));
        // Grouped options still land in their group.
        assert!(reg.groups().iter().any(|g| g.title == "REPORTS"));
    }

    #[test]
    fn max_level_tracks_definitions() {
        let reg = registry();
        assert_eq!(reg.max_level(), 2);
    }

    #[test]
    fn help_options_synthesized_per_level() {
        let mut reg = registry();
        reg.ensure_help_options().unwrap();
        reg.ensure_help_options().unwrap();
        let names: Vec<&str> = reg.help_options().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["help", "long-help", "long-long-help"]);
    }

    #[test]
    fn help_option_clash_is_reported() {
        let mut reg = Registry::new("lint");
        reg.register(Provider::new("x", vec![OptionDef::new("help", Kind::Flag)]).unwrap())
            .unwrap();
        let err = reg.apply_command_line(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, OptbankError::DuplicateOption { .. }));
    }

    #[test]
    fn get_value_routes_to_owner() {
        let reg = registry();
        assert_eq!(reg.get_value("max-line-length"), Some(&Value::Int(100)));
        assert_eq!(reg.get_value("max-args"), Some(&Value::Int(5)));
        assert_eq!(reg.get_value("nope"), None);
    }

    #[test]
    fn load_configuration_accepts_underscores() {
        let mut reg = registry();
        reg.load_configuration([("max_line_length", Value::Int(72))])
            .unwrap();
        assert_eq!(reg.get_value("max-line-length"), Some(&Value::Int(72)));
    }

    #[test]
    fn load_configuration_unknown_key_fails() {
        let mut reg = registry();
        let err = reg
            .load_configuration([("typo_option", Value::Int(1))])
            .unwrap_err();
        assert!(matches!(err, OptbankError::UnknownOption { name } if name == "typo-option"));
    }

    #[test]
    fn read_config_file_none_is_empty() {
        let mut reg = registry();
        let sections = reg.read_config_file(None).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn read_config_file_missing_path_fails() {
        let mut reg = registry();
        let err = reg
            .read_config_file(Some(Path::new("/definitely/not/here/lintrc")))
            .unwrap_err();
        assert!(matches!(err, OptbankError::MissingFile { .. }));
    }

    #[test]
    fn help_option_returns_display_help() {
        let mut reg = registry();
        let err = reg.apply_command_line(["--long-help"]).unwrap_err();
        match err {
            OptbankError::DisplayHelp { level, text } => {
                assert_eq!(level, 1);
                assert!(text.contains("--max-args"));
            }
            other => panic!("Expected DisplayHelp, got: {other:?}"),
        }
    }

    #[test]
    fn short_help_flag() {
        let mut reg = registry();
        let err = reg.apply_command_line(["-h"]).unwrap_err();
        assert!(matches!(err, OptbankError::DisplayHelp { level: 0, .. }));
    }

    #[test]
    fn add_help_section_raises_max_level() {
        let mut reg = Registry::new("lint");
        reg.add_help_section("environment", "Environment variables.", 3);
        assert_eq!(reg.max_level(), 3);
        assert_eq!(reg.groups()[0].title, "ENVIRONMENT");
    }

    #[test]
    fn design_provider_registers_alongside_core() {
        let mut reg = Registry::new("lint");
        reg.register(core_provider()).unwrap();
        reg.register(design_provider()).unwrap();
        assert!(reg.provider("design").is_some());
    }
}
