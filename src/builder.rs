use std::path::{Path, PathBuf};

use crate::env::EnvSettings;
use crate::error::{OptbankError, Result};
use crate::file::{self, ReaderOptions};
use crate::ops::{self, ConfigResult};
use crate::provider::OptionsProvider;
use crate::registry::Registry;
use crate::resolve::{self, ResolveInput};
use crate::types::{ConfigAction, SearchPath};

/// Entry point for building an option registry.
pub struct Optbank;

impl Optbank {
    pub fn builder() -> OptbankBuilder {
        OptbankBuilder::new()
    }
}

/// Builder that registers providers, finds the configuration file, and
/// resolves every layer in one call.
///
/// - **Providers**: [`provider()`](Self::provider) and
///   [`provider_top_level()`](Self::provider_top_level).
/// - **Discovery**: [`search_paths()`](Self::search_paths) lists where to look;
///   `{APP}RC` in the environment names a file that wins over the search;
///   [`config_file()`](Self::config_file) skips discovery altogether.
/// - **Command line**: [`args()`](Self::args), applied last.
pub struct OptbankBuilder {
    app_name: Option<String>,
    providers: Vec<(Box<dyn OptionsProvider>, bool)>,
    help_sections: Vec<(String, String, u8)>,
    search_paths: Option<Vec<SearchPath>>,
    config_file: Option<PathBuf>,
    reader: Option<ReaderOptions>,
    env_vars: Option<Vec<(String, String)>>,
    env_enabled: bool,
    args: Vec<String>,
}

/// Outcome of [`OptbankBuilder::load`].
pub struct Resolved {
    pub registry: Registry,
    /// Command-line arguments that are not options.
    pub positionals: Vec<String>,
    /// The configuration file that was applied, if any.
    pub config_file: Option<PathBuf>,
}

impl OptbankBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            providers: Vec::new(),
            help_sections: Vec::new(),
            search_paths: None,
            config_file: None,
            reader: None,
            env_vars: None,
            env_enabled: true,
            args: Vec::new(),
        }
    }

    /// Set the application name. This derives sensible defaults:
    /// - config file names → `{app}rc`, `.{app}rc`, `pyproject.toml`
    ///   with a `[tool.{app}]` table
    /// - environment variables → `{APP}RC`, `{APP}HOME`
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Register a provider; its ungrouped options form a group named after
    /// it.
    pub fn provider<P: OptionsProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push((Box::new(provider), true));
        self
    }

    /// Register a provider whose ungrouped options are listed at top level.
    pub fn provider_top_level<P: OptionsProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push((Box::new(provider), false));
        self
    }

    /// Add a help-only section shown from `level` upwards.
    pub fn help_section(mut self, title: &str, description: &str, level: u8) -> Self {
        self.help_sections
            .push((title.to_string(), description.to_string(), level));
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has
    /// the highest priority. An empty list disables discovery.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Use this configuration file instead of searching for one.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the TOML namespace and section normalization.
    pub fn reader_options(mut self, reader: ReaderOptions) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Read `{APP}RC` from these pairs instead of the process environment.
    pub fn env_vars(mut self, vars: Vec<(String, String)>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Ignore the environment.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Command-line arguments, without the program name.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the effective app name, or error if not set.
    fn effective_app_name(&self) -> Result<&str> {
        self.app_name
            .as_deref()
            .ok_or(OptbankError::AppNameRequired)
    }

    /// Resolve the effective search paths: `/etc`, the platform config
    /// directory, home, then the working directory (highest).
    fn effective_search_paths(&self) -> Vec<SearchPath> {
        if let Some(paths) = &self.search_paths {
            return paths.clone();
        }
        vec![
            SearchPath::Path(PathBuf::from("/etc")),
            SearchPath::Platform,
            SearchPath::Home,
            SearchPath::Cwd,
        ]
    }

    fn effective_env(&self, app_name: &str) -> EnvSettings {
        if !self.env_enabled {
            return EnvSettings::default();
        }
        match &self.env_vars {
            Some(vars) => EnvSettings::from_vars(app_name, vars.iter().cloned()),
            None => EnvSettings::from_env(app_name),
        }
    }

    /// The configuration file `load` would use, if any.
    pub fn find_config_file(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.config_file {
            return Ok(Some(path.clone()));
        }
        let app_name = self.effective_app_name()?;
        let env = self.effective_env(app_name);
        let reader = self.effective_reader(app_name);
        Ok(file::find_config_file(
            app_name,
            &self.effective_search_paths(),
            env.rc_file.as_deref(),
            &reader,
        ))
    }

    fn effective_reader(&self, app_name: &str) -> ReaderOptions {
        self.reader
            .clone()
            .unwrap_or_else(|| ReaderOptions::for_app(app_name))
    }

    /// Register every provider, then apply defaults, the configuration file
    /// and the command line.
    pub fn load(self) -> Result<Resolved> {
        let config_file = self.find_config_file()?;
        let app_name = self.effective_app_name()?.to_string();
        let mut registry =
            Registry::new(&app_name).with_reader_options(self.effective_reader(&app_name));

        for (title, description, level) in &self.help_sections {
            registry.add_help_section(title, description, *level);
        }
        for (provider, own_group) in self.providers {
            registry.register_boxed(provider, own_group)?;
        }

        let sections = registry.read_config_file(config_file.as_deref())?;
        let positionals = resolve::resolve(
            &mut registry,
            ResolveInput {
                sections,
                argv: self.args,
            },
        )?;

        Ok(Resolved {
            registry,
            positionals,
            config_file,
        })
    }

    /// Load, then handle a `ConfigAction` (gen / get / list).
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult> {
        self.load()?.handle(action)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<()> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }
}

impl Resolved {
    /// Handle a `ConfigAction` against the resolved values.
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult> {
        match action {
            ConfigAction::List => Ok(ops::list_values(&self.registry)),
            ConfigAction::Get { key } => ops::get_value(&self.registry, key),
            ConfigAction::Gen { output } => {
                let text = ops::generate_string(&self.registry, &[]);
                match output {
                    Some(path) => {
                        write_file(path, &text)?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(text)),
                }
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| OptbankError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| OptbankError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}
