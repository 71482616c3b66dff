use std::path::PathBuf;

/// Settings taken from the environment: `{APP}HOME` (where persistent data
/// lives) and `{APP}RC` (an explicit configuration file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvSettings {
    pub home: Option<PathBuf>,
    pub rc_file: Option<PathBuf>,
}

impl EnvSettings {
    /// Read the settings for `app_name` from `vars`.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of
    /// `std::env::vars()`. Empty values count as unset.
    pub fn from_vars(app_name: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let prefix = env_prefix(app_name);
        let home_key = format!("{prefix}HOME");
        let rc_key = format!("{prefix}RC");
        let mut settings = EnvSettings::default();

        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            if key == home_key {
                settings.home = Some(PathBuf::from(value));
            } else if key == rc_key {
                settings.rc_file = Some(PathBuf::from(value));
            }
        }
        settings
    }

    pub fn from_env(app_name: &str) -> Self {
        Self::from_vars(app_name, std::env::vars())
    }

    /// Directory for persistent data: `{APP}HOME` if set, else `~/.{app}.d`,
    /// else `.{app}.d` in the current directory.
    pub fn data_dir(&self, app_name: &str) -> PathBuf {
        if let Some(home) = &self.home {
            return home.clone();
        }
        let dotdir = format!(".{app_name}.d");
        match directories::UserDirs::new() {
            Some(user) => user.home_dir().join(dotdir),
            None => PathBuf::from(dotdir),
        }
    }
}

/// `my-app` → `MY_APP`.
pub fn env_prefix(app_name: &str) -> String {
    app_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
