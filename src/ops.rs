//! Config operations: file generation, key lookup, listing, and result types.
//!
//! Provides the logic behind `--generate-rcfile`-style output and
//! `config get` / `config list` inspection, plus the `ConfigResult` enum that
//! callers use to display results.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{OptbankError, Result};
use crate::option::OptionDef;
use crate::registry::Registry;
use crate::value::Value;

const COMMENT_WIDTH: usize = 79;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A generated configuration file.
    Template(String),
    /// Confirmation that a configuration file was written.
    TemplateWritten { path: PathBuf },
    /// An option's current value and its help text.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// Every option with its current value.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                write!(f, "Configuration written to {}", path.display())
            }
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Whether an option is written to generated files. Options that take no
/// value, run a callback, or are deprecated are left out.
fn is_persistable(def: &OptionDef) -> bool {
    !def.deprecated && !def.action.is_callback() && def.takes_value()
}

/// Write the registry's current values as an INI configuration file.
///
/// Sections follow provider priority; within a provider, ungrouped options
/// go under the provider's name and grouped options under their group.
/// Sections of the same title are merged and their options sorted by name.
/// Options without a value are written commented out.
pub fn generate<W: Write>(
    registry: &Registry,
    out: &mut W,
    skip_groups: &[&str],
) -> io::Result<()> {
    let skip: Vec<String> = skip_groups.iter().map(|g| g.to_uppercase()).collect();
    let mut sections: Vec<(String, Vec<(&OptionDef, Option<&Value>)>)> = Vec::new();

    for provider in registry.providers() {
        for (group, options) in provider.options_by_section() {
            let title = group.unwrap_or_else(|| provider.name().to_uppercase());
            if title == "DEFAULT" || skip.contains(&title) {
                continue;
            }
            let options: Vec<_> = options.into_iter().filter(|(d, _)| is_persistable(d)).collect();
            match sections.iter_mut().find(|(t, _)| *t == title) {
                Some((_, existing)) => existing.extend(options),
                None => sections.push((title, options)),
            }
        }
    }

    let mut first = true;
    for (title, mut options) in sections {
        if options.is_empty() {
            continue;
        }
        options.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
        if !first {
            writeln!(out)?;
        }
        first = false;
        writeln!(out, "[{title}]")?;
        for (def, value) in options {
            writeln!(out)?;
            for line in wrap(&def.help, COMMENT_WIDTH - 2) {
                writeln!(out, "# {line}")?;
            }
            match value {
                Some(v) => writeln!(out, "{} = {}", def.name, v.to_config_string(&def.kind))?,
                None => writeln!(out, "#{} =", def.name)?,
            }
        }
    }
    Ok(())
}

/// Generate the configuration file into a string.
pub fn generate_string(registry: &Registry, skip_groups: &[&str]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = generate(registry, &mut buf, skip_groups);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Look up one option's current value and help. Underscores in `key` are
/// accepted in place of hyphens.
pub fn get_value(registry: &Registry, key: &str) -> Result<ConfigResult> {
    let name = key.replace('_', "-");
    let def = registry
        .definition(&name)
        .ok_or_else(|| OptbankError::UnknownOption { name: name.clone() })?;
    let value = display(def, registry.get_value(&name));
    let doc = if def.help.is_empty() {
        Vec::new()
    } else {
        wrap(&def.help, COMMENT_WIDTH - 2)
    };
    Ok(ConfigResult::KeyValue {
        key: name,
        value,
        doc,
    })
}

/// Every non-deprecated option with its current value, providers in
/// priority order.
pub fn list_values(registry: &Registry) -> ConfigResult {
    let entries = registry
        .providers()
        .flat_map(|p| p.options_and_values())
        .filter(|(def, _)| !def.deprecated)
        .map(|(def, value)| (def.name.clone(), display(def, value)))
        .collect();
    ConfigResult::Listing { entries }
}

fn display(def: &OptionDef, value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_config_string(&def.kind),
        None => "<not set>".to_string(),
    }
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{ReaderOptions, parse_ini};
    use crate::fixtures::test::registry;
    use std::path::Path;

    #[test]
    fn generate_writes_sections_in_priority_order() {
        let text = generate_string(&registry(), &[]);
        let core = text.find("[CORE]").unwrap();
        let reports = text.find("[REPORTS]").unwrap();
        let design = text.find("[DESIGN]").unwrap();
        assert!(core < reports);
        assert!(reports < design);
        assert_eq!(text.matches("[REPORTS]").count(), 1);
    }

    #[test]
    fn generate_contents() {
        let text = generate_string(&registry(), &[]);
        assert!(text.contains("max-line-length = 100\n"));
        assert!(text.contains("# Maximum number of characters on a single line.\n"));
        assert!(text.contains("output-format = text\n"));
        assert!(text.contains("score = yes\n"));
        assert!(text.contains("ignore = CVS\n"));
        assert!(text.contains("#load-plugins =\n"));
    }

    #[test]
    fn generate_skips_unpersistable_options() {
        let text = generate_string(&registry(), &[]);
        assert!(!text.contains("verbose"));
        assert!(!text.contains("debug-level"));
        assert!(!text.contains("init-hook"));
        assert!(!text.contains("old-style"));
    }

    #[test]
    fn generate_sorts_options_by_name() {
        let text = generate_string(&registry(), &[]);
        let ignore = text.find("ignore =").unwrap();
        let max = text.find("max-line-length =").unwrap();
        assert!(ignore < max);
    }

    #[test]
    fn generate_skip_groups() {
        let text = generate_string(&registry(), &["reports"]);
        assert!(!text.contains("[REPORTS]"));
        assert!(text.contains("[CORE]"));
    }

    #[test]
    fn generate_reflects_current_values() {
        let mut reg = registry();
        reg.set_option("max-args", Some(Value::Str("9".into())))
            .unwrap();
        let text = generate_string(&reg, &[]);
        assert!(text.contains("max-args = 9\n"));
    }

    #[test]
    fn generated_file_reads_back_to_same_values() {
        let mut source = registry();
        source
            .load_configuration([
                ("max-line-length", Value::Int(72)),
                ("score", Value::Bool(false)),
                ("ignore", Value::list(["build", "dist"])),
                ("output-format", Value::from("json")),
            ])
            .unwrap();
        source
            .apply_command_line(["--load-plugins", "a", "--load-plugins", "b"])
            .unwrap();
        let text = generate_string(&source, &[]);
        assert!(text.contains("load-plugins = a,b\n"));

        let opts = ReaderOptions::for_app("lint");
        let sections = parse_ini(&text, Path::new("lintrc"))
            .unwrap()
            .normalized(&opts.normalizer);
        let mut target = registry();
        target.apply_config_file(&sections).unwrap();

        let names = [
            "max-line-length",
            "score",
            "ignore",
            "output-format",
            "dummy-variables-rgx",
            "load-plugins",
        ];
        for name in names {
            assert_eq!(target.get_value(name), source.get_value(name), "{name}");
        }
    }

    #[test]
    fn get_value_with_doc() {
        let result = get_value(&registry(), "max_line_length").unwrap();
        match result {
            ConfigResult::KeyValue { key, value, doc } => {
                assert_eq!(key, "max-line-length");
                assert_eq!(value, "100");
                assert!(doc.join(" ").contains("characters"));
            }
            other => panic!("Expected KeyValue, got {other:?}"),
        }
    }

    #[test]
    fn get_value_unset() {
        let result = get_value(&registry(), "load-plugins").unwrap();
        assert!(matches!(result, ConfigResult::KeyValue { value, .. } if value == "<not set>"));
    }

    #[test]
    fn get_value_unknown() {
        let err = get_value(&registry(), "nope").unwrap_err();
        assert!(matches!(err, OptbankError::UnknownOption { .. }));
    }

    #[test]
    fn list_values_covers_every_provider() {
        let ConfigResult::Listing { entries } = list_values(&registry()) else {
            panic!("Expected Listing");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"max-line-length"));
        assert!(keys.contains(&"max-locals"));
        assert!(!keys.contains(&"old-style"));
        let verbose = entries.iter().find(|(k, _)| k == "verbose").unwrap();
        assert_eq!(verbose.1, "0");
    }

    #[test]
    fn listing_display_format() {
        let result = ConfigResult::Listing {
            entries: vec![
                ("jobs".into(), "4".into()),
                ("score".into(), "yes".into()),
            ],
        };
        assert_eq!(format!("{result}"), "jobs = 4\nscore = yes");
    }

    #[test]
    fn key_value_display_format() {
        let result = ConfigResult::KeyValue {
            key: "jobs".into(),
            value: "4".into(),
            doc: vec!["Worker count.".into()],
        };
        assert_eq!(format!("{result}"), "# Worker count.\njobs = 4");
    }

    #[test]
    fn wrap_splits_long_text() {
        let lines = wrap("aaa bbb ccc", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
        assert!(wrap("", 10).is_empty());
    }
}
