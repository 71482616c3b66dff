//! Core resolution pipeline: apply every layer to a registry in order.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Reset every provider to its defaults
//! 2. Dispatch the configuration file's sections (unknown keys skipped)
//! 3. Dispatch command-line options in argv order (highest priority)

use crate::error::Result;
use crate::file::ConfigSections;
use crate::registry::Registry;

/// All pre-loaded data needed to resolve a configuration. No I/O happens
/// here.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    /// Normalized sections of the configuration file, empty if there is none.
    pub sections: ConfigSections,
    /// Command-line arguments, without the program name.
    pub argv: Vec<String>,
}

/// Resolve `registry` from pre-loaded inputs and return the positional
/// arguments left on the command line.
///
/// A help option on the command line ends resolution with
/// [`OptbankError::DisplayHelp`](crate::OptbankError::DisplayHelp), after the
/// file has been applied so the help shows the file's values.
pub fn resolve(registry: &mut Registry, input: ResolveInput) -> Result<Vec<String>> {
    registry.load_defaults()?;

    if !input.sections.is_empty() {
        registry.apply_config_file(&input.sections)?;
    }

    let positionals = registry.apply_command_line(input.argv)?;
    log::debug!(
        "resolved configuration for '{}' ({} positional arguments)",
        registry.app_name(),
        positionals.len()
    );
    Ok(positionals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptbankError;
    use crate::fixtures::test::registry;
    use crate::value::Value;

    fn sections(entries: &[(&str, &str, &str)]) -> ConfigSections {
        let mut s = ConfigSections::default();
        for (section, key, value) in entries {
            s.insert(section, key, value);
        }
        s
    }

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn defaults_only() {
        let mut reg = registry();
        let positionals = resolve(&mut reg, ResolveInput::default()).unwrap();
        assert!(positionals.is_empty());
        assert_eq!(reg.get_value("max-line-length"), Some(&Value::Int(100)));
        assert_eq!(reg.get_value("verbose"), Some(&Value::Int(0)));
        assert_eq!(reg.get_value("no-color"), Some(&Value::Int(1)));
        assert_eq!(reg.get_value("ignore"), Some(&Value::list(["CVS"])));
    }

    #[test]
    fn file_overrides_default() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "max-line-length", "80")]),
            ..Default::default()
        };
        resolve(&mut reg, input).unwrap();
        assert_eq!(reg.get_value("max-line-length"), Some(&Value::Int(80)));
        assert_eq!(reg.get_value("max-args"), Some(&Value::Int(5)));
    }

    #[test]
    fn command_line_overrides_file() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "max-line-length", "80")]),
            argv: argv(&["--max-line-length", "120"]),
        };
        resolve(&mut reg, input).unwrap();
        assert_eq!(reg.get_value("max-line-length"), Some(&Value::Int(120)));
    }

    #[test]
    fn section_does_not_restrict_dispatch() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "max-args", "8")]),
            ..Default::default()
        };
        resolve(&mut reg, input).unwrap();
        assert_eq!(reg.get_value("max-args"), Some(&Value::Int(8)));
    }

    #[test]
    fn unknown_file_key_is_ignored() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "typo-option", "1"), ("CORE", "max-line-length", "90")]),
            ..Default::default()
        };
        resolve(&mut reg, input).unwrap();
        assert_eq!(reg.get_value("max-line-length"), Some(&Value::Int(90)));
    }

    #[test]
    fn invalid_file_value_fails() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "max-line-length", "wide")]),
            ..Default::default()
        };
        let err = resolve(&mut reg, input).unwrap_err();
        assert!(matches!(
            err,
            OptbankError::InvalidValue { name, .. } if name == "max-line-length"
        ));
    }

    #[test]
    fn unknown_command_line_option_fails() {
        let mut reg = registry();
        let input = ResolveInput {
            argv: argv(&["--typo-option"]),
            ..Default::default()
        };
        let err = resolve(&mut reg, input).unwrap_err();
        assert!(matches!(err, OptbankError::UnknownOption { .. }));
    }

    #[test]
    fn append_accumulates_across_layers() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "load-plugins", "from_file")]),
            argv: argv(&["--load-plugins", "one", "--load-plugins", "two"]),
        };
        resolve(&mut reg, input).unwrap();
        assert_eq!(
            reg.get_value("load-plugins"),
            Some(&Value::list(["from_file", "one", "two"]))
        );
    }

    #[test]
    fn resolving_twice_starts_from_defaults() {
        let mut reg = registry();
        let input = ResolveInput {
            argv: argv(&["--load-plugins", "one"]),
            ..Default::default()
        };
        resolve(&mut reg, input.clone()).unwrap();
        resolve(&mut reg, input).unwrap();
        assert_eq!(reg.get_value("load-plugins"), Some(&Value::list(["one"])));
    }

    #[test]
    fn help_shows_values_from_file() {
        let mut reg = registry();
        let input = ResolveInput {
            sections: sections(&[("CORE", "max-line-length", "77")]),
            argv: argv(&["--help"]),
        };
        match resolve(&mut reg, input).unwrap_err() {
            OptbankError::DisplayHelp { level, text } => {
                assert_eq!(level, 0);
                assert!(text.contains("[current: 77]"));
            }
            other => panic!("Expected DisplayHelp, got: {other:?}"),
        }
    }

    #[test]
    fn positionals_returned() {
        let mut reg = registry();
        let input = ResolveInput {
            argv: argv(&["-v", "src/", "tests/"]),
            ..Default::default()
        };
        let positionals = resolve(&mut reg, input).unwrap();
        assert_eq!(positionals, vec!["src/", "tests/"]);
    }
}
