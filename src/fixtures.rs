#[cfg(test)]
pub mod test {
    use crate::option::{Action, Kind, OptionDef};
    use crate::provider::Provider;
    use crate::registry::Registry;
    use crate::value::Value;

    /// General settings plus one option in the shared `reports` group.
    pub fn core_provider() -> Provider {
        let defs = vec![
            OptionDef::new("max-line-length", Kind::Int)
                .default_value(100)
                .help("Maximum number of characters on a single line."),
            OptionDef::new(
                "output-format",
                Kind::Choice(vec!["text".into(), "json".into(), "parseable".into()]),
            )
            .default_value("text")
            .group("reports")
            .short('f')
            .help("Format of the report."),
            OptionDef::new("verbose", Kind::Bool)
                .action(Action::ToggleTrue)
                .short('v')
                .help("Print more information."),
            OptionDef::new("no-color", Kind::Bool)
                .action(Action::ToggleFalse)
                .help("Disable colored output."),
            OptionDef::new("debug-level", Kind::Int)
                .action(Action::Count)
                .default_value(0)
                .help("Increase debug output."),
            OptionDef::new("init-hook", Kind::String)
                .action(Action::callback(|_, _| Ok(())))
                .help("Code run before anything else."),
            OptionDef::new("load-plugins", Kind::String)
                .action(Action::Append)
                .help("Plugins to load."),
            OptionDef::new("ignore", Kind::Csv)
                .default_value(Value::list(["CVS"]))
                .help("Files or directories to skip."),
            OptionDef::new("dummy-variables-rgx", Kind::Regex)
                .default_value(Value::Str("_.*".into()))
                .level(1)
                .help("Names matching this expression are unused on purpose."),
            OptionDef::new("old-style", Kind::Bool)
                .default_value(false)
                .deprecated()
                .help("Replaced by output-format."),
        ];
        Provider::new("core", defs)
            .unwrap()
            .with_doc("Core settings.")
            .with_group("reports", "Report output.")
    }

    /// Lower-priority provider with options at help levels 1 and 2.
    pub fn design_provider() -> Provider {
        let defs = vec![
            OptionDef::new("max-args", Kind::Int)
                .default_value(5)
                .level(1)
                .help("Maximum number of arguments for a function."),
            OptionDef::new("max-locals", Kind::Int)
                .default_value(15)
                .level(2)
                .help("Maximum number of local variables."),
            OptionDef::new("score", Kind::Bool)
                .default_value(true)
                .group("reports")
                .help("Print the evaluation score."),
        ];
        Provider::new("design", defs)
            .unwrap()
            .with_priority(-2)
            .with_doc("Design checks.")
    }

    /// A `lint` registry holding both providers, defaults loaded.
    pub fn registry() -> Registry {
        let mut reg = Registry::new("lint");
        reg.register(core_provider()).unwrap();
        reg.register(design_provider()).unwrap();
        reg
    }
}
