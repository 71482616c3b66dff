//! Option providers for the optbank demo application.
//!
//! Two providers share one namespace: [`checker`] holds the general settings
//! and [`design`] the thresholds of a pretend design checker, registered at a
//! lower priority. Both contribute to the shared `reports` group.
//!
//! | Option              | Section     | Try it with                                 |
//! |---------------------|-------------|---------------------------------------------|
//! | `max-line-length`   | `[CHECKER]` | `--max-line-length 120`                     |
//! | `output-format`     | `[REPORTS]` | `-f json`                                   |
//! | `verbose`           | `[CHECKER]` | `-v`                                        |
//! | `load-plugins`      | `[CHECKER]` | `--load-plugins a --load-plugins b`         |
//! | `max-args`          | `[DESIGN]`  | `--max-args 3` (shown by `--long-help`)     |

use optbank::{Action, Kind, OptionDef, Provider, Result, Value};

pub fn checker() -> Result<Provider> {
    let defs = vec![
        OptionDef::new("max-line-length", Kind::Int)
            .default_value(100)
            .help("Maximum number of characters on a single line."),
        OptionDef::new(
            "output-format",
            Kind::Choice(vec!["text".into(), "json".into()]),
        )
        .default_value("text")
        .group("reports")
        .short('f')
        .help("Format of the report."),
        OptionDef::new("verbose", Kind::Bool)
            .action(Action::ToggleTrue)
            .short('v')
            .help("Print more information."),
        OptionDef::new("load-plugins", Kind::String)
            .action(Action::Append)
            .help("Plugin to load; may be repeated."),
        OptionDef::new("ignore", Kind::Csv)
            .default_value(Value::list(["CVS"]))
            .help("Files or directories to skip."),
        OptionDef::new("init-hook", Kind::String)
            .action(Action::callback(|name, value| {
                log::info!("{name} would run: {value:?}");
                Ok(())
            }))
            .help("Code to run before checking."),
    ];
    Ok(Provider::new("checker", defs)?
        .with_priority(0)
        .with_doc("General settings.")
        .with_group("reports", "Options related to output formatting."))
}

pub fn design() -> Result<Provider> {
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
    Ok(Provider::new("design", defs)?
        .with_priority(-2)
        .with_doc("Design checker thresholds."))
}
