//! # optbank demo application
//!
//! A sample linter front end that showcases how to integrate optbank into a
//! command-line tool. It checks nothing; it resolves its options and prints
//! them.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example optbank_demo -- src/
//! cargo run --example optbank_demo -- config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                | How to exercise it                                                   |
//! |------------------------|----------------------------------------------------------------------|
//! | Defaults               | `cargo run --example optbank_demo`                                   |
//! | Config file (cwd)      | Create `.demorc` with `[CHECKER]` / `max-line-length = 80`, then run |
//! | `pyproject.toml`       | Put the same under `[tool.demo.checker]`                             |
//! | Explicit file          | `DEMORC=/path/to/file cargo run --example optbank_demo`              |
//! | Command line wins      | `cargo run --example optbank_demo -- --max-line-length 120`          |
//! | Help levels            | `-- --help`, `-- --long-help`, `-- --long-long-help`                 |
//! | `config gen`           | `cargo run --example optbank_demo -- config gen`                     |
//! | `config get`           | `cargo run --example optbank_demo -- config get max_args`            |
//! | `config list`          | `cargo run --example optbank_demo -- config list`                    |
//! | Stats cache            | Each run counts itself in `$DEMOHOME` (default `~/.demo.d`)          |
//! | Logging                | `RUST_LOG=debug cargo run --example optbank_demo`                    |

mod providers;

use std::path::PathBuf;
use std::process::ExitCode;

use serde::{Deserialize, Serialize};

use optbank::{ConfigAction, Optbank, OptbankBuilder, OptbankError, Resolved, StatsCache};

const APP: &str = "demo";

#[derive(Serialize, Deserialize, Default)]
struct RunStats {
    runs: u64,
}

fn make_builder(args: Vec<String>) -> optbank::Result<OptbankBuilder> {
    Ok(Optbank::builder()
        .app_name(APP)
        .provider(providers::checker()?)
        .provider(providers::design()?)
        .help_section(
            "environment",
            "DEMORC names the config file to use. DEMOHOME is where run stats are kept.",
            1,
        )
        .args(args))
}

/// `config gen [FILE]`, `config get KEY` or `config list`.
fn parse_config_action(args: &[String]) -> Option<ConfigAction> {
    match args {
        [cmd] if cmd == "list" => Some(ConfigAction::List),
        [cmd] if cmd == "gen" => Some(ConfigAction::Gen { output: None }),
        [cmd, file] if cmd == "gen" => Some(ConfigAction::Gen {
            output: Some(PathBuf::from(file)),
        }),
        [cmd, key] if cmd == "get" => Some(ConfigAction::Get { key: key.clone() }),
        _ => None,
    }
}

fn echo(resolved: &Resolved) {
    let registry = &resolved.registry;
    match &resolved.config_file {
        Some(path) => println!("{:<16} {}", "config file", path.display()),
        None => println!("{:<16} <none>", "config file"),
    }
    for name in ["max-line-length", "output-format", "ignore", "load-plugins", "max-args"] {
        let value = registry
            .get_value(name)
            .map(ToString::to_string)
            .unwrap_or_else(|| "<not set>".to_string());
        println!("{name:<16} {value}");
    }
    if !resolved.positionals.is_empty() {
        println!("{:<16} {}", "targets", resolved.positionals.join(" "));
    }
}

fn run() -> optbank::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().is_some_and(|a| a == "config") {
        let Some(action) = parse_config_action(&args[1..]) else {
            eprintln!("usage: {APP} config gen [FILE] | get KEY | list");
            return Ok(());
        };
        return make_builder(Vec::new())?.handle_and_print(&action);
    }

    let resolved = make_builder(args)?.load()?;
    echo(&resolved);

    let cache = StatsCache::from_env(APP);
    let mut stats: RunStats = cache.load_json("demo").unwrap_or_default();
    stats.runs += 1;
    cache.save_json("demo", &stats);
    log::info!("run #{} (stats in {})", stats.runs, cache.dir().display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(OptbankError::DisplayHelp { text, .. }) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{APP}: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
