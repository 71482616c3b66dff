//! Level-filtered help text.
//!
//! Level 0 is the short help shown by `--help`; every higher level adds the
//! options and sections declared at that level. Defaults are never printed
//! as declared: an option with a default shows its *current* value, so the
//! help reflects what the config file and earlier arguments already set.

use std::fmt::Write;

use crate::option::{Action, OptionDef};
use crate::registry::Registry;
use crate::value::Value;

const INDENT: &str = "  ";
const HELP_COLUMN: usize = 24;

/// Render help for `registry` at `level`.
pub fn render(registry: &Registry, level: u8) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Usage: {} [options]", registry.app_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "Options:");
    for def in registry.help_options() {
        write_option(&mut out, def, None, INDENT);
    }
    for (def, value) in registry.top_level_entries() {
        if is_visible(def, level) {
            write_option(&mut out, def, value, INDENT);
        }
    }

    for group in registry.groups() {
        if group.level > level {
            continue;
        }
        let entries: Vec<(&OptionDef, Option<&Value>)> = registry
            .group_entries(group)
            .into_iter()
            .filter(|(def, _)| is_visible(def, level))
            .collect();
        if entries.is_empty() && group.description.is_none() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{INDENT}{}:", title_case(&group.title));
        if let Some(description) = &group.description {
            let _ = writeln!(out, "{INDENT}{INDENT}{description}");
            let _ = writeln!(out);
        }
        let indent = format!("{INDENT}{INDENT}");
        for (def, value) in entries {
            write_option(&mut out, def, value, &indent);
        }
    }
    out
}

fn is_visible(def: &OptionDef, level: u8) -> bool {
    !def.deprecated && def.level <= level
}

/// `MESSAGES CONTROL` → `Messages control`.
fn title_case(title: &str) -> String {
    let lower = title.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn write_option(out: &mut String, def: &OptionDef, value: Option<&Value>, indent: &str) {
    let mut flags = format!("--{}", def.name);
    if def.takes_value() {
        let _ = write!(flags, "={}", def.display_metavar());
    }
    if let Some(short) = def.short {
        let _ = write!(flags, ", -{short}");
    }

    let mut help = def.help.clone();
    if shows_current(def) {
        let current = value
            .map(|v| v.to_config_string(&def.kind))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "none".to_string());
        if !help.is_empty() {
            help.push(' ');
        }
        let _ = write!(help, "[current: {current}]");
    }

    let lead = format!("{indent}{flags}");
    if help.is_empty() {
        let _ = writeln!(out, "{lead}");
    } else if lead.len() + 2 <= HELP_COLUMN {
        let _ = writeln!(out, "{lead:<width$}{help}", width = HELP_COLUMN);
    } else {
        let _ = writeln!(out, "{lead}");
        let _ = writeln!(out, "{:width$}{help}", "", width = HELP_COLUMN);
    }
}

fn shows_current(def: &OptionDef) -> bool {
    def.default.is_some()
        && !matches!(
            def.action,
            Action::ToggleTrue | Action::ToggleFalse | Action::Callback(_)
        )
}
