//! Value validators: turn raw input into typed [`Value`]s.
//!
//! One pure function per [`Kind`]. Raw input arrives as [`Value::Str`] (from a
//! config file or the command line); defaults and programmatic overrides may
//! already be typed, in which case a value of the right shape passes through
//! unchanged. Every failure is an [`OptbankError::InvalidValue`] naming the
//! option and the offending input.

use regex::Regex;

use crate::error::{OptbankError, Result};
use crate::option::Kind;
use crate::value::Value;

/// Validate `value` for option `name` according to `kind`.
pub fn validate(name: &str, kind: &Kind, value: Value) -> Result<Value> {
    match kind {
        Kind::String | Kind::Flag => Ok(value),
        Kind::NonEmptyString => non_empty_string(name, value),
        Kind::Bool => yn(name, value),
        Kind::Int => int(name, value),
        Kind::Float => float(name, value),
        Kind::Choice(choices) => choice(name, choices, value),
        Kind::MultipleChoice(choices) => multiple_choice(name, choices, value),
        Kind::Csv => csv(name, value),
        Kind::Regex => regexp(name, value),
        Kind::RegexCsv => regexp_csv(name, value),
    }
}

fn invalid(name: &str, value: &Value, reason: impl Into<String>) -> OptbankError {
    OptbankError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn non_empty_string(name: &str, value: Value) -> Result<Value> {
    match &value {
        Value::Str(s) if s.is_empty() => {
            Err(invalid(name, &value, "option cannot be an empty string"))
        }
        Value::Str(_) => Ok(value),
        _ => Err(invalid(name, &value, "expected a string")),
    }
}

fn yn(name: &str, value: Value) -> Result<Value> {
    match &value {
        Value::Bool(_) => Ok(value),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Ok(Value::Bool(true)),
            "n" | "no" | "false" => Ok(Value::Bool(false)),
            _ => Err(invalid(name, &value, "expected yes or no")),
        },
        _ => Err(invalid(name, &value, "expected yes or no")),
    }
}

fn int(name: &str, value: Value) -> Result<Value> {
    match &value {
        Value::Int(_) => Ok(value),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| invalid(name, &value, format!("expected an integer: {e}"))),
        _ => Err(invalid(name, &value, "expected an integer")),
    }
}

fn float(name: &str, value: Value) -> Result<Value> {
    match &value {
        Value::Float(_) => Ok(value),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| invalid(name, &value, format!("expected a number: {e}"))),
        _ => Err(invalid(name, &value, "expected a number")),
    }
}

fn choice(name: &str, choices: &[String], value: Value) -> Result<Value> {
    let Value::Str(s) = &value else {
        return Err(invalid(name, &value, "expected a string"));
    };
    if choices.iter().any(|c| c == s) {
        Ok(value)
    } else {
        Err(invalid(
            name,
            &value,
            format!("should be in {}", choices.join(", ")),
        ))
    }
}

fn multiple_choice(name: &str, choices: &[String], value: Value) -> Result<Value> {
    let items = csv(name, value)?;
    for item in items.as_list().unwrap_or_default() {
        if !item.as_str().is_some_and(|s| choices.iter().any(|c| c == s)) {
            return Err(invalid(
                name,
                item,
                format!("should be in {}", choices.join(", ")),
            ));
        }
    }
    Ok(items)
}

/// Split on commas, trim whitespace, drop empty entries.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn csv(name: &str, value: Value) -> Result<Value> {
    match value {
        Value::List(_) => Ok(value),
        Value::Str(s) => Ok(Value::list(split_csv(&s))),
        other => Err(invalid(name, &other, "expected a comma separated list")),
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| OptbankError::InvalidValue {
        name: name.to_string(),
        value: pattern.to_string(),
        reason: format!("invalid regular expression: {e}"),
    })
}

fn regexp(name: &str, value: Value) -> Result<Value> {
    match &value {
        Value::Regex(_) => Ok(value),
        Value::Str(s) => compile(name, s).map(Value::Regex),
        _ => Err(invalid(name, &value, "expected a regular expression")),
    }
}

fn regexp_csv(name: &str, value: Value) -> Result<Value> {
    let entries: Vec<Value> = match value {
        Value::Str(s) => split_csv(&s).into_iter().map(Value::Str).collect(),
        Value::List(items) => items.as_ref().clone(),
        other => return Err(invalid(name, &other, "expected a list of regular expressions")),
    };
    let compiled = entries
        .into_iter()
        .map(|entry| regexp(name, entry))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::from(compiled))
}
