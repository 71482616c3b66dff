//! Option providers.
//!
//! A provider owns an ordered list of [`OptionDef`]s and the record of their
//! current values. The [`Registry`](crate::Registry) talks to providers only
//! through the [`OptionsProvider`] trait; [`Provider`] is the ready-made
//! implementation most callers use.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{OptbankError, Result};
use crate::option::{Action, Kind, OptionDef};
use crate::validate;
use crate::value::Value;

/// Current values keyed by attribute name (`max_line_length`).
pub type Values = HashMap<String, Value>;

/// Options grouped by their explicit group, as returned by
/// [`OptionsProvider::options_by_section`].
pub type Section<'a> = (Option<String>, Vec<(&'a OptionDef, Option<&'a Value>)>);

pub trait OptionsProvider {
    fn name(&self) -> &str;

    /// Providers with a higher priority come first; priorities are `<= 0`.
    fn priority(&self) -> i32 {
        -1
    }

    /// Help level of the group created for this provider.
    fn level(&self) -> u8 {
        0
    }

    fn doc(&self) -> Option<&str> {
        None
    }

    /// Named groups this provider contributes to, with their descriptions.
    fn option_groups(&self) -> &[(String, String)] {
        &[]
    }

    fn definitions(&self) -> &[OptionDef];

    fn values(&self) -> &Values;

    fn values_mut(&mut self) -> &mut Values;

    fn definition(&self, name: &str) -> Result<&OptionDef> {
        self.definitions()
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| OptbankError::UnknownOption {
                name: name.to_string(),
            })
    }

    fn get_value(&self, name: &str) -> Option<&Value> {
        let def = self.definition(name).ok()?;
        self.values().get(&def.attr_name())
    }

    /// Forget current values and seed every non-callback option with its
    /// default.
    fn load_defaults(&mut self) -> Result<()> {
        self.values_mut().clear();
        let defaults: Vec<(String, Option<Value>)> = self
            .definitions()
            .iter()
            .filter(|d| !d.action.is_callback())
            .map(|d| (d.name.clone(), d.default.clone()))
            .collect();
        for (name, default) in defaults {
            self.set_option(&name, default, None)?;
        }
        Ok(())
    }

    /// Validate `value` and apply it through `action` (the definition's own
    /// action when `None`).
    fn set_option(
        &mut self,
        name: &str,
        value: Option<Value>,
        action: Option<&Action>,
    ) -> Result<()> {
        let def = self.definition(name)?.clone();
        let action = action.unwrap_or(&def.action).clone();
        check_action(&def.name, &def.kind, &action)?;

        let value = match value {
            Some(v) if !action.is_valueless() => Some(validate::validate(&def.name, &def.kind, v)?),
            other => other,
        };

        let attr = def.attr_name();
        let values = self.values_mut();
        match action {
            Action::Store => match value {
                Some(v) => {
                    values.insert(attr, v);
                }
                None => {
                    values.remove(&attr);
                }
            },
            // Fixed sentinels, whatever the input.
            Action::ToggleTrue | Action::Count => {
                values.insert(attr, Value::Int(0));
            }
            Action::ToggleFalse => {
                values.insert(attr, Value::Int(1));
            }
            Action::Append => append(values, attr, value),
            Action::Callback(hook) => hook(&def.name, value.as_ref())?,
        }
        Ok(())
    }

    /// Options grouped by explicit group: ungrouped first, then groups in
    /// alphabetical order (uppercased).
    fn options_by_section(&self) -> Vec<Section<'_>> {
        let mut ungrouped = Vec::new();
        let mut sections: BTreeMap<String, Vec<(&OptionDef, Option<&Value>)>> = BTreeMap::new();
        for def in self.definitions() {
            let entry = (def, self.values().get(&def.attr_name()));
            match &def.group {
                None => ungrouped.push(entry),
                Some(g) => sections.entry(g.to_uppercase()).or_default().push(entry),
            }
        }
        let mut out = Vec::new();
        if !ungrouped.is_empty() {
            out.push((None, ungrouped));
        }
        out.extend(sections.into_iter().map(|(g, opts)| (Some(g), opts)));
        out
    }

    fn options_and_values(&self) -> Vec<(&OptionDef, Option<&Value>)> {
        self.definitions()
            .iter()
            .map(|d| (d, self.values().get(&d.attr_name())))
            .collect()
    }
}

/// Accumulate `value` into the list stored under `attr`.
fn append(values: &mut Values, attr: String, value: Option<Value>) {
    let Some(value) = value else {
        return;
    };
    match values.remove(&attr) {
        None => {
            let list = match value {
                Value::List(items) => Value::List(items),
                scalar => Value::from(vec![scalar]),
            };
            values.insert(attr, list);
        }
        Some(Value::List(mut items)) => {
            // Clones only if the list is still shared, e.g. with a default.
            Arc::make_mut(&mut items).push(value);
            values.insert(attr, Value::List(items));
        }
        Some(scalar) => {
            values.insert(attr, Value::from(vec![scalar, value]));
        }
    }
}

fn check_action(name: &str, kind: &Kind, action: &Action) -> Result<()> {
    if matches!(action, Action::Append) && *kind == Kind::Flag {
        return Err(OptbankError::UnsupportedAction {
            name: name.to_string(),
            action: action.name().to_string(),
        });
    }
    Ok(())
}

/// A provider built from a list of definitions.
#[derive(Debug, Clone)]
pub struct Provider {
    name: String,
    priority: i32,
    level: u8,
    doc: Option<String>,
    option_groups: Vec<(String, String)>,
    definitions: Vec<OptionDef>,
    values: Values,
}

impl Provider {
    /// Build a provider and seed its values from the definitions' defaults.
    ///
    /// Fails if two definitions share a name or an attribute name, if an
    /// action cannot apply to its kind, or if a default does not validate.
    pub fn new(name: &str, definitions: Vec<OptionDef>) -> Result<Self> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for def in &definitions {
            if let Some(first) = seen.insert(def.attr_name(), &def.name) {
                if first == def.name {
                    return Err(OptbankError::DuplicateOption {
                        name: def.name.clone(),
                        owner: name.to_string(),
                    });
                }
                return Err(OptbankError::AttrCollision {
                    provider: name.to_string(),
                    first: first.to_string(),
                    second: def.name.clone(),
                    attr: def.attr_name(),
                });
            }
            check_action(&def.name, &def.kind, &def.action)?;
        }

        let mut provider = Self {
            name: name.to_string(),
            priority: -1,
            level: 0,
            doc: None,
            option_groups: Vec::new(),
            definitions,
            values: Values::new(),
        };
        provider.load_defaults()?;
        Ok(provider)
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn with_group(mut self, title: &str, doc: &str) -> Self {
        self.option_groups.push((title.to_string(), doc.to_string()));
        self
    }
}

impl OptionsProvider for Provider {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn level(&self) -> u8 {
        self.level
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn option_groups(&self) -> &[(String, String)] {
        &self.option_groups
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
