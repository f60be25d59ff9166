//! Form modals: field descriptions, declarative validation and the submit lifecycle.
//!
//! A form is a list of [`FieldSpec`]s plus a [`RuleSet`]. The modal collects raw text per field
//! into a [`FormSnapshot`], validates it locally, and hands the visible fields to a form-specific
//! `build` function that produces the request payload.

pub mod add_due;
pub mod credit_assessment;
pub mod modal;
pub mod patterns;
pub mod payment;
pub mod rules;

pub use modal::{FormModal, Phase};
pub use rules::{Check, Condition, FieldRule, Pattern, RuleSet};

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// `YYYY-MM-DD`
    Date,
    /// One of a fixed set of wire values, cycled with the arrow keys.
    Choice(&'static [&'static str]),
    /// `"true"` or `"false"`, flipped with space.
    Toggle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// Raw field values as entered, keyed by field name. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.values.remove(field);
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// The trimmed value, or `None` when blank.
    pub fn optional(&self, field: &str) -> Option<&str> {
        let value = self.get(field).trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn is_true(&self, field: &str) -> bool {
        matches!(
            self.get(field).trim().to_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        )
    }

    /// Parses a field, recording `message` against it when the value does not parse.
    pub fn parse<T: FromStr>(
        &self,
        field: &str,
        errors: &mut ValidationErrors,
        message: &str,
    ) -> Option<T> {
        match self.get(field).trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.insert(field, message);
                None
            }
        }
    }

    /// Builds a snapshot from a flat JSON object. Numbers and booleans become their text form.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "Form data must be a JSON object".to_string())?;
        let mut snapshot = Self::new();
        for (key, value) in object {
            let text = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => return Err(format!("Unsupported value for {}: {}", key, other)),
            };
            snapshot.set(key, text);
        }
        Ok(snapshot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Field name to the first failing rule's message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
