//! Declarative field validation.
//!
//! Each [`FieldRule`] lists checks for one field, each with the message shown when it fails,
//! and may carry a [`Condition`] on sibling values. A field whose condition does not hold is
//! hidden: it is neither validated nor submitted.

use super::patterns::{is_valid_gstin, is_valid_ifsc, is_valid_pan, parse_date};
use super::{FormSnapshot, ValidationErrors};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pattern {
    Ifsc,
    Pan,
    Gstin,
}

impl Pattern {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Ifsc => is_valid_ifsc(value),
            Pattern::Pan => is_valid_pan(value),
            Pattern::Gstin => is_valid_gstin(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Required,
    /// Numeric and at least this value.
    Min(f64),
    Pattern(Pattern),
    /// `YYYY-MM-DD`
    Date,
    /// A date not earlier than the date in the named sibling field.
    NotBefore(&'static str),
    OneOf(&'static [&'static str]),
}

impl Check {
    /// Blank values only fail `Required`; every other check passes them.
    fn passes(&self, value: &str, snapshot: &FormSnapshot) -> bool {
        if value.is_empty() {
            return !matches!(self, Check::Required);
        }
        match self {
            Check::Required => true,
            Check::Min(min) => value.parse::<f64>().is_ok_and(|v| v.is_finite() && v >= *min),
            Check::Pattern(pattern) => pattern.matches(value),
            Check::Date => parse_date(value).is_some(),
            Check::NotBefore(other) => match (parse_date(value), parse_date(snapshot.get(other).trim())) {
                (Some(date), Some(earliest)) => date >= earliest,
                // Nothing to compare against; `Date` reports malformed values.
                _ => true,
            },
            Check::OneOf(options) => options.contains(&value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The sibling field holds exactly this value.
    Equals(&'static str, &'static str),
    /// The sibling toggle is on.
    IsTrue(&'static str),
}

impl Condition {
    pub fn holds(&self, snapshot: &FormSnapshot) -> bool {
        match self {
            Condition::Equals(field, expected) => snapshot.get(field).trim() == *expected,
            Condition::IsTrue(field) => snapshot.is_true(field),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    pub checks: Vec<(Check, String)>,
    pub when: Option<Condition>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
            when: None,
        }
    }

    pub fn check(mut self, check: Check, message: impl Into<String>) -> Self {
        self.checks.push((check, message.into()));
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.check(Check::Required, message)
    }

    pub fn min(self, min: f64, message: impl Into<String>) -> Self {
        self.check(Check::Min(min), message)
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    pub fn is_active(&self, snapshot: &FormSnapshot) -> bool {
        self.when.as_ref().is_none_or(|c| c.holds(snapshot))
    }

    /// The message of the first failing check, if any.
    pub fn first_failure(&self, snapshot: &FormSnapshot) -> Option<&str> {
        let value = snapshot.get(self.field).trim();
        self.checks
            .iter()
            .find(|(check, _)| !check.passes(value, snapshot))
            .map(|(_, message)| message.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Whether `field` is shown given the current values. Fields without rules always are.
    pub fn is_visible(&self, field: &str, snapshot: &FormSnapshot) -> bool {
        self.rules
            .iter()
            .filter(|r| r.field == field)
            .all(|r| r.is_active(snapshot))
    }

    pub fn validate(&self, snapshot: &FormSnapshot) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for rule in self.rules.iter().filter(|r| r.is_active(snapshot)) {
            if let Some(message) = rule.first_failure(snapshot) {
                errors.insert(rule.field, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy of `snapshot` without the fields that are currently hidden.
    pub fn visible_only(&self, snapshot: &FormSnapshot) -> FormSnapshot {
        let mut visible = snapshot.clone();
        for (field, _) in snapshot.iter() {
            if !self.is_visible(field, snapshot) {
                visible.remove(field);
            }
        }
        visible
    }
}
