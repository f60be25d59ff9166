//! The per-form submit lifecycle.
//!
//! ```text
//! Closed --open--> Open --begin_submit (valid)--> Submitting --succeed--> Closed
//!                   ^                                  |
//!                   +------------- fail ---------------+
//! ```

use super::{FieldKind, FieldSpec, FormSnapshot, RuleSet, ValidationErrors};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Phase {
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, Clone)]
pub struct FormModal {
    title: &'static str,
    fields: &'static [FieldSpec],
    rules: RuleSet,
    defaults: FormSnapshot,
    phase: Phase,
    values: FormSnapshot,
    focus: usize,
    field_errors: ValidationErrors,
    error: Option<String>,
}

impl FormModal {
    /// `defaults` seeds the values every time the modal opens.
    pub fn new(
        title: &'static str,
        fields: &'static [FieldSpec],
        rules: RuleSet,
        defaults: FormSnapshot,
    ) -> Self {
        Self {
            title,
            fields,
            rules,
            defaults,
            phase: Phase::Closed,
            values: FormSnapshot::new(),
            focus: 0,
            field_errors: ValidationErrors::default(),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Open or submitting.
    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn open(&mut self) {
        self.open_with(FormSnapshot::new());
    }

    /// Opens with the defaults overlaid by `prefill`. Reopening discards earlier input.
    pub fn open_with(&mut self, prefill: FormSnapshot) {
        let mut values = self.defaults.clone();
        for (field, value) in prefill.iter() {
            values.set(field, value);
        }
        self.values = values;
        self.focus = 0;
        self.field_errors = ValidationErrors::default();
        self.error = None;
        self.phase = Phase::Open;
    }

    /// Closes unless a submission is in flight. Returns whether the modal is now closed.
    pub fn close(&mut self) -> bool {
        if self.phase == Phase::Submitting {
            return false;
        }
        self.phase = Phase::Closed;
        true
    }

    pub fn values(&self) -> &FormSnapshot {
        &self.values
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    /// The server or transport error of the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn visible_fields(&self) -> Vec<&'static FieldSpec> {
        self.fields
            .iter()
            .filter(|f| self.rules.is_visible(f.name, &self.values))
            .collect()
    }

    pub fn focused_field(&self) -> Option<&'static FieldSpec> {
        let visible = self.visible_fields();
        visible.get(self.focus.min(visible.len().saturating_sub(1))).copied()
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focus_next(&mut self) {
        let count = self.visible_fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.visible_fields().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    fn editable(&self) -> Option<&'static FieldSpec> {
        if self.phase != Phase::Open {
            return None;
        }
        self.focused_field()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        if self.phase == Phase::Open {
            self.values.set(field, value);
        }
    }

    /// Types a character into the focused text, number or date field.
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.editable() else {
            return;
        };
        match field.kind {
            FieldKind::Text | FieldKind::Number | FieldKind::Date => {
                let mut value = self.values.get(field.name).to_string();
                value.push(c);
                self.values.set(field.name, value);
            }
            FieldKind::Toggle if c == ' ' => self.cycle(1),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.editable() else {
            return;
        };
        if matches!(field.kind, FieldKind::Text | FieldKind::Number | FieldKind::Date) {
            let mut value = self.values.get(field.name).to_string();
            value.pop();
            self.values.set(field.name, value);
        }
    }

    /// Steps a choice or toggle field forwards (`step > 0`) or backwards.
    pub fn cycle(&mut self, step: isize) {
        let Some(field) = self.editable() else {
            return;
        };
        match field.kind {
            FieldKind::Choice(options) if !options.is_empty() => {
                let len = options.len() as isize;
                let next = match options.iter().position(|o| *o == self.values.get(field.name)) {
                    Some(i) => (i as isize + step).rem_euclid(len),
                    None if step >= 0 => 0,
                    None => len - 1,
                };
                self.values.set(field.name, options[next as usize]);
            }
            FieldKind::Toggle => {
                let flipped = !self.values.is_true(field.name);
                self.values.set(field.name, flipped.to_string());
            }
            _ => {}
        }
    }

    /// Validates and, if valid, moves to `Submitting` and returns the visible values.
    ///
    /// Invalid input keeps the modal open with per-field messages. Nothing happens unless
    /// the modal is open.
    pub fn begin_submit(&mut self) -> Option<FormSnapshot> {
        if self.phase != Phase::Open {
            return None;
        }
        self.error = None;
        match self.rules.validate(&self.values) {
            Ok(()) => {
                self.field_errors = ValidationErrors::default();
                self.phase = Phase::Submitting;
                Some(self.rules.visible_only(&self.values))
            }
            Err(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }

    /// Payload construction failed after validation passed.
    pub fn reject(&mut self, errors: ValidationErrors) {
        if self.phase == Phase::Submitting {
            self.field_errors = errors;
            self.phase = Phase::Open;
        }
    }

    pub fn succeed(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Closed;
            self.values = FormSnapshot::new();
            self.error = None;
        }
    }

    /// The mutation was rejected: reopen for editing with `message` shown.
    pub fn fail(&mut self, message: String) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Open;
            self.error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Condition, FieldRule};

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("amount", "Amount", FieldKind::Number),
        FieldSpec::new("method", "Method", FieldKind::Choice(&["upi", "cash"])),
        FieldSpec::new("hasRef", "Has reference", FieldKind::Toggle),
        FieldSpec::new("ref", "Reference", FieldKind::Text),
    ];

    fn modal() -> FormModal {
        FormModal::new(
            "Pay",
            FIELDS,
            RuleSet::new(vec![
                FieldRule::new("amount").required("Amount is required"),
                FieldRule::new("ref")
                    .required("Reference is required")
                    .when(Condition::IsTrue("hasRef")),
            ]),
            FormSnapshot::new().with("method", "upi"),
        )
    }

    #[test]
    fn invalid_submit_stays_open_with_field_errors() {
        let mut modal = modal();
        modal.open();
        assert_eq!(modal.begin_submit(), None);
        assert_eq!(modal.phase(), Phase::Open);
        assert_eq!(modal.field_errors().get("amount"), Some("Amount is required"));
    }

    #[test]
    fn full_lifecycle_success() {
        let mut modal = modal();
        modal.open();
        modal.set("amount", "100");
        let values = modal.begin_submit().expect("valid form");
        assert_eq!(values.get("amount"), "100");
        assert_eq!(values.get("method"), "upi");
        assert!(modal.is_submitting());
        assert!(!modal.close(), "cannot close while submitting");

        modal.succeed();
        assert_eq!(modal.phase(), Phase::Closed);
    }

    #[test]
    fn failure_reopens_with_message_and_keeps_input() {
        let mut modal = modal();
        modal.open();
        modal.set("amount", "100");
        modal.begin_submit().unwrap();
        modal.fail("Payment amount exceeds due amount".to_string());

        assert_eq!(modal.phase(), Phase::Open);
        assert_eq!(modal.error(), Some("Payment amount exceeds due amount"));
        assert_eq!(modal.values().get("amount"), "100");

        // A retry clears the previous server error.
        modal.begin_submit().unwrap();
        assert_eq!(modal.error(), None);
    }

    #[test]
    fn toggle_reveals_conditional_field() {
        let mut modal = modal();
        modal.open();
        assert_eq!(modal.visible_fields().len(), 3);

        modal.focus_next();
        modal.focus_next();
        assert_eq!(modal.focused_field().unwrap().name, "hasRef");
        modal.input_char(' ');
        assert_eq!(modal.visible_fields().len(), 4);
        modal.set("amount", "1");
        assert_eq!(modal.begin_submit(), None);
        assert!(modal.field_errors().contains("ref"));
    }

    #[test]
    fn hidden_values_are_not_submitted() {
        let mut modal = modal();
        modal.open_with(FormSnapshot::new().with("ref", "stale").with("amount", "5"));
        let values = modal.begin_submit().unwrap();
        assert!(!values.contains("ref"));
    }

    #[test]
    fn typing_and_cycling() {
        let mut modal = modal();
        modal.open();
        modal.input_char('4');
        modal.input_char('2');
        modal.backspace();
        assert_eq!(modal.values().get("amount"), "4");

        modal.focus_next();
        modal.cycle(1);
        assert_eq!(modal.values().get("method"), "cash");
        modal.cycle(1);
        assert_eq!(modal.values().get("method"), "upi");
        modal.cycle(-1);
        assert_eq!(modal.values().get("method"), "cash");
    }

    #[test]
    fn closed_modal_ignores_input() {
        let mut modal = modal();
        modal.input_char('1');
        modal.set("amount", "9");
        assert_eq!(modal.begin_submit(), None);
        assert_eq!(modal.values().get("amount"), "");
    }
}
