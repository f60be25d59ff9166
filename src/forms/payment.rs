//! Paying (part of) a due.

use super::{Check, FieldKind, FieldRule, FieldSpec, FormModal, FormSnapshot, RuleSet, ValidationErrors};
use crate::models::{Due, PaymentMethod, PaymentRequest};

pub const TITLE: &str = "Make Payment";

pub const PAYMENT_METHODS: &[&str] = &["upi", "bank_transfer", "cash", "cheque"];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("amount", "Amount (₹)", FieldKind::Number),
    FieldSpec::new("payment_method", "Payment Method", FieldKind::Choice(PAYMENT_METHODS)),
    FieldSpec::new("reference_id", "Reference ID (optional)", FieldKind::Text),
];

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new("due").required("Select a due to pay"),
        FieldRule::new("amount")
            .required("Amount is required")
            .min(0.01, "Amount must be at least 0.01"),
        FieldRule::new("payment_method")
            .required("Payment method is required")
            .check(Check::OneOf(PAYMENT_METHODS), "Select a valid payment method"),
    ])
}

pub fn modal() -> FormModal {
    FormModal::new(
        TITLE,
        FIELDS,
        rules(),
        FormSnapshot::new().with("payment_method", "upi"),
    )
}

/// Opens against `due` with its full amount suggested.
pub fn prefill(due: &Due) -> FormSnapshot {
    FormSnapshot::new()
        .with("due", due.id.clone())
        .with("amount", format!("{:.2}", due.amount))
}

/// The due id and the request body.
pub fn build(values: &FormSnapshot) -> Result<(String, PaymentRequest), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let amount = values.parse::<f64>("amount", &mut errors, "Amount must be a number");
    let method = PaymentMethod::parse(values.get("payment_method").trim());
    if method.is_none() {
        errors.insert("payment_method", "Select a valid payment method");
    }

    match (amount, method) {
        (Some(amount), Some(payment_method)) if errors.is_empty() => Ok((
            values.get("due").trim().to_string(),
            PaymentRequest {
                amount,
                payment_method,
                reference_id: values.optional("reference_id").map(str::to_owned),
            },
        )),
        _ => Err(errors),
    }
}
