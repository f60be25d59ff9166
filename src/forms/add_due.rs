//! Raising a due against a selected retailer.

use super::{Check, FieldKind, FieldRule, FieldSpec, FormModal, FormSnapshot, RuleSet, ValidationErrors};
use super::patterns::parse_date;
use crate::models::{CreateDueData, Retailer};
use chrono::NaiveDate;

pub const TITLE: &str = "Add New Due";

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("amount", "Amount (₹)", FieldKind::Number),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new("purchase_date", "Purchase Date", FieldKind::Date),
    FieldSpec::new("due_date", "Due Date", FieldKind::Date),
];

pub fn rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::new("retailer").required("Select a retailer first"),
        FieldRule::new("amount")
            .required("Amount is required")
            .min(0.01, "Amount must be at least 0.01"),
        FieldRule::new("description").required("Description is required"),
        FieldRule::new("purchase_date")
            .required("Purchase date is required")
            .check(Check::Date, "Use the YYYY-MM-DD format"),
        FieldRule::new("due_date")
            .required("Due date is required")
            .check(Check::Date, "Use the YYYY-MM-DD format")
            .check(
                Check::NotBefore("purchase_date"),
                "Due date cannot be before the purchase date",
            ),
    ])
}

pub fn modal() -> FormModal {
    FormModal::new(TITLE, FIELDS, rules(), FormSnapshot::new())
}

/// Values to open the modal with once a retailer has been picked.
pub fn prefill(retailer: &Retailer, today: NaiveDate) -> FormSnapshot {
    FormSnapshot::new()
        .with("retailer", retailer.id.clone())
        .with("retailer_name", retailer.business_name.clone())
        .with("purchase_date", today.format("%Y-%m-%d").to_string())
}

pub fn build(values: &FormSnapshot) -> Result<CreateDueData, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let amount = values.parse::<f64>("amount", &mut errors, "Amount must be a number");
    let purchase_date = parse_date(values.get("purchase_date").trim());
    if purchase_date.is_none() {
        errors.insert("purchase_date", "Use the YYYY-MM-DD format");
    }
    let due_date = parse_date(values.get("due_date").trim());
    if due_date.is_none() {
        errors.insert("due_date", "Use the YYYY-MM-DD format");
    }

    match (amount, purchase_date, due_date) {
        (Some(amount), Some(purchase_date), Some(due_date)) if errors.is_empty() => {
            Ok(CreateDueData {
                retailer: values.get("retailer").trim().to_string(),
                amount,
                description: values.get("description").trim().to_string(),
                purchase_date,
                due_date,
            })
        }
        _ => Err(errors),
    }
}
