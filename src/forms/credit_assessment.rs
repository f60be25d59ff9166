//! The credit assessment request form.

use super::{
    Check, Condition, FieldKind, FieldRule, FieldSpec, FormModal, FormSnapshot, Pattern, RuleSet,
    ValidationErrors,
};
use crate::models::{CreditAssessmentData, ShopOwnership};

pub const TITLE: &str = "Credit Assessment Form";

pub const BUSINESS_TYPES: &[&str] = &["retail_store", "wholesale", "manufacturing", "service"];
pub const SHOP_OWNERSHIP: &[&str] = &["owned", "rented"];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("businessType", "Business Type", FieldKind::Choice(BUSINESS_TYPES)),
    FieldSpec::new("yearsInBusiness", "Years in Business", FieldKind::Number),
    FieldSpec::new("annualTurnover", "Annual Turnover (₹)", FieldKind::Number),
    FieldSpec::new("employeeCount", "Number of Employees", FieldKind::Number),
    FieldSpec::new("shopOwnership", "Shop Ownership", FieldKind::Choice(SHOP_OWNERSHIP)),
    FieldSpec::new("monthlyRent", "Monthly Rent (₹)", FieldKind::Number),
    FieldSpec::new("gstNumber", "GST Number (optional)", FieldKind::Text),
    FieldSpec::new("panNumber", "PAN (optional)", FieldKind::Text),
    FieldSpec::new("bankAccountNumber", "Bank Account Number", FieldKind::Text),
    FieldSpec::new("ifscCode", "IFSC Code", FieldKind::Text),
    FieldSpec::new("bankName", "Bank Name", FieldKind::Text),
    FieldSpec::new("bankBranch", "Bank Branch", FieldKind::Text),
    FieldSpec::new("existingLoans", "Existing Loans", FieldKind::Toggle),
    FieldSpec::new("loanAmount", "Loan Amount (₹)", FieldKind::Number),
    FieldSpec::new("loanProvider", "Loan Provider", FieldKind::Text),
    FieldSpec::new("monthlyEmi", "Monthly EMI (₹)", FieldKind::Number),
];

pub fn rules() -> RuleSet {
    let with_loans = || Condition::IsTrue("existingLoans");
    RuleSet::new(vec![
        FieldRule::new("businessType")
            .required("Business type is required")
            .check(Check::OneOf(BUSINESS_TYPES), "Business type is required"),
        FieldRule::new("yearsInBusiness")
            .required("Years in business is required")
            .min(0.0, "Years must be 0 or greater"),
        FieldRule::new("annualTurnover")
            .required("Annual turnover is required")
            .min(0.0, "Turnover must be 0 or greater"),
        FieldRule::new("employeeCount")
            .required("Employee count is required")
            .min(1.0, "Must have at least 1 employee"),
        FieldRule::new("shopOwnership")
            .required("Shop ownership is required")
            .check(Check::OneOf(SHOP_OWNERSHIP), "Shop ownership is required"),
        FieldRule::new("monthlyRent")
            .required("Monthly rent is required for rented shops")
            .min(0.0, "Rent must be 0 or greater")
            .when(Condition::Equals("shopOwnership", "rented")),
        FieldRule::new("gstNumber")
            .check(Check::Pattern(Pattern::Gstin), "Invalid GST number format"),
        FieldRule::new("panNumber").check(Check::Pattern(Pattern::Pan), "Invalid PAN format"),
        FieldRule::new("bankAccountNumber").required("Bank account number is required"),
        FieldRule::new("ifscCode")
            .required("IFSC code is required")
            .check(Check::Pattern(Pattern::Ifsc), "Invalid IFSC code format"),
        FieldRule::new("bankName").required("Bank name is required"),
        FieldRule::new("bankBranch").required("Bank branch is required"),
        FieldRule::new("loanAmount")
            .required("Loan amount is required if you have existing loans")
            .min(0.0, "Loan amount must be 0 or greater")
            .when(with_loans()),
        FieldRule::new("loanProvider")
            .required("Loan provider is required if you have existing loans")
            .when(with_loans()),
        FieldRule::new("monthlyEmi")
            .required("Monthly EMI is required if you have existing loans")
            .min(0.0, "EMI must be 0 or greater")
            .when(with_loans()),
    ])
}

pub fn modal() -> FormModal {
    FormModal::new(
        TITLE,
        FIELDS,
        rules(),
        FormSnapshot::new()
            .with("shopOwnership", "owned")
            .with("existingLoans", "false"),
    )
}

/// Builds the request from validated, visible-only values.
pub fn build(values: &FormSnapshot) -> Result<CreditAssessmentData, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let years_in_business =
        values.parse::<u32>("yearsInBusiness", &mut errors, "Years must be a whole number");
    let annual_turnover =
        values.parse::<f64>("annualTurnover", &mut errors, "Turnover must be a number");
    let employee_count =
        values.parse::<u32>("employeeCount", &mut errors, "Employee count must be a whole number");

    let shop_ownership = match values.get("shopOwnership").trim() {
        "rented" => ShopOwnership::Rented,
        _ => ShopOwnership::Owned,
    };
    let monthly_rent = values
        .optional("monthlyRent")
        .and_then(|_| values.parse::<f64>("monthlyRent", &mut errors, "Rent must be a number"));

    let existing_loans = values.is_true("existingLoans");
    let loan_amount = values
        .optional("loanAmount")
        .and_then(|_| values.parse::<f64>("loanAmount", &mut errors, "Loan amount must be a number"));
    let monthly_emi = values
        .optional("monthlyEmi")
        .and_then(|_| values.parse::<f64>("monthlyEmi", &mut errors, "EMI must be a number"));

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CreditAssessmentData {
        business_type: values.get("businessType").trim().to_string(),
        years_in_business: years_in_business.unwrap_or_default(),
        annual_turnover: annual_turnover.unwrap_or_default(),
        employee_count: employee_count.unwrap_or_default(),
        shop_ownership,
        monthly_rent: monthly_rent.filter(|_| shop_ownership == ShopOwnership::Rented),
        gst_number: values.optional("gstNumber").map(str::to_owned),
        pan_number: values.optional("panNumber").map(str::to_owned),
        bank_account_number: values.get("bankAccountNumber").trim().to_string(),
        ifsc_code: values.get("ifscCode").trim().to_string(),
        bank_name: values.get("bankName").trim().to_string(),
        bank_branch: values.get("bankBranch").trim().to_string(),
        existing_loans,
        loan_amount: loan_amount.filter(|_| existing_loans),
        loan_provider: values
            .optional("loanProvider")
            .filter(|_| existing_loans)
            .map(str::to_owned),
        monthly_emi: monthly_emi.filter(|_| existing_loans),
    })
}
