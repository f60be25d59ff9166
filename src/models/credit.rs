//! Credit assessment payloads and status.

use super::wire;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShopOwnership {
    Owned,
    Rented,
}

/// Body of `POST /credit-assessment/request/`.
///
/// Optional fields are only present when the form made them applicable: `monthly_rent` for
/// rented shops and the loan fields when `existing_loans` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAssessmentData {
    pub business_type: String,
    pub years_in_business: u32,
    pub annual_turnover: f64,
    pub employee_count: u32,
    pub shop_ownership: ShopOwnership,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub bank_branch: String,
    pub existing_loans: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_emi: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssessmentState {
    /// No assessment has been requested yet.
    None,
    Pending,
    Approved,
    Rejected,
}

/// Response of `GET /credit-assessment/status/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAssessmentStatus {
    pub status: AssessmentState,
    #[serde(default)]
    pub credit_score: Option<u32>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub credit_limit: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub assessment_date: Option<String>,
}

/// One sample of the credit-history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditPoint {
    pub date: String,
    pub amount: f64,
}
