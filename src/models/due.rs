//! Dues and the payments made against them.

use super::party::PartyRef;
use super::transaction::TransactionStatus;
use super::wire;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a due. Transitions are owned by the server.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DueStatus {
    Pending,
    Overdue,
    Paid,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Pending => "Pending",
            DueStatus::Overdue => "Overdue",
            DueStatus::Paid => "Paid",
        }
    }
}

/// An amount owed by a retailer to a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Due {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub supplier: PartyRef,
    pub retailer: PartyRef,
    #[serde(deserialize_with = "wire::amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub purchase_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: DueStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub retailer_name: Option<String>,
    #[serde(default)]
    pub retailer_phone: Option<String>,
}

impl Due {
    /// Display name of the retailer, whichever way the server sent it.
    pub fn retailer_display_name(&self) -> &str {
        self.retailer
            .business_name()
            .or(self.retailer_name.as_deref())
            .unwrap_or_else(|| self.retailer.id())
    }

    pub fn supplier_display_name(&self) -> &str {
        self.supplier
            .business_name()
            .or(self.supplier_name.as_deref())
            .unwrap_or_else(|| self.supplier.id())
    }

    pub fn retailer_contact(&self) -> Option<&str> {
        self.retailer.phone().or(self.retailer_phone.as_deref())
    }

    pub fn is_outstanding(&self) -> bool {
        self.status != DueStatus::Paid
    }

    /// Whole days past the due date as of `today`; zero when not yet due.
    pub fn days_past_due(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }
}

/// Body of `POST /dues/create/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDueData {
    pub retailer: String,
    pub amount: f64,
    pub description: String,
    pub purchase_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Partial body of `PUT /dues/{id}/`. Unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    BankTransfer,
    Cash,
    Cheque,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cash,
        PaymentMethod::Cheque,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.to_string() == value)
    }
}

/// Body of `POST /dues/{id}/pay/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

/// A settlement recorded against a due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(alias = "transaction", deserialize_with = "wire::id")]
    pub due: String,
    #[serde(deserialize_with = "wire::amount")]
    pub amount: f64,
    pub payment_method: String,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
    pub status: TransactionStatus,
}

/// Response of the pay endpoint: either the created payment or a bare acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentReceipt {
    Payment(Payment),
    Acknowledged { message: String },
}

impl PaymentReceipt {
    pub fn summary(&self) -> String {
        match self {
            PaymentReceipt::Payment(payment) => format!(
                "Payment {} of {:.2} is {}",
                payment.id, payment.amount, payment.status
            ),
            PaymentReceipt::Acknowledged { message } => message.clone(),
        }
    }
}
