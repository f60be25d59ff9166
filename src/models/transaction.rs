use super::party::PartyRef;
use super::wire;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Status shared by transactions and payments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub supplier: PartyRef,
    pub retailer: PartyRef,
    #[serde(deserialize_with = "wire::amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub retailer_name: Option<String>,
}

impl Transaction {
    /// Name of the counterparty as seen by `viewer_is_supplier`.
    pub fn counterparty_name(&self, viewer_is_supplier: bool) -> &str {
        if viewer_is_supplier {
            self.retailer
                .business_name()
                .or(self.retailer_name.as_deref())
                .unwrap_or_else(|| self.retailer.id())
        } else {
            self.supplier
                .business_name()
                .or(self.supplier_name.as_deref())
                .unwrap_or_else(|| self.supplier.id())
        }
    }

    /// Calendar date part of `created_at`, if it has one.
    pub fn created_on(&self) -> Option<&str> {
        self.created_at.as_deref().and_then(|ts| ts.get(0..10))
    }
}

/// Fields of the multipart `POST /transactions/` upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub retailer_id: String,
    pub amount: f64,
    pub description: String,
    pub invoice_number: Option<String>,
    pub due_date: NaiveDate,
    pub invoice_file: Option<PathBuf>,
}

impl NewTransaction {
    /// Text parts of the form, in the field names the backend expects.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("retailerId", self.retailer_id.clone()),
            ("amount", self.amount.to_string()),
            ("description", self.description.clone()),
        ];
        if let Some(invoice_number) = &self.invoice_number {
            fields.push(("invoiceNumber", invoice_number.clone()));
        }
        fields.push((
            "dueDate",
            self.due_date.format("%Y-%m-%dT00:00:00.000Z").to_string(),
        ));
        fields
    }
}
