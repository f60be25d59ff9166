use super::wire;
use serde::{Deserialize, Serialize};

/// Aggregates shown in the stats cards. Which fields are present depends on the role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    // Supplier view
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub total_outstanding: Option<f64>,
    #[serde(default)]
    pub active_retailers: Option<u64>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub monthly_sales: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub overdue_amount: Option<f64>,

    // Retailer view
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub total_due: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub due_today: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub credit_limit: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub available_credit: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<u32>,
}
