//! Typed access to the credit dashboard REST API.

use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{
    CreateDueData, CreditAssessmentData, CreditAssessmentStatus, DashboardStats, Due, DueUpdate,
    LoginResponse, NewTransaction, PaymentReceipt, PaymentRequest, Retailer, Transaction,
};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Exchanges credentials for the user's identity and, if issued, a session token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Ends the server-side session.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Aggregates for the signed-in user's role.
    async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    /// Dues visible to the signed-in user, newest first.
    async fn list_dues(&self) -> Result<Vec<Due>, ApiError>;

    /// Raises a new due against a retailer. Suppliers only.
    async fn create_due(&self, data: &CreateDueData) -> Result<Due, ApiError>;

    /// Records a payment against a due. Retailers only.
    async fn pay_due(
        &self,
        due_id: &str,
        payment: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError>;

    async fn get_due(&self, due_id: &str) -> Result<Due, ApiError>;

    async fn update_due(&self, due_id: &str, update: &DueUpdate) -> Result<Due, ApiError>;

    async fn delete_due(&self, due_id: &str) -> Result<(), ApiError>;

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// The ten most recent transactions of the signed-in user.
    async fn transaction_history(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Uploads a transaction as a multipart form, with the invoice file if one is given.
    async fn create_transaction(&self, data: &NewTransaction) -> Result<Transaction, ApiError>;

    async fn list_retailers(&self) -> Result<Vec<Retailer>, ApiError>;

    async fn search_retailers(&self, query: &str) -> Result<Vec<Retailer>, ApiError>;

    async fn request_credit_assessment(&self, data: &CreditAssessmentData)
    -> Result<(), ApiError>;

    async fn credit_assessment_status(&self) -> Result<CreditAssessmentStatus, ApiError>;
}

/// Fallback messages shown when the server gives no `error` text.
pub mod fallback {
    pub const LOGIN: &str = "Failed to sign in";
    pub const LOGOUT: &str = "Failed to sign out";
    pub const LOAD_DASHBOARD: &str = "Failed to load dashboard data";
    pub const REFRESH_DASHBOARD: &str = "Failed to refresh dashboard data";
    pub const FETCH_DUES: &str = "Failed to fetch dues";
    pub const CREATE_DUE: &str = "Failed to create due entry";
    pub const MAKE_PAYMENT: &str = "Failed to make payment";
    pub const FETCH_DUE: &str = "Failed to fetch due details";
    pub const UPDATE_DUE: &str = "Failed to update due";
    pub const DELETE_DUE: &str = "Failed to delete due";
    pub const FETCH_TRANSACTIONS: &str = "Failed to fetch transactions";
    pub const CREATE_TRANSACTION: &str = "Failed to create transaction";
    pub const FETCH_RETAILERS: &str = "Failed to fetch retailers";
    pub const SUBMIT_ASSESSMENT: &str = "Failed to submit credit assessment";
    pub const ASSESSMENT_STATUS: &str = "Failed to get credit assessment status";
}
