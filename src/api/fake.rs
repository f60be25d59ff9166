//! In-memory [`DashboardApi`] for page-flow tests.
//!
//! Counts calls per operation, can be told to fail an operation with a server error, and can
//! hold every call at a gate until the test opens it.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{
    CreateDueData, CreditAssessmentData, CreditAssessmentStatus, DashboardStats, Due, DueStatus,
    DueUpdate, Identity, LoginResponse, NewTransaction, PartyRef, PaymentReceipt, PaymentRequest,
    Retailer, Role, Transaction, TransactionStatus,
};
use crate::models::credit::AssessmentState;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

pub struct FakeApi {
    environment: Environment,
    calls: Mutex<HashMap<&'static str, usize>>,
    failures: Mutex<HashMap<&'static str, String>>,
    gate: Option<watch::Sender<bool>>,
    pub stats: Mutex<DashboardStats>,
    pub dues: Mutex<Vec<Due>>,
    pub retailers: Mutex<Vec<Retailer>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub assessment: Mutex<CreditAssessmentStatus>,
    pub created_dues: Mutex<Vec<CreateDueData>>,
    pub payments: Mutex<Vec<(String, PaymentRequest)>>,
    pub assessments: Mutex<Vec<CreditAssessmentData>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            gate: None,
            stats: Mutex::new(DashboardStats::default()),
            dues: Mutex::new(vec![due("1", DueStatus::Pending, 500.0)]),
            retailers: Mutex::new(vec![retailer("7", "Sharma Kirana")]),
            transactions: Mutex::new(vec![transaction("11", 250.0)]),
            assessment: Mutex::new(CreditAssessmentStatus {
                status: AssessmentState::None,
                credit_score: None,
                credit_limit: None,
                message: Some("No credit assessment found".to_string()),
                assessment_date: None,
            }),
            created_dues: Mutex::new(Vec::new()),
            payments: Mutex::new(Vec::new()),
            assessments: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    /// A fake whose calls all wait until [`FakeApi::open_gate`] is called.
    pub fn gated() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            gate: Some(tx),
            ..Self::default()
        }
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.send_replace(true);
        }
    }

    /// Number of times `op` has been called.
    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    /// Makes `op` fail with a 400 carrying `message` as the server error.
    pub fn fail(&self, op: &'static str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, message.to_string());
    }

    pub fn succeed(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    async fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;
        if let Some(gate) = &self.gate {
            let mut rx = gate.subscribe();
            let _ = rx.wait_for(|open| *open).await;
        }
        let failure = self.failures.lock().unwrap().get(op).cloned();
        match failure {
            Some(message) => Err(ApiError::from_body(
                400,
                serde_json::json!({ "error": message }).to_string(),
            )),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl DashboardApi for FakeApi {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.enter("login").await?;
        Ok(LoginResponse {
            user: Identity {
                email: email.to_string(),
                ..supplier()
            },
            token: Some("fake-token".to_string()),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.enter("logout").await
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.enter("get_dashboard_stats").await?;
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn list_dues(&self) -> Result<Vec<Due>, ApiError> {
        self.enter("list_dues").await?;
        Ok(self.dues.lock().unwrap().clone())
    }

    async fn create_due(&self, data: &CreateDueData) -> Result<Due, ApiError> {
        self.enter("create_due").await?;
        self.created_dues.lock().unwrap().push(data.clone());
        let mut created = due("100", DueStatus::Pending, data.amount);
        created.retailer = PartyRef::Id(data.retailer.clone());
        created.description = data.description.clone();
        self.dues.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn pay_due(
        &self,
        due_id: &str,
        payment: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError> {
        self.enter("pay_due").await?;
        self.payments
            .lock()
            .unwrap()
            .push((due_id.to_string(), payment.clone()));
        Ok(PaymentReceipt::Acknowledged {
            message: "Payment successful".to_string(),
        })
    }

    async fn get_due(&self, due_id: &str) -> Result<Due, ApiError> {
        self.enter("get_due").await?;
        self.dues
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == due_id)
            .cloned()
            .ok_or_else(|| ApiError::from_body(404, r#"{"error": "Due not found"}"#.to_string()))
    }

    async fn update_due(&self, due_id: &str, update: &DueUpdate) -> Result<Due, ApiError> {
        self.enter("update_due").await?;
        let mut dues = self.dues.lock().unwrap();
        let due = dues
            .iter_mut()
            .find(|d| d.id == due_id)
            .ok_or_else(|| ApiError::from_body(404, r#"{"error": "Due not found"}"#.to_string()))?;
        if let Some(status) = update.status {
            due.status = status;
        }
        Ok(due.clone())
    }

    async fn delete_due(&self, due_id: &str) -> Result<(), ApiError> {
        self.enter("delete_due").await?;
        self.dues.lock().unwrap().retain(|d| d.id != due_id);
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.enter("list_transactions").await?;
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn transaction_history(&self) -> Result<Vec<Transaction>, ApiError> {
        self.enter("transaction_history").await?;
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn create_transaction(&self, data: &NewTransaction) -> Result<Transaction, ApiError> {
        self.enter("create_transaction").await?;
        Ok(transaction("200", data.amount))
    }

    async fn list_retailers(&self) -> Result<Vec<Retailer>, ApiError> {
        self.enter("list_retailers").await?;
        Ok(self.retailers.lock().unwrap().clone())
    }

    async fn search_retailers(&self, query: &str) -> Result<Vec<Retailer>, ApiError> {
        self.enter("search_retailers").await?;
        let query = query.to_lowercase();
        Ok(self
            .retailers
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.business_name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn request_credit_assessment(
        &self,
        data: &CreditAssessmentData,
    ) -> Result<(), ApiError> {
        self.enter("request_credit_assessment").await?;
        self.assessments.lock().unwrap().push(data.clone());
        self.assessment.lock().unwrap().status = AssessmentState::Pending;
        Ok(())
    }

    async fn credit_assessment_status(&self) -> Result<CreditAssessmentStatus, ApiError> {
        self.enter("credit_assessment_status").await?;
        Ok(self.assessment.lock().unwrap().clone())
    }
}

pub fn supplier() -> Identity {
    Identity {
        id: "1".to_string(),
        email: "owner@agro.example".to_string(),
        role: Role::Supplier,
        business_name: Some("Agro Wholesale".to_string()),
    }
}

pub fn retailer_identity() -> Identity {
    Identity {
        id: "7".to_string(),
        email: "shop@kirana.example".to_string(),
        role: Role::Retailer,
        business_name: Some("Sharma Kirana".to_string()),
    }
}

pub fn due(id: &str, status: DueStatus, amount: f64) -> Due {
    Due {
        id: id.to_string(),
        supplier: PartyRef::Id("1".to_string()),
        retailer: PartyRef::Id("7".to_string()),
        amount,
        description: format!("Invoice {}", id),
        purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        status,
        created_at: None,
        updated_at: None,
        supplier_name: Some("Agro Wholesale".to_string()),
        retailer_name: Some("Sharma Kirana".to_string()),
        retailer_phone: Some("9876543210".to_string()),
    }
}

pub fn retailer(id: &str, name: &str) -> Retailer {
    Retailer {
        id: id.to_string(),
        business_name: name.to_string(),
        phone: None,
    }
}

pub fn transaction(id: &str, amount: f64) -> Transaction {
    Transaction {
        id: id.to_string(),
        supplier: PartyRef::Id("1".to_string()),
        retailer: PartyRef::Id("7".to_string()),
        amount,
        description: "Stock".to_string(),
        status: TransactionStatus::Completed,
        created_at: Some("2024-03-05T09:00:00Z".to_string()),
        updated_at: None,
        due_date: None,
        invoice_number: None,
        supplier_name: Some("Agro Wholesale".to_string()),
        retailer_name: Some("Sharma Kirana".to_string()),
    }
}
