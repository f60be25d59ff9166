//! Credit dashboard REST client
//!
//! JSON over HTTP against the `/api` backend. Every request carries the CLI's User-Agent and
//! build timestamp, and the session token when one is configured.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::{HTTP_CONNECT_TIMEOUT, HTTP_REQUEST_TIMEOUT};
use crate::environment::Environment;
use crate::models::{
    CreateDueData, CreditAssessmentData, CreditAssessmentStatus, DashboardStats, Due, DueUpdate,
    LoginResponse, NewTransaction, PaymentReceipt, PaymentRequest, Retailer, Transaction,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("creditline/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        Ok(Self {
            client: ClientBuilder::new()
                .connect_timeout(HTTP_CONNECT_TIMEOUT)
                .timeout(HTTP_REQUEST_TIMEOUT)
                .build()?,
            environment,
            token: None,
        })
    }

    /// Attaches the session token sent as `Authorization: Token <token>`.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn due_endpoint(due_id: &str, suffix: &str) -> String {
        format!("dues/{}/{}", urlencoding::encode(due_id), suffix)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.build_url(endpoint);
        let builder = self
            .client
            .request(method, &url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP);

        match &self.token {
            Some(token) => builder.header("Authorization", format!("Token {}", token)),
            None => builder,
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        if response_bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::EmptyResponse);
        }
        serde_json::from_slice(&response_bytes).map_err(ApiError::Decode)
    }

    async fn send_no_response(builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        Self::handle_response_status(response).await?;
        Ok(())
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        Self::send_json(self.request(Method::GET, endpoint)).await
    }

    async fn post_request<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::send_json(self.request(Method::POST, endpoint).json(body)).await
    }

    async fn post_request_no_response<B>(&self, endpoint: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        Self::send_no_response(self.request(Method::POST, endpoint).json(body)).await
    }

    async fn put_request<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::send_json(self.request(Method::PUT, endpoint).json(body)).await
    }

    async fn delete_request(&self, endpoint: &str) -> Result<(), ApiError> {
        Self::send_no_response(self.request(Method::DELETE, endpoint)).await
    }

    async fn transaction_form(data: &NewTransaction) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in data.text_fields() {
            form = form.text(name, value);
        }

        if let Some(path) = &data.invoice_file {
            let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "invoice".to_string());
            form = form.part("invoiceFile", Part::bytes(bytes).file_name(file_name));
        }

        Ok(form)
    }
}

#[async_trait::async_trait]
impl DashboardApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        self.post_request("auth/login/", &body).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post_request_no_response("auth/logout/", &json!({}))
            .await
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_request("dashboard/stats/").await
    }

    async fn list_dues(&self) -> Result<Vec<Due>, ApiError> {
        self.get_request("dues/").await
    }

    async fn create_due(&self, data: &CreateDueData) -> Result<Due, ApiError> {
        self.post_request("dues/create/", data).await
    }

    async fn pay_due(
        &self,
        due_id: &str,
        payment: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError> {
        self.post_request(&Self::due_endpoint(due_id, "pay/"), payment)
            .await
    }

    async fn get_due(&self, due_id: &str) -> Result<Due, ApiError> {
        self.get_request(&Self::due_endpoint(due_id, "")).await
    }

    async fn update_due(&self, due_id: &str, update: &DueUpdate) -> Result<Due, ApiError> {
        self.put_request(&Self::due_endpoint(due_id, ""), update)
            .await
    }

    async fn delete_due(&self, due_id: &str) -> Result<(), ApiError> {
        self.delete_request(&Self::due_endpoint(due_id, "")).await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_request("transactions/").await
    }

    async fn transaction_history(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_request("transactions/history/").await
    }

    async fn create_transaction(&self, data: &NewTransaction) -> Result<Transaction, ApiError> {
        let form = Self::transaction_form(data).await?;
        Self::send_json(self.request(Method::POST, "transactions/").multipart(form)).await
    }

    async fn list_retailers(&self) -> Result<Vec<Retailer>, ApiError> {
        self.get_request("retailers/").await
    }

    async fn search_retailers(&self, query: &str) -> Result<Vec<Retailer>, ApiError> {
        let endpoint = format!("retailers/search/?q={}", urlencoding::encode(query));
        self.get_request(&endpoint).await
    }

    async fn request_credit_assessment(
        &self,
        data: &CreditAssessmentData,
    ) -> Result<(), ApiError> {
        self.post_request_no_response("credit-assessment/request/", data)
            .await
    }

    async fn credit_assessment_status(&self) -> Result<CreditAssessmentStatus, ApiError> {
        self.get_request("credit-assessment/status/").await
    }
}
