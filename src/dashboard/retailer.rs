//! The retailer page: dues to pay, recent transactions and the credit position.

use super::loader::{Fetch, Loader};
use super::page::{MutationCompletion, MutationKind, PageCore};
use super::view::{self, Utilization};
use crate::api::{DashboardApi, fallback};
use crate::auth::LoadContext;
use crate::forms::{FormModal, credit_assessment, payment};
use crate::models::{AssessmentState, CreditAssessmentStatus, CreditPoint, Due, Transaction};
use chrono::NaiveDate;
use futures::FutureExt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct RetailerCollections {
    pub dues: Vec<Due>,
    /// The most recent transactions only.
    pub history: Vec<Transaction>,
    pub assessment: CreditAssessmentStatus,
}

fn collections_fetch() -> Fetch<RetailerCollections> {
    Arc::new(|api: Arc<dyn DashboardApi>| {
        async move {
            let (dues, history, assessment) = futures::try_join!(
                api.list_dues(),
                api.transaction_history(),
                api.credit_assessment_status()
            )?;
            Ok(RetailerCollections {
                dues,
                history,
                assessment,
            })
        }
        .boxed()
    })
}

pub struct RetailerPage {
    core: PageCore<RetailerCollections>,
    /// Index into [`RetailerPage::outstanding_dues`].
    selected_due: usize,
    payment_form: FormModal,
    assessment_form: FormModal,
}

impl RetailerPage {
    pub fn new(ctx: LoadContext) -> Self {
        let collections = Loader::new("retailer dashboard", collections_fetch(), fallback::LOAD_DASHBOARD)
            .with_refresh_fallback(fallback::REFRESH_DASHBOARD);
        Self {
            core: PageCore::new(ctx, collections),
            selected_due: 0,
            payment_form: payment::modal(),
            assessment_form: credit_assessment::modal(),
        }
    }

    pub fn mount(&mut self) {
        self.core.mount();
    }

    pub fn refresh(&mut self) {
        self.core.refresh_all();
    }

    pub fn core(&self) -> &PageCore<RetailerCollections> {
        &self.core
    }

    pub fn dues(&self) -> &[Due] {
        self.core.collections().map(|c| c.dues.as_slice()).unwrap_or(&[])
    }

    pub fn history(&self) -> &[Transaction] {
        self.core
            .collections()
            .map(|c| c.history.as_slice())
            .unwrap_or(&[])
    }

    pub fn assessment(&self) -> Option<&CreditAssessmentStatus> {
        self.core.collections().map(|c| &c.assessment)
    }

    /// Dues that still need paying, in list order.
    pub fn outstanding_dues(&self) -> Vec<&Due> {
        self.dues().iter().filter(|d| d.is_outstanding()).collect()
    }

    pub fn selected_due_index(&self) -> usize {
        self.selected_due
    }

    pub fn selected_due(&self) -> Option<&Due> {
        self.outstanding_dues().get(self.selected_due).copied()
    }

    pub fn select_next_due(&mut self) {
        let len = self.outstanding_dues().len();
        if len > 0 {
            self.selected_due = (self.selected_due + 1) % len;
        }
    }

    pub fn select_prev_due(&mut self) {
        let len = self.outstanding_dues().len();
        if len > 0 {
            self.selected_due = (self.selected_due + len - 1) % len;
        }
    }

    pub fn payment_reminders(&self, today: NaiveDate) -> Vec<&Due> {
        view::payment_reminders(self.dues(), today)
    }

    pub fn credit_utilization(&self) -> Option<Utilization> {
        let stats = self.core.stats()?;
        view::credit_utilization(stats.credit_limit?, stats.available_credit.unwrap_or(0.0))
    }

    pub fn credit_history(&self) -> Vec<CreditPoint> {
        view::credit_history(self.history())
    }

    pub fn payment_modal(&self) -> &FormModal {
        &self.payment_form
    }

    pub fn payment_modal_mut(&mut self) -> &mut FormModal {
        &mut self.payment_form
    }

    pub fn assessment_modal(&self) -> &FormModal {
        &self.assessment_form
    }

    pub fn assessment_modal_mut(&mut self) -> &mut FormModal {
        &mut self.assessment_form
    }

    /// Opens the payment modal for the selected due. Returns `false` if nothing is outstanding.
    pub fn open_payment(&mut self) -> bool {
        let Some(due) = self.selected_due() else {
            return false;
        };
        let values = payment::prefill(due);
        self.payment_form.open_with(values);
        true
    }

    pub fn submit_payment(&mut self) -> bool {
        let Some(values) = self.payment_form.begin_submit() else {
            return false;
        };
        let (due_id, request) = match payment::build(&values) {
            Ok(built) => built,
            Err(errors) => {
                self.payment_form.reject(errors);
                return false;
            }
        };

        let api = self.core.api();
        let started = self.core.run_mutation(
            MutationKind::Payment,
            async move {
                let receipt = api.pay_due(&due_id, &request).await?;
                Ok(receipt.summary())
            }
            .boxed(),
        );
        if !started {
            self.payment_form.fail(MutationKind::Payment.fallback().to_string());
        }
        started
    }

    /// Opens the assessment form unless one is already under review.
    pub fn open_assessment(&mut self) -> bool {
        if self
            .assessment()
            .is_some_and(|a| a.status == AssessmentState::Pending)
        {
            return false;
        }
        self.assessment_form.open();
        true
    }

    pub fn submit_assessment(&mut self) -> bool {
        let Some(values) = self.assessment_form.begin_submit() else {
            return false;
        };
        let data = match credit_assessment::build(&values) {
            Ok(data) => data,
            Err(errors) => {
                self.assessment_form.reject(errors);
                return false;
            }
        };

        let api = self.core.api();
        let started = self.core.run_mutation(
            MutationKind::CreditAssessment,
            async move {
                api.request_credit_assessment(&data).await?;
                Ok("Credit assessment submitted".to_string())
            }
            .boxed(),
        );
        if !started {
            self.assessment_form
                .fail(MutationKind::CreditAssessment.fallback().to_string());
        }
        started
    }

    pub fn poll(&mut self) -> Vec<MutationCompletion> {
        let completions = self.core.poll();
        self.apply(&completions);
        completions
    }

    pub async fn settle(&mut self) -> Vec<MutationCompletion> {
        let completions = self.core.settle().await;
        self.apply(&completions);
        completions
    }

    fn apply(&mut self, completions: &[MutationCompletion]) {
        for completion in completions {
            let modal = match completion.kind {
                MutationKind::Payment => &mut self.payment_form,
                MutationKind::CreditAssessment => &mut self.assessment_form,
                _ => continue,
            };
            match &completion.result {
                Ok(_) => modal.succeed(),
                Err(message) => modal.fail(message.clone()),
            }
        }

        let outstanding = self.outstanding_dues().len();
        if self.selected_due >= outstanding {
            self.selected_due = outstanding.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{self, FakeApi};
    use crate::forms::Phase;
    use crate::models::{DueStatus, PaymentMethod};
    use crate::dashboard::view::CreditHealth;

    fn page(api: &Arc<FakeApi>) -> RetailerPage {
        RetailerPage::new(LoadContext::new(api.clone(), Some(fake::retailer_identity())))
    }

    fn fill_assessment(modal: &mut FormModal) {
        for (field, value) in [
            ("businessType", "retail_store"),
            ("yearsInBusiness", "4"),
            ("annualTurnover", "1200000"),
            ("employeeCount", "3"),
            ("bankAccountNumber", "123456789012"),
            ("ifscCode", "HDFC0001234"),
            ("bankName", "HDFC Bank"),
            ("bankBranch", "Andheri"),
        ] {
            modal.set(field, value);
        }
    }

    #[tokio::test]
    async fn mount_loads_dues_history_and_assessment() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert_eq!(page.dues().len(), 1);
        assert_eq!(page.history().len(), 1);
        assert_eq!(page.assessment().unwrap().status, AssessmentState::None);
        assert_eq!(api.calls("transaction_history"), 1);
        assert_eq!(api.calls("credit_assessment_status"), 1);
        assert_eq!(api.calls("list_transactions"), 0);
    }

    #[tokio::test]
    async fn only_outstanding_dues_are_payable() {
        let api = Arc::new(FakeApi::default());
        api.dues
            .lock()
            .unwrap()
            .insert(0, fake::due("5", DueStatus::Paid, 40.0));
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert_eq!(page.outstanding_dues().len(), 1);
        assert_eq!(page.selected_due().unwrap().id, "1");
    }

    #[tokio::test]
    async fn payment_success_closes_modal_and_refetches() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert!(page.open_payment());
        assert_eq!(page.payment_modal().values().get("amount"), "500.00");
        page.payment_modal_mut().set("payment_method", "cash");
        assert!(page.submit_payment());

        let completions = page.settle().await;
        assert_eq!(completions[0].result, Ok("Payment successful".to_string()));
        assert_eq!(page.payment_modal().phase(), Phase::Closed);
        assert_eq!(api.calls("list_dues"), 2);
        assert_eq!(api.calls("get_dashboard_stats"), 2);

        let payments = api.payments.lock().unwrap();
        assert_eq!(payments[0].0, "1");
        assert_eq!(payments[0].1.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn rejected_payment_shows_fallback_without_server_text() {
        let api = Arc::new(FakeApi::default());
        api.fail("pay_due", "");
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        page.open_payment();
        page.submit_payment();
        page.settle().await;
        assert_eq!(page.payment_modal().phase(), Phase::Open);
        assert_eq!(page.payment_modal().error(), Some(fallback::MAKE_PAYMENT));
        assert_eq!(page.core().banner(), Some(fallback::MAKE_PAYMENT));
    }

    #[tokio::test]
    async fn assessment_submission_and_pending_lock() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert!(page.open_assessment());
        fill_assessment(page.assessment_modal_mut());
        assert!(page.submit_assessment());
        page.settle().await;

        assert_eq!(page.assessment_modal().phase(), Phase::Closed);
        let sent = api.assessments.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].monthly_rent, None);
        assert_eq!(sent[0].loan_amount, None);

        assert_eq!(page.assessment().unwrap().status, AssessmentState::Pending);
        assert!(!page.open_assessment());
    }

    #[tokio::test]
    async fn rented_shop_needs_rent_before_sending() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        page.open_assessment();
        fill_assessment(page.assessment_modal_mut());
        page.assessment_modal_mut().set("shopOwnership", "rented");
        assert!(!page.submit_assessment());
        assert_eq!(
            page.assessment_modal().field_errors().get("monthlyRent"),
            Some("Monthly rent is required for rented shops")
        );
        assert_eq!(api.calls("request_credit_assessment"), 0);
    }

    #[tokio::test]
    async fn utilization_comes_from_stats() {
        let api = Arc::new(FakeApi::default());
        {
            let mut stats = api.stats.lock().unwrap();
            stats.credit_limit = Some(10000.0);
            stats.available_credit = Some(2000.0);
        }
        let mut page = page(&api);
        assert_eq!(page.credit_utilization(), None);
        page.mount();
        page.settle().await;

        let utilization = page.credit_utilization().unwrap();
        assert_eq!(utilization.label(), "80.0%");
        assert_eq!(utilization.health, CreditHealth::Critical);
        assert_eq!(page.credit_history().len(), 1);
    }
}
