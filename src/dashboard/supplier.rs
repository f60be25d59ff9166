//! The supplier page: dues raised against retailers, the retailer directory and transactions.

use super::loader::{Fetch, Loader};
use super::page::{MutationCompletion, MutationKind, PageCore};
use super::view::format_inr;
use crate::api::{DashboardApi, fallback};
use crate::auth::LoadContext;
use crate::forms::{FormModal, add_due};
use crate::models::{Due, DueStatus, DueUpdate, Retailer, Transaction};
use chrono::NaiveDate;
use futures::FutureExt;
use std::sync::Arc;

/// Everything the page fetches in one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierCollections {
    pub dues: Vec<Due>,
    pub retailers: Vec<Retailer>,
    pub transactions: Vec<Transaction>,
}

fn collections_fetch() -> Fetch<SupplierCollections> {
    Arc::new(|api: Arc<dyn DashboardApi>| {
        async move {
            let (dues, retailers, transactions) = futures::try_join!(
                api.list_dues(),
                api.list_retailers(),
                api.list_transactions()
            )?;
            Ok(SupplierCollections {
                dues,
                retailers,
                transactions,
            })
        }
        .boxed()
    })
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum SupplierTab {
    #[default]
    Overview,
    Retailers,
}

pub struct SupplierPage {
    core: PageCore<SupplierCollections>,
    tab: SupplierTab,
    selected_due: usize,
    selected_retailer: usize,
    retailer_query: String,
    add_due_form: FormModal,
}

impl SupplierPage {
    pub fn new(ctx: LoadContext) -> Self {
        let collections = Loader::new("supplier dashboard", collections_fetch(), fallback::LOAD_DASHBOARD)
            .with_refresh_fallback(fallback::REFRESH_DASHBOARD);
        Self {
            core: PageCore::new(ctx, collections),
            tab: SupplierTab::default(),
            selected_due: 0,
            selected_retailer: 0,
            retailer_query: String::new(),
            add_due_form: add_due::modal(),
        }
    }

    pub fn mount(&mut self) {
        self.core.mount();
    }

    pub fn refresh(&mut self) {
        self.core.refresh_all();
    }

    pub fn core(&self) -> &PageCore<SupplierCollections> {
        &self.core
    }

    pub fn tab(&self) -> SupplierTab {
        self.tab
    }

    pub fn next_tab(&mut self) {
        self.tab = match self.tab {
            SupplierTab::Overview => SupplierTab::Retailers,
            SupplierTab::Retailers => SupplierTab::Overview,
        };
    }

    pub fn dues(&self) -> &[Due] {
        self.core.collections().map(|c| c.dues.as_slice()).unwrap_or(&[])
    }

    pub fn retailers(&self) -> &[Retailer] {
        self.core
            .collections()
            .map(|c| c.retailers.as_slice())
            .unwrap_or(&[])
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.core
            .collections()
            .map(|c| c.transactions.as_slice())
            .unwrap_or(&[])
    }

    pub fn retailer_query(&self) -> &str {
        &self.retailer_query
    }

    /// Retailers whose business name contains the query, ignoring case.
    pub fn filtered_retailers(&self) -> Vec<&Retailer> {
        let query = self.retailer_query.trim().to_lowercase();
        self.retailers()
            .iter()
            .filter(|r| query.is_empty() || r.business_name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn push_query_char(&mut self, c: char) {
        self.retailer_query.push(c);
        self.selected_retailer = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.retailer_query.pop();
        self.selected_retailer = 0;
    }

    pub fn selected_due_index(&self) -> usize {
        self.selected_due
    }

    pub fn selected_due(&self) -> Option<&Due> {
        self.dues().get(self.selected_due)
    }

    pub fn select_next_due(&mut self) {
        let len = self.dues().len();
        if len > 0 {
            self.selected_due = (self.selected_due + 1) % len;
        }
    }

    pub fn select_prev_due(&mut self) {
        let len = self.dues().len();
        if len > 0 {
            self.selected_due = (self.selected_due + len - 1) % len;
        }
    }

    pub fn selected_retailer_index(&self) -> usize {
        self.selected_retailer
    }

    pub fn selected_retailer(&self) -> Option<&Retailer> {
        self.filtered_retailers().get(self.selected_retailer).copied()
    }

    pub fn select_next_retailer(&mut self) {
        let len = self.filtered_retailers().len();
        if len > 0 {
            self.selected_retailer = (self.selected_retailer + 1) % len;
        }
    }

    pub fn select_prev_retailer(&mut self) {
        let len = self.filtered_retailers().len();
        if len > 0 {
            self.selected_retailer = (self.selected_retailer + len - 1) % len;
        }
    }

    pub fn add_due_modal(&self) -> &FormModal {
        &self.add_due_form
    }

    pub fn add_due_modal_mut(&mut self) -> &mut FormModal {
        &mut self.add_due_form
    }

    /// Opens the add-due modal for the selected retailer. Returns `false` if none is selected.
    pub fn open_add_due(&mut self, today: NaiveDate) -> bool {
        let Some(retailer) = self.selected_retailer() else {
            return false;
        };
        let values = add_due::prefill(retailer, today);
        self.add_due_form.open_with(values);
        true
    }

    /// Validates the modal and sends the due. Returns whether a request was started.
    pub fn submit_add_due(&mut self) -> bool {
        let Some(values) = self.add_due_form.begin_submit() else {
            return false;
        };
        let data = match add_due::build(&values) {
            Ok(data) => data,
            Err(errors) => {
                self.add_due_form.reject(errors);
                return false;
            }
        };

        let retailer_name = values.get("retailer_name").to_string();
        let api = self.core.api();
        let started = self.core.run_mutation(
            MutationKind::AddDue,
            async move {
                let due = api.create_due(&data).await?;
                Ok(format!(
                    "Due of {} added for {}",
                    format_inr(due.amount),
                    if retailer_name.is_empty() {
                        due.retailer_display_name().to_string()
                    } else {
                        retailer_name
                    }
                ))
            }
            .boxed(),
        );
        if !started {
            self.add_due_form.fail(MutationKind::AddDue.fallback().to_string());
        }
        started
    }

    /// Sets the status of the selected due.
    pub fn update_selected_status(&mut self, status: DueStatus) -> bool {
        let Some(due_id) = self.selected_due().map(|d| d.id.clone()) else {
            return false;
        };
        let api = self.core.api();
        let update = DueUpdate {
            status: Some(status),
            ..DueUpdate::default()
        };
        self.core.run_mutation(
            MutationKind::UpdateDue,
            async move {
                let due = api.update_due(&due_id, &update).await?;
                Ok(format!("Due {} marked {}", due.id, due.status.label()))
            }
            .boxed(),
        )
    }

    pub fn delete_selected_due(&mut self) -> bool {
        let Some(due_id) = self.selected_due().map(|d| d.id.clone()) else {
            return false;
        };
        let api = self.core.api();
        self.core.run_mutation(
            MutationKind::DeleteDue,
            async move {
                api.delete_due(&due_id).await?;
                Ok(format!("Due {} deleted", due_id))
            }
            .boxed(),
        )
    }

    /// Applies finished requests. Call once per UI tick.
    pub fn poll(&mut self) -> Vec<MutationCompletion> {
        let completions = self.core.poll();
        self.apply(&completions);
        completions
    }

    /// Waits for every request in flight, including the refreshes that follow mutations.
    pub async fn settle(&mut self) -> Vec<MutationCompletion> {
        let completions = self.core.settle().await;
        self.apply(&completions);
        completions
    }

    fn apply(&mut self, completions: &[MutationCompletion]) {
        for completion in completions {
            if completion.kind == MutationKind::AddDue {
                match &completion.result {
                    Ok(_) => self.add_due_form.succeed(),
                    Err(message) => self.add_due_form.fail(message.clone()),
                }
            }
        }

        let dues = self.dues().len();
        if self.selected_due >= dues {
            self.selected_due = dues.saturating_sub(1);
        }
        let retailers = self.filtered_retailers().len();
        if self.selected_retailer >= retailers {
            self.selected_retailer = retailers.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{self, FakeApi};
    use crate::forms::Phase;

    fn page(api: &Arc<FakeApi>) -> SupplierPage {
        SupplierPage::new(LoadContext::new(api.clone(), Some(fake::supplier())))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn mount_fetches_all_lists_in_parallel() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert_eq!(page.dues().len(), 1);
        assert_eq!(page.retailers().len(), 1);
        assert_eq!(page.transactions().len(), 1);
        for op in ["list_dues", "list_retailers", "list_transactions", "get_dashboard_stats"] {
            assert_eq!(api.calls(op), 1, "{}", op);
        }
        assert!(page.core().initialized());
        assert_eq!(page.core().banner(), None);
    }

    #[tokio::test]
    async fn one_rejection_fails_the_whole_batch() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        api.dues
            .lock()
            .unwrap()
            .push(fake::due("2", DueStatus::Pending, 75.0));
        api.fail("list_transactions", "");
        page.refresh();
        page.settle().await;

        // The dues fetch succeeded, but nothing from the failed batch is applied.
        assert_eq!(page.dues().len(), 1);
        assert_eq!(page.core().banner(), Some(fallback::REFRESH_DASHBOARD));
    }

    #[tokio::test]
    async fn first_load_failure_shows_server_message() {
        let api = Arc::new(FakeApi::default());
        api.fail("list_retailers", "Invalid user type");
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert!(page.core().collections().is_none());
        assert!(!page.core().initialized());
        assert!(!page.core().spinner());
        assert_eq!(page.core().banner(), Some("Invalid user type"));
    }

    #[tokio::test]
    async fn add_due_success_closes_modal_and_refetches() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        assert!(page.open_add_due(today()));
        let modal = page.add_due_modal_mut();
        modal.set("amount", "1500");
        modal.set("description", "Rice, 10 bags");
        modal.set("due_date", "2024-03-31");
        assert!(page.submit_add_due());
        assert!(page.add_due_modal().is_submitting());

        let completions = page.settle().await;
        assert!(completions[0].result.is_ok());
        assert_eq!(page.add_due_modal().phase(), Phase::Closed);
        assert_eq!(api.calls("list_dues"), 2);
        assert_eq!(api.calls("get_dashboard_stats"), 2);
        assert_eq!(page.dues().len(), 2);

        let created = api.created_dues.lock().unwrap();
        assert_eq!(created[0].retailer, "7");
        assert_eq!(created[0].purchase_date, today());
    }

    #[tokio::test]
    async fn add_due_failure_keeps_modal_open_with_server_text() {
        let api = Arc::new(FakeApi::default());
        api.fail("create_due", "Retailer not found");
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        page.open_add_due(today());
        let modal = page.add_due_modal_mut();
        modal.set("amount", "10");
        modal.set("description", "Oil");
        modal.set("due_date", "2024-03-10");
        page.submit_add_due();
        page.settle().await;

        assert_eq!(page.add_due_modal().phase(), Phase::Open);
        assert_eq!(page.add_due_modal().error(), Some("Retailer not found"));
        assert_eq!(page.add_due_modal().values().get("amount"), "10");
        assert_eq!(api.calls("list_dues"), 1);
    }

    #[tokio::test]
    async fn refresh_clears_a_failed_mutation_banner() {
        let api = Arc::new(FakeApi::default());
        api.fail("create_due", "Retailer not found");
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        page.open_add_due(today());
        let modal = page.add_due_modal_mut();
        modal.set("amount", "10");
        modal.set("description", "Oil");
        modal.set("due_date", "2024-03-10");
        page.submit_add_due();
        page.settle().await;
        assert_eq!(page.core().banner(), Some("Retailer not found"));

        page.add_due_modal_mut().close();
        api.succeed("create_due");
        page.refresh();
        page.settle().await;
        assert_eq!(page.core().banner(), None);
        assert_eq!(api.calls("list_dues"), 2);
    }

    #[tokio::test]
    async fn invalid_add_due_never_reaches_the_server() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        page.open_add_due(today());
        assert!(!page.submit_add_due());
        assert!(page.add_due_modal().field_errors().contains("amount"));
        assert_eq!(api.calls("create_due"), 0);
    }

    #[tokio::test]
    async fn add_due_needs_a_selected_retailer() {
        let api = Arc::new(FakeApi::default());
        api.retailers.lock().unwrap().clear();
        let mut page = page(&api);
        page.mount();
        page.settle().await;
        assert!(!page.open_add_due(today()));
        assert!(!page.add_due_modal().is_open());
    }

    #[tokio::test]
    async fn delete_and_update_refresh_the_page() {
        let api = Arc::new(FakeApi::default());
        api.dues
            .lock()
            .unwrap()
            .push(fake::due("2", DueStatus::Overdue, 80.0));
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        page.select_next_due();
        assert_eq!(page.selected_due().unwrap().id, "2");
        assert!(page.update_selected_status(DueStatus::Paid));
        page.settle().await;
        assert_eq!(page.dues()[1].status, DueStatus::Paid);

        assert!(page.delete_selected_due());
        page.settle().await;
        assert_eq!(page.dues().len(), 1);
        assert_eq!(page.selected_due().unwrap().id, "1");
        assert_eq!(api.calls("list_dues"), 3);
    }

    #[tokio::test]
    async fn spinner_only_before_first_successful_load() {
        let api = Arc::new(FakeApi::gated());
        let mut page = page(&api);
        page.mount();
        assert!(page.core().spinner());

        api.open_gate();
        page.settle().await;
        assert!(!page.core().spinner());

        page.refresh();
        assert!(page.core().collections_loading());
        assert!(!page.core().spinner());
        page.settle().await;
    }

    #[tokio::test]
    async fn dropping_while_loading_is_harmless() {
        let api = Arc::new(FakeApi::gated());
        let mut page = page(&api);
        page.mount();
        drop(page);

        api.open_gate();
        for _ in 0..100 {
            if Arc::strong_count(&api) == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(Arc::strong_count(&api), 1);
        assert_eq!(api.calls("list_dues"), 1);
    }

    #[tokio::test]
    async fn anonymous_page_stays_empty() {
        let api = Arc::new(FakeApi::default());
        let mut page = SupplierPage::new(LoadContext::new(api.clone(), None));
        page.mount();
        page.settle().await;
        assert!(page.dues().is_empty());
        assert!(!page.delete_selected_due());
        assert_eq!(api.calls("list_dues"), 0);
    }

    #[tokio::test]
    async fn retailer_filter_ignores_case() {
        let api = Arc::new(FakeApi::default());
        api.retailers.lock().unwrap().extend([
            fake::retailer("8", "Gupta Stores"),
            fake::retailer("9", "Kiran Traders"),
        ]);
        let mut page = page(&api);
        page.mount();
        page.settle().await;

        for c in "KIR".chars() {
            page.push_query_char(c);
        }
        let names: Vec<&str> = page
            .filtered_retailers()
            .iter()
            .map(|r| r.business_name.as_str())
            .collect();
        assert_eq!(names, vec!["Sharma Kirana", "Kiran Traders"]);

        page.select_next_retailer();
        assert_eq!(page.selected_retailer().unwrap().id, "9");
        page.pop_query_char();
        assert_eq!(page.selected_retailer_index(), 0);
    }

    #[tokio::test]
    async fn tabs_alternate() {
        let api = Arc::new(FakeApi::default());
        let mut page = page(&api);
        assert_eq!(page.tab(), SupplierTab::Overview);
        page.next_tab();
        assert_eq!(page.tab().to_string(), "Retailers");
        page.next_tab();
        assert_eq!(page.tab(), SupplierTab::Overview);
    }
}
