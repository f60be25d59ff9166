//! A single remote resource: fetched on activation, re-fetched on refresh.

use super::channel::TaskChannel;
use super::log_api_error;
use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::auth::LoadContext;
use crate::error_classifier::ErrorClassifier;
use crate::logging::LogLevel;
use futures::future::BoxFuture;
use std::sync::Arc;

/// How to fetch the resource. Called once per request.
pub type Fetch<T> =
    Arc<dyn Fn(Arc<dyn DashboardApi>) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// What happened to one finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed { message: String, level: LogLevel },
    /// A newer request was issued meanwhile; this result was dropped.
    Stale,
}

/// Exposes `data`, `loading` and `error` for one resource.
///
/// Every request takes a ticket. Only the result of the newest ticket is applied, so a slow
/// earlier response never overwrites a later one, and `loading` stays set until the newest
/// request settles. A successful result replaces `data` wholesale; a failure keeps it.
pub struct Loader<T> {
    name: &'static str,
    fetch: Fetch<T>,
    fallback: &'static str,
    refresh_fallback: &'static str,
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    channel: TaskChannel<(u64, Result<T, ApiError>)>,
    classifier: ErrorClassifier,
}

impl<T: Send + 'static> Loader<T> {
    /// `fallback` is shown when a failure carries no server message.
    pub fn new(name: &'static str, fetch: Fetch<T>, fallback: &'static str) -> Self {
        Self {
            name,
            fetch,
            fallback,
            refresh_fallback: fallback,
            data: None,
            loading: false,
            error: None,
            issued: 0,
            channel: TaskChannel::new(name),
            classifier: ErrorClassifier::new(),
        }
    }

    /// Fallback used once the resource has loaded at least once.
    pub fn with_refresh_fallback(mut self, fallback: &'static str) -> Self {
        self.refresh_fallback = fallback;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> usize {
        self.channel.in_flight()
    }

    /// Starts the first fetch. Without an identity in `ctx` nothing happens.
    pub fn activate(&mut self, ctx: &LoadContext) -> Option<u64> {
        self.request(ctx)
    }

    /// Re-runs the fetch. Without an identity in `ctx` nothing happens.
    pub fn refresh(&mut self, ctx: &LoadContext) -> Option<u64> {
        self.request(ctx)
    }

    fn request(&mut self, ctx: &LoadContext) -> Option<u64> {
        if !ctx.is_authenticated() {
            log::debug!("{}: not signed in, skipping fetch", self.name);
            return None;
        }

        self.issued += 1;
        let ticket = self.issued;
        self.loading = true;
        self.error = None;

        let request = (self.fetch)(ctx.api().clone());
        self.channel.spawn(async move { (ticket, request.await) }, move || {
            (ticket, Err(ApiError::Interrupted))
        });
        log::debug!("{}: request #{} sent", self.name, ticket);
        Some(ticket)
    }

    /// Applies every result that has arrived, without waiting.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Some((ticket, result)) = self.channel.try_next() {
            outcomes.push(self.apply(ticket, result));
        }
        outcomes
    }

    /// Waits for every request in flight and applies the results.
    pub async fn settle(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Some((ticket, result)) = self.channel.next().await {
            outcomes.push(self.apply(ticket, result));
        }
        outcomes
    }

    fn apply(&mut self, ticket: u64, result: Result<T, ApiError>) -> LoadOutcome {
        if ticket != self.issued {
            log::debug!(
                "{}: dropping result of request #{}, #{} is newer",
                self.name,
                ticket,
                self.issued
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                let fallback = if self.data.is_some() {
                    self.refresh_fallback
                } else {
                    self.fallback
                };
                let message = e.display_message(fallback);
                let level = log_api_error(&self.classifier, self.name, &e);
                self.error = Some(message.clone());
                LoadOutcome::Failed { message, level }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{self, FakeApi};
    use crate::api::fallback;
    use crate::models::DashboardStats;
    use futures::FutureExt;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    fn stats_loader() -> Loader<DashboardStats> {
        Loader::new(
            "stats",
            Arc::new(|api: Arc<dyn DashboardApi>| {
                async move { api.get_dashboard_stats().await }.boxed()
            }),
            fallback::LOAD_DASHBOARD,
        )
        .with_refresh_fallback(fallback::REFRESH_DASHBOARD)
    }

    fn signed_in(api: Arc<FakeApi>) -> LoadContext {
        LoadContext::new(api, Some(fake::supplier()))
    }

    #[tokio::test]
    async fn anonymous_context_never_fetches() {
        let api = Arc::new(FakeApi::default());
        let ctx = LoadContext::new(api.clone(), None);
        let mut loader = stats_loader();

        assert_eq!(loader.activate(&ctx), None);
        assert_eq!(loader.refresh(&ctx), None);
        assert!(!loader.loading());
        assert!(loader.settle().await.is_empty());
        assert_eq!(api.calls("get_dashboard_stats"), 0);
    }

    #[tokio::test]
    async fn loads_and_refreshes() {
        let api = Arc::new(FakeApi::default());
        api.stats.lock().unwrap().total_outstanding = Some(1200.0);
        let ctx = signed_in(api.clone());
        let mut loader = stats_loader();

        loader.activate(&ctx);
        assert!(loader.loading());
        assert_eq!(loader.settle().await, vec![LoadOutcome::Loaded]);
        assert!(!loader.loading());
        assert_eq!(loader.data().unwrap().total_outstanding, Some(1200.0));

        api.stats.lock().unwrap().total_outstanding = Some(900.0);
        loader.refresh(&ctx);
        loader.settle().await;
        assert_eq!(loader.data().unwrap().total_outstanding, Some(900.0));
        assert_eq!(api.calls("get_dashboard_stats"), 2);
    }

    #[tokio::test]
    async fn failure_keeps_previous_data_and_uses_refresh_fallback() {
        let api = Arc::new(FakeApi::default());
        let ctx = signed_in(api.clone());
        let mut loader = stats_loader();
        loader.activate(&ctx);
        loader.settle().await;

        api.fail("get_dashboard_stats", "");
        loader.refresh(&ctx);
        let outcomes = loader.settle().await;
        assert!(matches!(&outcomes[..], [LoadOutcome::Failed { .. }]));
        assert_eq!(loader.error(), Some(fallback::REFRESH_DASHBOARD));
        assert!(loader.data().is_some());
    }

    #[tokio::test]
    async fn first_failure_shows_server_message() {
        let api = Arc::new(FakeApi::default());
        api.fail("get_dashboard_stats", "Invalid user type");
        let ctx = signed_in(api.clone());
        let mut loader = stats_loader();

        loader.activate(&ctx);
        loader.settle().await;
        assert_eq!(loader.error(), Some("Invalid user type"));
        assert!(loader.data().is_none());

        // No automatic retry.
        assert_eq!(api.calls("get_dashboard_stats"), 1);
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        // Each request takes the next oneshot receiver, so the test decides completion order.
        let pending: Arc<Mutex<VecDeque<oneshot::Receiver<u32>>>> = Arc::default();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        pending.lock().unwrap().extend([first_rx, second_rx]);

        let queue = pending.clone();
        let mut loader: Loader<u32> = Loader::new(
            "numbers",
            Arc::new(move |_api: Arc<dyn DashboardApi>| {
                let rx = queue.lock().unwrap().pop_front();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|_| ApiError::EmptyResponse),
                        None => Err(ApiError::EmptyResponse),
                    }
                }
                .boxed()
            }),
            "Failed to load numbers",
        );
        let ctx = signed_in(Arc::new(FakeApi::default()));

        assert_eq!(loader.activate(&ctx), Some(1));
        assert_eq!(loader.refresh(&ctx), Some(2));

        // The newer request finishes first.
        second_tx.send(2).unwrap();
        first_tx.send(1).unwrap();
        let mut outcomes = loader.settle().await;
        outcomes.sort_by_key(|o| matches!(o, LoadOutcome::Stale));
        assert_eq!(outcomes, vec![LoadOutcome::Loaded, LoadOutcome::Stale]);
        assert_eq!(loader.data(), Some(&2));
        assert!(!loader.loading());
    }

    #[tokio::test]
    async fn loading_stays_set_until_newest_request_settles() {
        let (first_tx, first_rx) = oneshot::channel::<u32>();
        let (second_tx, second_rx) = oneshot::channel::<u32>();
        let pending = Arc::new(Mutex::new(VecDeque::from([first_rx, second_rx])));
        let queue = pending.clone();
        let mut loader: Loader<u32> = Loader::new(
            "numbers",
            Arc::new(move |_api: Arc<dyn DashboardApi>| {
                let rx = queue.lock().unwrap().pop_front();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|_| ApiError::EmptyResponse),
                        None => Err(ApiError::EmptyResponse),
                    }
                }
                .boxed()
            }),
            "Failed to load numbers",
        );
        let ctx = signed_in(Arc::new(FakeApi::default()));
        loader.activate(&ctx);
        loader.refresh(&ctx);

        first_tx.send(1).unwrap();
        // Wait for the first result only.
        let mut outcomes = Vec::new();
        while outcomes.is_empty() {
            tokio::task::yield_now().await;
            outcomes = loader.poll();
        }
        assert_eq!(outcomes, vec![LoadOutcome::Stale]);
        assert!(loader.loading());
        assert_eq!(loader.data(), None);

        second_tx.send(2).unwrap();
        loader.settle().await;
        assert_eq!(loader.data(), Some(&2));
    }

    fn interrupted_fetch() -> Result<u32, ApiError> {
        panic!("fetch stopped halfway")
    }

    #[tokio::test]
    async fn panicking_fetch_settles_as_failure() {
        let mut loader: Loader<u32> = Loader::new(
            "numbers",
            Arc::new(|_api: Arc<dyn DashboardApi>| async { interrupted_fetch() }.boxed()),
            "Failed to load numbers",
        );
        let ctx = signed_in(Arc::new(FakeApi::default()));

        loader.activate(&ctx);
        let outcomes = loader.settle().await;
        assert!(matches!(&outcomes[..], [LoadOutcome::Failed { .. }]));
        assert_eq!(loader.error(), Some("Failed to load numbers"));
        assert!(!loader.loading());
        assert_eq!(loader.in_flight(), 0);
    }
}
