//! State shared by every dashboard page
//!
//! A page holds the stats loader, one loader for its joined list fetch, the mutations it has
//! started, and the activity log. Pages only differ in which lists they fetch and which
//! mutations they offer.

use super::channel::TaskChannel;
use super::loader::{Fetch, LoadOutcome, Loader};
use super::log_api_error;
use crate::api::error::ApiError;
use crate::api::{DashboardApi, fallback};
use crate::auth::LoadContext;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, Source};
use crate::models::{DashboardStats, Identity};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum MutationKind {
    #[strum(to_string = "Add due")]
    AddDue,
    #[strum(to_string = "Update due")]
    UpdateDue,
    #[strum(to_string = "Delete due")]
    DeleteDue,
    #[strum(to_string = "Payment")]
    Payment,
    #[strum(to_string = "Credit assessment")]
    CreditAssessment,
}

impl MutationKind {
    pub fn fallback(&self) -> &'static str {
        match self {
            MutationKind::AddDue => fallback::CREATE_DUE,
            MutationKind::UpdateDue => fallback::UPDATE_DUE,
            MutationKind::DeleteDue => fallback::DELETE_DUE,
            MutationKind::Payment => fallback::MAKE_PAYMENT,
            MutationKind::CreditAssessment => fallback::SUBMIT_ASSESSMENT,
        }
    }
}

/// A finished mutation: its summary on success, the message to show on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationCompletion {
    pub kind: MutationKind,
    pub result: Result<String, String>,
}

pub struct PageCore<C> {
    ctx: LoadContext,
    stats: Loader<DashboardStats>,
    collections: Loader<C>,
    /// Set by the first successful list fetch, never cleared.
    initialized: bool,
    mutation_error: Option<String>,
    activity_logs: VecDeque<Event>,
    mutations: TaskChannel<(MutationKind, Result<String, ApiError>)>,
    classifier: ErrorClassifier,
}

fn stats_fetch() -> Fetch<DashboardStats> {
    Arc::new(|api: Arc<dyn DashboardApi>| async move { api.get_dashboard_stats().await }.boxed())
}

impl<C: Send + 'static> PageCore<C> {
    pub fn new(ctx: LoadContext, collections: Loader<C>) -> Self {
        Self {
            ctx,
            stats: Loader::new("dashboard stats", stats_fetch(), fallback::LOAD_DASHBOARD)
                .with_refresh_fallback(fallback::REFRESH_DASHBOARD),
            collections,
            initialized: false,
            mutation_error: None,
            activity_logs: VecDeque::new(),
            mutations: TaskChannel::new("mutations"),
            classifier: ErrorClassifier::new(),
        }
    }

    /// Starts the parallel list fetch and the stats fetch.
    pub fn mount(&mut self) {
        let collections = self.collections.activate(&self.ctx);
        let stats = self.stats.activate(&self.ctx);
        if collections.is_some() || stats.is_some() {
            self.add_to_activity_log(Event::waiting(Source::Collections, "Loading dashboard"));
        }
    }

    /// Re-fetches every list and the stats.
    pub fn refresh_all(&mut self) {
        self.mutation_error = None;
        if self.collections.refresh(&self.ctx).is_some() {
            self.add_to_activity_log(Event::refresh(Source::Collections, "Refreshing dashboard"));
        }
        self.stats.refresh(&self.ctx);
    }

    pub fn api(&self) -> Arc<dyn DashboardApi> {
        self.ctx.api().clone()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.ctx.identity()
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.data()
    }

    pub fn stats_loading(&self) -> bool {
        self.stats.loading()
    }

    pub fn collections(&self) -> Option<&C> {
        self.collections.data()
    }

    pub fn collections_loading(&self) -> bool {
        self.collections.loading()
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// The full-page spinner: only before the first list fetch has succeeded.
    pub fn spinner(&self) -> bool {
        !self.initialized && self.collections.loading()
    }

    /// The page-level error, most recent kind first.
    pub fn banner(&self) -> Option<&str> {
        self.mutation_error
            .as_deref()
            .or(self.collections.error())
            .or(self.stats.error())
    }

    pub fn mutation_in_flight(&self) -> bool {
        self.mutations.in_flight() > 0
    }

    pub fn activity_logs(&self) -> &VecDeque<Event> {
        &self.activity_logs
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Starts a write. Returns `false` without a signed-in user.
    pub fn run_mutation(
        &mut self,
        kind: MutationKind,
        request: BoxFuture<'static, Result<String, ApiError>>,
    ) -> bool {
        if !self.ctx.is_authenticated() {
            log::debug!("{}: not signed in, not sending", kind);
            return false;
        }
        self.mutation_error = None;
        self.mutations.spawn(async move { (kind, request.await) }, move || {
            (kind, Err(ApiError::Interrupted))
        });
        self.add_to_activity_log(Event::waiting(Source::Mutation, format!("{} sent", kind)));
        true
    }

    /// Applies whatever has finished since the last call.
    pub fn poll(&mut self) -> Vec<MutationCompletion> {
        for outcome in self.collections.poll() {
            self.on_collections(outcome);
        }
        for outcome in self.stats.poll() {
            self.on_stats(outcome);
        }
        let mut completions = Vec::new();
        while let Some((kind, result)) = self.mutations.try_next() {
            completions.push(self.on_mutation(kind, result));
        }
        completions
    }

    /// Waits until nothing is in flight, including refreshes that mutations trigger.
    pub async fn settle(&mut self) -> Vec<MutationCompletion> {
        let mut completions = self.poll();
        loop {
            if self.mutations.in_flight() > 0 {
                if let Some((kind, result)) = self.mutations.next().await {
                    completions.push(self.on_mutation(kind, result));
                }
            } else if self.collections.in_flight() > 0 || self.stats.in_flight() > 0 {
                for outcome in self.collections.settle().await {
                    self.on_collections(outcome);
                }
                for outcome in self.stats.settle().await {
                    self.on_stats(outcome);
                }
            } else {
                break;
            }
        }
        completions
    }

    fn on_collections(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded => {
                self.initialized = true;
                self.add_to_activity_log(Event::success(Source::Collections, "Dashboard data loaded"));
            }
            LoadOutcome::Failed { message, level } => {
                self.add_to_activity_log(Event::error_with_level(Source::Collections, message, level));
            }
            LoadOutcome::Stale => {}
        }
    }

    fn on_stats(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded => {
                self.add_to_activity_log(Event::refresh(Source::Stats, "Stats updated"));
            }
            LoadOutcome::Failed { message, level } => {
                self.add_to_activity_log(Event::error_with_level(Source::Stats, message, level));
            }
            LoadOutcome::Stale => {}
        }
    }

    fn on_mutation(
        &mut self,
        kind: MutationKind,
        result: Result<String, ApiError>,
    ) -> MutationCompletion {
        match result {
            Ok(summary) => {
                log::info!("{}: {}", kind, summary);
                self.mutation_error = None;
                self.add_to_activity_log(Event::success(Source::Mutation, summary.clone()));
                self.refresh_all();
                MutationCompletion {
                    kind,
                    result: Ok(summary),
                }
            }
            Err(e) => {
                let message = e.display_message(kind.fallback());
                let level = log_api_error(&self.classifier, &kind.to_string(), &e);
                self.mutation_error = Some(message.clone());
                self.add_to_activity_log(Event::error_with_level(
                    Source::Mutation,
                    message.clone(),
                    level,
                ));
                MutationCompletion {
                    kind,
                    result: Err(message),
                }
            }
        }
    }
}
