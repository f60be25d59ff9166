//! Dashboard state
//!
//! Holds the page controller for the signed-in role plus what only the terminal needs.

use crate::auth::LoadContext;
use crate::dashboard::{RetailerPage, SupplierPage};
use crate::environment::Environment;
use crate::events::Event;
use crate::forms::FormModal;
use crate::models::{Identity, Role};
use crate::ui::app::UIConfig;
use chrono::{Local, NaiveDate};
use std::collections::VecDeque;
use std::time::Instant;

/// The page shown for the signed-in role.
pub enum Page {
    Supplier(Box<SupplierPage>),
    Retailer(Box<RetailerPage>),
}

impl Page {
    /// Admins get the supplier view.
    pub fn for_role(role: Role, ctx: LoadContext) -> Self {
        match role {
            Role::Retailer => Page::Retailer(Box::new(RetailerPage::new(ctx))),
            Role::Supplier | Role::Admin => Page::Supplier(Box::new(SupplierPage::new(ctx))),
        }
    }

    pub fn mount(&mut self) {
        match self {
            Page::Supplier(page) => page.mount(),
            Page::Retailer(page) => page.mount(),
        }
    }

    pub fn refresh(&mut self) {
        match self {
            Page::Supplier(page) => page.refresh(),
            Page::Retailer(page) => page.refresh(),
        }
    }

    pub fn poll(&mut self) {
        match self {
            Page::Supplier(page) => {
                page.poll();
            }
            Page::Retailer(page) => {
                page.poll();
            }
        }
    }

    pub fn spinner(&self) -> bool {
        match self {
            Page::Supplier(page) => page.core().spinner(),
            Page::Retailer(page) => page.core().spinner(),
        }
    }

    pub fn banner(&self) -> Option<&str> {
        match self {
            Page::Supplier(page) => page.core().banner(),
            Page::Retailer(page) => page.core().banner(),
        }
    }

    pub fn activity_logs(&self) -> &VecDeque<Event> {
        match self {
            Page::Supplier(page) => page.core().activity_logs(),
            Page::Retailer(page) => page.core().activity_logs(),
        }
    }

    /// The modal currently on screen, if any.
    pub fn open_modal(&self) -> Option<&FormModal> {
        match self {
            Page::Supplier(page) => Some(page.add_due_modal()).filter(|m| m.is_open()),
            Page::Retailer(page) => [page.payment_modal(), page.assessment_modal()]
                .into_iter()
                .find(|m| m.is_open()),
        }
    }
}

pub struct DashboardState {
    pub identity: Identity,
    pub environment: Environment,
    pub page: Page,
    /// Typing goes to the retailer search box.
    pub searching: bool,
    pub start_time: Instant,
    pub tick: usize,
    pub today: NaiveDate,
    pub with_background_color: bool,
}

impl DashboardState {
    /// Builds the page for `identity`'s role and starts its first load.
    pub fn new(
        identity: Identity,
        ctx: LoadContext,
        environment: Environment,
        start_time: Instant,
        ui_config: UIConfig,
    ) -> Self {
        let mut page = Page::for_role(identity.role, ctx);
        page.mount();
        Self {
            identity,
            environment,
            page,
            searching: false,
            start_time,
            tick: 0,
            today: Local::now().date_naive(),
            with_background_color: ui_config.with_background_color,
        }
    }

    pub fn display_name(&self) -> &str {
        self.identity
            .business_name
            .as_deref()
            .unwrap_or(&self.identity.email)
    }
}
