//! Dashboard main renderer

use super::components::{
    banner, credit_status, due_payments, dues_list, footer, form_modal, header, logs,
    payment_reminder, retailer_list, spinner, stats_cards, transaction_history,
};
use super::state::{DashboardState, Page};
use crate::dashboard::{RetailerPage, SupplierPage, SupplierTab};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let banner_height = if state.page.banner().is_some() { 3 } else { 0 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(banner_height),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    if let Some(message) = state.page.banner() {
        banner::render_banner(f, main_chunks[1], message);
    }

    if state.page.spinner() {
        spinner::render_spinner(f, main_chunks[2], state.tick);
    } else {
        match &state.page {
            Page::Supplier(page) => render_supplier(f, main_chunks[2], state, page),
            Page::Retailer(page) => render_retailer(f, main_chunks[2], state, page),
        }
    }
    footer::render_footer(f, main_chunks[3], state);

    if let Some(modal) = state.page.open_modal() {
        form_modal::render_form_modal(f, f.area(), modal);
    }
}

fn split(area: Rect, direction: Direction, constraints: &[Constraint]) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(direction)
        .constraints(constraints.to_vec())
        .split(area)
}

fn render_supplier(f: &mut Frame, area: Rect, state: &DashboardState, page: &SupplierPage) {
    let core = page.core();
    let loading = core.collections_loading();
    let rows = split(
        area,
        Direction::Vertical,
        &[
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Percentage(35),
        ],
    );
    stats_cards::render_supplier_stats(f, rows[0], core.stats(), core.stats_loading());

    let middle = split(
        rows[1],
        Direction::Horizontal,
        &[Constraint::Percentage(60), Constraint::Percentage(40)],
    );
    match page.tab() {
        SupplierTab::Overview => {
            dues_list::render_dues_list(
                f,
                middle[0],
                page.dues(),
                Some(page.selected_due_index()),
                loading,
            );
            let reminders = crate::dashboard::view::payment_reminders(page.dues(), state.today);
            payment_reminder::render_payment_reminders(
                f,
                middle[1],
                &reminders,
                state.today,
                true,
                loading,
            );
        }
        SupplierTab::Retailers => {
            let retailers = page.filtered_retailers();
            let props = retailer_list::RetailerListProps {
                retailers: &retailers,
                query: page.retailer_query(),
                searching: state.searching,
                selected: Some(page.selected_retailer_index()),
            };
            retailer_list::render_retailer_list(f, middle[0], &props, loading);
            dues_list::render_dues_list(f, middle[1], page.dues(), None, loading);
        }
    }

    let bottom = split(
        rows[2],
        Direction::Horizontal,
        &[Constraint::Percentage(50), Constraint::Percentage(50)],
    );
    transaction_history::render_transaction_history(
        f,
        bottom[0],
        page.transactions(),
        true,
        loading,
    );
    logs::render_logs_panel(f, bottom[1], core.activity_logs());
}

fn render_retailer(f: &mut Frame, area: Rect, state: &DashboardState, page: &RetailerPage) {
    let core = page.core();
    let loading = core.collections_loading();
    let rows = split(
        area,
        Direction::Vertical,
        &[
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Percentage(35),
        ],
    );
    stats_cards::render_retailer_stats(f, rows[0], core.stats(), core.stats_loading());

    let middle = split(
        rows[1],
        Direction::Horizontal,
        &[Constraint::Percentage(40), Constraint::Percentage(60)],
    );
    let history = page.credit_history();
    let props = credit_status::CreditStatusProps {
        stats: core.stats(),
        utilization: page.credit_utilization(),
        assessment: page.assessment(),
        history: &history,
    };
    credit_status::render_credit_status(f, middle[0], &props, core.stats_loading());

    let right = split(
        middle[1],
        Direction::Vertical,
        &[Constraint::Fill(2), Constraint::Fill(1)],
    );
    due_payments::render_due_payments(
        f,
        right[0],
        &page.outstanding_dues(),
        Some(page.selected_due_index()),
        loading,
    );
    payment_reminder::render_payment_reminders(
        f,
        right[1],
        &page.payment_reminders(state.today),
        state.today,
        false,
        loading,
    );

    let bottom = split(
        rows[2],
        Direction::Horizontal,
        &[Constraint::Percentage(50), Constraint::Percentage(50)],
    );
    transaction_history::render_transaction_history(
        f,
        bottom[0],
        page.history(),
        false,
        loading,
    );
    logs::render_logs_panel(f, bottom[1], core.activity_logs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{self, FakeApi};
    use crate::auth::LoadContext;
    use crate::environment::Environment;
    use crate::models::Identity;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::utils::testing::render_to_string;
    use std::sync::Arc;
    use std::time::Instant;

    fn state(api: &Arc<FakeApi>, identity: Identity) -> DashboardState {
        let ctx = LoadContext::new(api.clone(), Some(identity.clone()));
        DashboardState::new(
            identity,
            ctx,
            Environment::Local,
            Instant::now(),
            UIConfig::new(false),
        )
    }

    #[tokio::test]
    async fn spinner_until_first_load() {
        let api = Arc::new(FakeApi::gated());
        let state = state(&api, fake::supplier());
        let text = render_to_string(140, 40, |f| render_dashboard(f, &state));
        assert!(text.contains("Loading dashboard..."));
        assert!(!text.contains("DUES"));
        api.open_gate();
    }

    #[tokio::test]
    async fn refresh_shows_skeleton_not_stale_rows() {
        let api = Arc::new(FakeApi::gated());
        let mut state = state(&api, fake::supplier());
        api.open_gate();
        if let Page::Supplier(page) = &mut state.page {
            page.settle().await;
        }
        let loaded = render_to_string(140, 40, |f| render_dashboard(f, &state));
        assert!(loaded.contains("Sharma Kirana"));
        assert!(loaded.contains("CREDITLINE"));

        state.page.refresh();
        let refreshing = render_to_string(140, 40, |f| render_dashboard(f, &state));
        assert!(!refreshing.contains("Loading dashboard..."));
        assert!(refreshing.contains("Loading..."));
        assert!(!refreshing.contains("Sharma Kirana"));
    }

    #[tokio::test]
    async fn retailer_page_and_banner() {
        let api = Arc::new(FakeApi::default());
        api.fail("get_dashboard_stats", "Invalid user type");
        let mut state = state(&api, fake::retailer_identity());
        if let Page::Retailer(page) = &mut state.page {
            page.settle().await;
        }
        let text = render_to_string(140, 40, |f| render_dashboard(f, &state));
        assert!(text.contains("Invalid user type"));
        assert!(text.contains("DUES TO PAY"));
        assert!(text.contains("CREDIT STATUS"));
    }

    #[tokio::test]
    async fn open_modal_is_drawn_on_top() {
        let api = Arc::new(FakeApi::default());
        let mut state = state(&api, fake::retailer_identity());
        if let Page::Retailer(page) = &mut state.page {
            page.settle().await;
            page.open_payment();
        }
        let text = render_to_string(140, 40, |f| render_dashboard(f, &state));
        assert!(text.contains("Make Payment"));
        assert!(text.contains("[Enter] Submit"));
    }
}
