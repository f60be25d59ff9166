//! Dashboard state updaters
//!
//! Per-tick polling and key handling. Keys go to the open modal first, then to the page.

use super::state::{DashboardState, Page};
use crate::dashboard::{RetailerPage, SupplierPage, SupplierTab};
use crate::forms::FormModal;
use crate::models::DueStatus;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

enum ModalAction {
    None,
    Submit,
}

impl DashboardState {
    /// Applies finished requests and advances the animation tick.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.today = Local::now().date_naive();
        self.page.poll();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyOutcome::Quit;
        }
        let today = self.today;
        match &mut self.page {
            Page::Supplier(page) => supplier_key(page, &mut self.searching, today, key),
            Page::Retailer(page) => retailer_key(page, key),
        }
    }
}

fn modal_key(modal: &mut FormModal, key: KeyEvent) -> ModalAction {
    match key.code {
        KeyCode::Esc => {
            modal.close();
        }
        KeyCode::Enter => return ModalAction::Submit,
        KeyCode::Tab | KeyCode::Down => modal.focus_next(),
        KeyCode::BackTab | KeyCode::Up => modal.focus_prev(),
        KeyCode::Left => modal.cycle(-1),
        KeyCode::Right => modal.cycle(1),
        KeyCode::Backspace => modal.backspace(),
        KeyCode::Char(c) => modal.input_char(c),
        _ => {}
    }
    ModalAction::None
}

fn supplier_key(
    page: &mut SupplierPage,
    searching: &mut bool,
    today: chrono::NaiveDate,
    key: KeyEvent,
) -> KeyOutcome {
    if page.add_due_modal().is_open() {
        if let ModalAction::Submit = modal_key(page.add_due_modal_mut(), key) {
            page.submit_add_due();
        }
        return KeyOutcome::Continue;
    }

    if *searching {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => *searching = false,
            KeyCode::Backspace => page.pop_query_char(),
            KeyCode::Down => page.select_next_retailer(),
            KeyCode::Up => page.select_prev_retailer(),
            KeyCode::Char(c) => page.push_query_char(c),
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    let on_retailers = page.tab() == SupplierTab::Retailers;
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('r') => page.refresh(),
        KeyCode::Tab => page.next_tab(),
        KeyCode::Down | KeyCode::Char('j') if on_retailers => page.select_next_retailer(),
        KeyCode::Up | KeyCode::Char('k') if on_retailers => page.select_prev_retailer(),
        KeyCode::Down | KeyCode::Char('j') => page.select_next_due(),
        KeyCode::Up | KeyCode::Char('k') => page.select_prev_due(),
        KeyCode::Char('/') if on_retailers => *searching = true,
        KeyCode::Char('a') | KeyCode::Enter if on_retailers => {
            page.open_add_due(today);
        }
        KeyCode::Char('p') => {
            page.update_selected_status(DueStatus::Paid);
        }
        KeyCode::Char('o') => {
            page.update_selected_status(DueStatus::Overdue);
        }
        KeyCode::Char('d') => {
            page.delete_selected_due();
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn retailer_key(page: &mut RetailerPage, key: KeyEvent) -> KeyOutcome {
    if page.payment_modal().is_open() {
        if let ModalAction::Submit = modal_key(page.payment_modal_mut(), key) {
            page.submit_payment();
        }
        return KeyOutcome::Continue;
    }
    if page.assessment_modal().is_open() {
        if let ModalAction::Submit = modal_key(page.assessment_modal_mut(), key) {
            page.submit_assessment();
        }
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('r') => page.refresh(),
        KeyCode::Down | KeyCode::Char('j') => page.select_next_due(),
        KeyCode::Up | KeyCode::Char('k') => page.select_prev_due(),
        KeyCode::Char('p') | KeyCode::Enter => {
            page.open_payment();
        }
        KeyCode::Char('c') => {
            page.open_assessment();
        }
        _ => {}
    }
    KeyOutcome::Continue
}
