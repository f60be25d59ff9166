//! Dashboard footer component
//!
//! Renders the key bindings for what is on screen

use super::super::state::{DashboardState, Page};
use crate::dashboard::SupplierTab;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn footer_text(state: &DashboardState) -> &'static str {
    if state.page.open_modal().is_some() {
        return "[Tab] Next field | [←/→] Change choice | [Enter] Submit | [Esc] Cancel";
    }
    match &state.page {
        Page::Supplier(_) if state.searching => "Type to search | [Enter/Esc] Done",
        Page::Supplier(page) if page.tab() == SupplierTab::Retailers => {
            "[Q] Quit | [Tab] Overview | [/] Search | [A] Add due | [R] Refresh"
        }
        Page::Supplier(_) => {
            "[Q] Quit | [Tab] Retailers | [P] Mark paid | [O] Mark overdue | [D] Delete | [R] Refresh"
        }
        Page::Retailer(_) => "[Q] Quit | [P] Pay due | [C] Credit assessment | [R] Refresh",
    }
}

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer = Paragraph::new(footer_text(state))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
