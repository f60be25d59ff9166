//! Dashboard header component
//!
//! Renders the title and, on supplier pages, the tab bar

use super::super::state::{DashboardState, Page};
use crate::dashboard::SupplierTab;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

/// Render header with title, signed-in business and tabs.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_text = format!("CREDITLINE v{}", env!("CARGO_PKG_VERSION"));
    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(header_chunks[1]);

    let who = Line::from(vec![
        Span::styled(
            state.display_name().to_string(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  {}", state.identity.role, state.environment),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(who), info_chunks[0]);

    if let Page::Supplier(page) = &state.page {
        let selected = match page.tab() {
            SupplierTab::Overview => 0,
            SupplierTab::Retailers => 1,
        };
        let tabs = Tabs::new(vec![
            SupplierTab::Overview.to_string(),
            SupplierTab::Retailers.to_string(),
        ])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(tabs, info_chunks[1]);
    }
}
