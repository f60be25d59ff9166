//! Supplier's list of dues

use super::super::utils::{due_status_color, skeleton_lines};
use crate::dashboard::view::format_inr;
use crate::models::Due;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

pub fn render_dues_list(
    f: &mut Frame,
    area: Rect,
    dues: &[Due],
    selected: Option<usize>,
    is_loading: bool,
) {
    let block = Block::default()
        .title(format!("DUES ({})", if is_loading { 0 } else { dues.len() }))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if is_loading {
        f.render_widget(Paragraph::new(skeleton_lines(area.width)).block(block), area);
        return;
    }
    if dues.is_empty() {
        f.render_widget(Paragraph::new("No dues yet.").block(block), area);
        return;
    }

    let rows = dues.iter().map(|due| {
        Row::new(vec![
            Cell::from(due.retailer_display_name().to_string()),
            Cell::from(format_inr(due.amount)),
            Cell::from(due.due_date.format("%Y-%m-%d").to_string()),
            Cell::from(due.status.label()).style(Style::default().fg(due_status_color(due.status))),
            Cell::from(due.retailer_contact().unwrap_or("-").to_string()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Length(16),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Retailer", "Amount", "Due date", "Status", "Contact"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .block(block);

    let mut table_state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut table_state);
}
