//! Recent transactions

use super::super::utils::{skeleton_lines, transaction_status_color};
use crate::dashboard::view::format_inr;
use crate::models::Transaction;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

pub fn render_transaction_history(
    f: &mut Frame,
    area: Rect,
    transactions: &[Transaction],
    viewer_is_supplier: bool,
    is_loading: bool,
) {
    let block = Block::default()
        .title("TRANSACTIONS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if is_loading {
        f.render_widget(Paragraph::new(skeleton_lines(area.width)).block(block), area);
        return;
    }
    if transactions.is_empty() {
        f.render_widget(Paragraph::new("No transactions yet.").block(block), area);
        return;
    }

    let rows = transactions.iter().map(|tx| {
        Row::new(vec![
            Cell::from(tx.created_on().unwrap_or("-").to_string()),
            Cell::from(tx.counterparty_name(viewer_is_supplier).to_string()),
            Cell::from(tx.description.clone()),
            Cell::from(format_inr(tx.amount)),
            Cell::from(tx.status.to_string())
                .style(Style::default().fg(transaction_status_color(tx.status))),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(16),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Date", "With", "Description", "Amount", "Status"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(block);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;
    use crate::ui::dashboard::utils::testing::render_to_string;

    #[test]
    fn supplier_sees_the_retailer() {
        let txs = vec![fake::transaction("11", 250.0)];
        let text = render_to_string(100, 5, |f| {
            render_transaction_history(f, f.area(), &txs, true, false)
        });
        assert!(text.contains("Sharma Kirana"));
        assert!(text.contains("2024-03-05"));
        assert!(text.contains("completed"));
    }

    #[test]
    fn loading_hides_rows() {
        let txs = vec![fake::transaction("11", 250.0)];
        let text = render_to_string(100, 8, |f| {
            render_transaction_history(f, f.area(), &txs, true, true)
        });
        assert!(!text.contains("Sharma Kirana"));
    }
}
