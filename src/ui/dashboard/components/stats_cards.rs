//! Stats cards for the supplier and retailer pages

use crate::dashboard::view::format_optional_inr;
use crate::models::DashboardStats;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

struct Card {
    title: &'static str,
    value: String,
    color: Color,
}

fn render_cards(f: &mut Frame, area: Rect, cards: Vec<Card>, is_loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (card, chunk) in cards.into_iter().zip(chunks.iter()) {
        let value = if is_loading {
            Line::styled("░░░░░░", Style::default().fg(Color::DarkGray))
        } else {
            Line::styled(
                card.value,
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            )
        };
        let widget = Paragraph::new(value).alignment(Alignment::Center).block(
            Block::default()
                .title(card.title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(widget, *chunk);
    }
}

pub fn render_supplier_stats(
    f: &mut Frame,
    area: Rect,
    stats: Option<&DashboardStats>,
    is_loading: bool,
) {
    let stats = stats.cloned().unwrap_or_default();
    let cards = vec![
        Card {
            title: "Total Outstanding",
            value: format_optional_inr(stats.total_outstanding),
            color: Color::LightYellow,
        },
        Card {
            title: "Active Retailers",
            value: stats
                .active_retailers
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            color: Color::Cyan,
        },
        Card {
            title: "Monthly Sales",
            value: format_optional_inr(stats.monthly_sales),
            color: Color::Green,
        },
        Card {
            title: "Overdue Amount",
            value: format_optional_inr(stats.overdue_amount),
            color: Color::LightRed,
        },
    ];
    render_cards(f, area, cards, is_loading);
}

pub fn render_retailer_stats(
    f: &mut Frame,
    area: Rect,
    stats: Option<&DashboardStats>,
    is_loading: bool,
) {
    let stats = stats.cloned().unwrap_or_default();
    let cards = vec![
        Card {
            title: "Total Due",
            value: format_optional_inr(stats.total_due),
            color: Color::LightYellow,
        },
        Card {
            title: "Due Today",
            value: format_optional_inr(stats.due_today),
            color: Color::Cyan,
        },
        Card {
            title: "Overdue",
            value: format_optional_inr(stats.overdue_amount),
            color: Color::LightRed,
        },
        Card {
            title: "Available Credit",
            value: format_optional_inr(stats.available_credit),
            color: Color::Green,
        },
    ];
    render_cards(f, area, cards, is_loading);
}
