//! Retailer credit position: utilization gauge, limit, score and history sparkline

use crate::dashboard::view::{CreditHealth, Utilization, format_optional_inr};
use crate::models::{CreditAssessmentStatus, CreditPoint, DashboardStats};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Sparkline};

use super::super::utils::skeleton_lines;

pub struct CreditStatusProps<'a> {
    pub stats: Option<&'a DashboardStats>,
    pub utilization: Option<Utilization>,
    pub assessment: Option<&'a CreditAssessmentStatus>,
    pub history: &'a [CreditPoint],
}

pub fn render_credit_status(f: &mut Frame, area: Rect, props: &CreditStatusProps, is_loading: bool) {
    let block = Block::default()
        .title("CREDIT STATUS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if is_loading {
        f.render_widget(Paragraph::new(skeleton_lines(area.width)).block(block), area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(inner);

    let gauge = match props.utilization {
        Some(utilization) => {
            let color = match utilization.health {
                CreditHealth::Critical => Color::LightRed,
                CreditHealth::Healthy => Color::LightGreen,
            };
            Gauge::default()
                .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .ratio(utilization.ratio())
                .label(format!("Utilization {}", utilization.label()))
        }
        None => Gauge::default()
            .gauge_style(Style::default().fg(Color::DarkGray))
            .ratio(0.0)
            .label("Utilization N/A"),
    };
    f.render_widget(
        gauge.block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    let stats = props.stats.cloned().unwrap_or_default();
    let score = stats
        .credit_score
        .or(props.assessment.and_then(|a| a.credit_score))
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let assessment = props
        .assessment
        .map(|a| a.status.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let details = vec![
        Line::from(vec![
            Span::styled("Available: ", Style::default().fg(Color::Gray)),
            Span::raw(format_optional_inr(stats.available_credit)),
            Span::styled("  Limit: ", Style::default().fg(Color::Gray)),
            Span::raw(format_optional_inr(stats.credit_limit)),
        ]),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Gray)),
            Span::styled(score, Style::default().fg(Color::LightYellow)),
            Span::styled("  Assessment: ", Style::default().fg(Color::Gray)),
            Span::raw(assessment),
        ]),
    ];
    f.render_widget(Paragraph::new(details), chunks[1]);

    let bars: Vec<u64> = props
        .history
        .iter()
        .map(|p| p.amount.max(0.0).round() as u64)
        .collect();
    let sparkline = Sparkline::default()
        .block(Block::default().title("Credit history"))
        .style(Style::default().fg(Color::LightBlue))
        .data(&bars);
    f.render_widget(sparkline, chunks[2]);
}
