//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::consts::cli_consts::SKELETON_ROWS;
use crate::events::Source;
use crate::models::{DueStatus, TransactionStatus};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;

/// Get a ratatui color for the part of the page an event came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Stats => Color::Cyan,
        Source::Collections => Color::LightBlue,
        Source::Mutation => Color::Yellow,
        Source::Session => Color::Green,
    }
}

pub fn due_status_color(status: DueStatus) -> Color {
    match status {
        DueStatus::Pending => Color::Yellow,
        DueStatus::Overdue => Color::LightRed,
        DueStatus::Paid => Color::Green,
    }
}

pub fn transaction_status_color(status: TransactionStatus) -> Color {
    match status {
        TransactionStatus::Pending => Color::Yellow,
        TransactionStatus::Completed => Color::Green,
        TransactionStatus::Failed => Color::LightRed,
    }
}

/// Placeholder rows drawn instead of data while a panel is loading.
pub fn skeleton_lines(width: u16) -> Vec<Line<'static>> {
    let bar = "░".repeat(width.saturating_sub(4).max(1) as usize);
    let mut lines = vec![Line::styled("Loading...", Style::default().fg(Color::DarkGray))];
    lines.extend(
        (0..SKELETON_ROWS).map(|_| Line::styled(bar.clone(), Style::default().fg(Color::DarkGray))),
    );
    lines
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// A `width` x `height` rectangle centred in `area`, clamped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
