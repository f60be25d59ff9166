//! Overdue dues, most overdue first

use super::super::utils::skeleton_lines;
use crate::dashboard::view::format_inr;
use crate::models::Due;
use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// `viewer_is_supplier` decides whose name is shown next to each due.
pub fn render_payment_reminders(
    f: &mut Frame,
    area: Rect,
    reminders: &[&Due],
    today: NaiveDate,
    viewer_is_supplier: bool,
    is_loading: bool,
) {
    let block = Block::default()
        .title("PAYMENT REMINDERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed));

    let lines: Vec<Line> = if is_loading {
        skeleton_lines(area.width)
    } else if reminders.is_empty() {
        vec![Line::styled("Nothing overdue.", Style::default().fg(Color::Green))]
    } else {
        reminders
            .iter()
            .map(|due| {
                let party = if viewer_is_supplier {
                    due.retailer_display_name()
                } else {
                    due.supplier_display_name()
                };
                Line::from(vec![
                    Span::styled(
                        format!("{}d late ", due.days_past_due(today)),
                        Style::default().fg(Color::LightRed),
                    ),
                    Span::raw(format!("{} ", party)),
                    Span::styled(format_inr(due.amount), Style::default().fg(Color::LightYellow)),
                ])
            })
            .collect()
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;
    use crate::models::DueStatus;
    use crate::ui::dashboard::utils::testing::render_to_string;

    #[test]
    fn lists_days_late() {
        let due = fake::due("1", DueStatus::Overdue, 400.0);
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let text = render_to_string(60, 5, |f| {
            render_payment_reminders(f, f.area(), &[&due], today, true, false)
        });
        assert!(text.contains("10d late"));
        assert!(text.contains("Sharma Kirana"));
    }

    #[test]
    fn loading_hides_reminders() {
        let due = fake::due("1", DueStatus::Overdue, 400.0);
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let text = render_to_string(60, 8, |f| {
            render_payment_reminders(f, f.area(), &[&due], today, false, true)
        });
        assert!(!text.contains("late"));
    }
}
