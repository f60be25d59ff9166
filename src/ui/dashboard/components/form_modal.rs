//! Modal form overlay

use super::super::utils::centered_rect;
use crate::forms::{FieldKind, FieldSpec, FormModal};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const MODAL_WIDTH: u16 = 64;

fn field_value(modal: &FormModal, field: &FieldSpec) -> String {
    let value = modal.values().get(field.name);
    match field.kind {
        FieldKind::Choice(_) => format!("< {} >", if value.is_empty() { "select" } else { value }),
        FieldKind::Toggle => {
            if modal.values().is_true(field.name) {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        _ => value.to_string(),
    }
}

/// The modal's lines: one per visible field, its error below it, then the submit state.
pub fn modal_lines(modal: &FormModal) -> Vec<Line<'static>> {
    let focused = modal.focused_field().map(|f| f.name);
    let mut lines = Vec::new();

    if let Some(name) = modal.values().optional("retailer_name") {
        lines.push(Line::from(vec![
            Span::styled("Retailer: ", Style::default().fg(Color::Gray)),
            Span::styled(name.to_string(), Style::default().fg(Color::LightYellow)),
        ]));
    }

    for field in modal.visible_fields() {
        let is_focused = focused == Some(field.name);
        let label_style = if is_focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if is_focused && !modal.is_submitting() {
            "_"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(if is_focused { "> " } else { "  " }, label_style),
            Span::styled(format!("{}: ", field.label), label_style),
            Span::raw(field_value(modal, field)),
            Span::raw(cursor),
        ]));
        if let Some(error) = modal.field_errors().get(field.name) {
            lines.push(Line::styled(
                format!("    {}", error),
                Style::default().fg(Color::LightRed),
            ));
        }
    }

    // Errors on fields that are not drawn, such as the preselected retailer.
    for (field, error) in modal.field_errors().iter() {
        if !modal.visible_fields().iter().any(|f| f.name == field) {
            lines.push(Line::styled(
                error.to_string(),
                Style::default().fg(Color::LightRed),
            ));
        }
    }

    lines.push(Line::raw(""));
    if modal.is_submitting() {
        lines.push(Line::styled(
            "Submitting...",
            Style::default().fg(Color::LightYellow),
        ));
    } else if let Some(error) = modal.error() {
        lines.push(Line::styled(
            error.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines
}

pub fn render_form_modal(f: &mut Frame, area: Rect, modal: &FormModal) {
    let lines = modal_lines(modal);
    let height = (lines.len() as u16).saturating_add(2);
    let modal_area = centered_rect(MODAL_WIDTH, height, area);

    let block = Block::default()
        .title(modal.title())
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, modal_area);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        modal_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormSnapshot, payment};
    use crate::ui::dashboard::utils::testing::render_to_string;

    #[test]
    fn shows_fields_and_focus() {
        let mut modal = payment::modal();
        modal.open_with(FormSnapshot::new().with("due", "3").with("amount", "250.00"));
        let text = render_to_string(80, 14, |f| render_form_modal(f, f.area(), &modal));
        assert!(text.contains("Make Payment"));
        assert!(text.contains("> Amount (₹): 250.00_"));
        assert!(text.contains("Payment Method: < upi >"));
    }

    #[test]
    fn shows_field_and_server_errors() {
        let mut modal = payment::modal();
        modal.open_with(FormSnapshot::new().with("due", "3"));
        assert!(modal.begin_submit().is_none());
        let lines: Vec<String> = modal_lines(&modal).iter().map(|l| l.to_string()).collect();
        assert!(lines.iter().any(|l| l.contains("Amount is required")));

        modal.set("amount", "10");
        modal.begin_submit().unwrap();
        modal.fail("Payment amount exceeds due amount".to_string());
        let lines: Vec<String> = modal_lines(&modal).iter().map(|l| l.to_string()).collect();
        assert_eq!(lines.last().unwrap(), "Payment amount exceeds due amount");
    }
}
