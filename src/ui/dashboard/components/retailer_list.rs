//! Retailer directory with the search box

use super::super::utils::skeleton_lines;
use crate::models::Retailer;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

pub struct RetailerListProps<'a> {
    pub retailers: &'a [&'a Retailer],
    pub query: &'a str,
    pub searching: bool,
    pub selected: Option<usize>,
}

pub fn render_retailer_list(f: &mut Frame, area: Rect, props: &RetailerListProps, is_loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    let search_color = if props.searching {
        Color::LightYellow
    } else {
        Color::DarkGray
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Gray)),
        Span::raw(props.query.to_string()),
        Span::styled(
            if props.searching { "_" } else { "" },
            Style::default().fg(search_color),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(search_color)),
    );
    f.render_widget(search, chunks[0]);

    let block = Block::default()
        .title("RETAILERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if is_loading {
        f.render_widget(Paragraph::new(skeleton_lines(area.width)).block(block), chunks[1]);
        return;
    }
    if props.retailers.is_empty() {
        f.render_widget(Paragraph::new("No retailers found.").block(block), chunks[1]);
        return;
    }

    let items: Vec<ListItem> = props
        .retailers
        .iter()
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::raw(r.business_name.clone()),
                Span::styled(
                    format!("  {}", r.phone.as_deref().unwrap_or("")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(props.selected);
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}
