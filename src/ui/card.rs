use crate::app::App;
use crate::app::cards::LikeCard;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the like-counter cards side by side
pub fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let outer = Block::default().title("Like Counter").borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if app.cards.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, app.cards.len() as u32); app.cards.len()];
    let columns = Layout::horizontal(constraints).split(inner);

    for (i, (card, column)) in app.cards.iter().zip(columns.iter()).enumerate() {
        render_card(frame, card, i == app.selected_card, *column);
    }
}

fn render_card(frame: &mut Frame, card: &LikeCard, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            card.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(count) = card.count_label() {
        lines.push(Line::from(Span::styled(count, Style::default().fg(Color::Cyan))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(card.heart()));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    frame.render_widget(paragraph, area);
}
