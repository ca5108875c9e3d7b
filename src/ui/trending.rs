use crate::app::App;
use crate::ui::spinner::render_spinner;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Renders the trending searches panel
pub fn render_trending(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.trending_loading {
        render_spinner(
            frame,
            &mut app.throbber_state,
            "Trending",
            "Loading trending...",
            area,
        );
        return;
    }

    let title = match app.trending_fetched_at {
        Some(at) if !app.trending.is_empty() => format!("Trending ({})", at.format("%H:%M")),
        _ => "Trending".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if app.trending.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let items: Vec<ListItem> = app
        .trending
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", i + 1),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.title.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!(" ({})", entry.search_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
