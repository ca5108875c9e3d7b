use crate::app::tmdb::Movie;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// Builds the two-line list entry for one movie
pub fn movie_card(movie: &Movie) -> ListItem<'static> {
    let rating = movie
        .vote_average
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "N/A".to_string());
    let language = movie
        .original_language
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "N/A".to_string());
    let year = movie.year().unwrap_or("N/A").to_string();

    let content = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ★ ", Style::default().fg(Color::Yellow)),
            Span::styled(rating, Style::default().fg(Color::Gray)),
            Span::styled(" • ", Style::default().fg(Color::DarkGray)),
            Span::styled(language, Style::default().fg(Color::Gray)),
            Span::styled(" • ", Style::default().fg(Color::DarkGray)),
            Span::styled(year, Style::default().fg(Color::Gray)),
        ]),
    ];

    ListItem::new(content)
}
