use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the search box; highlighted while it has focus
pub fn render_search(frame: &mut Frame, term: &str, focused: bool, pending: bool, area: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::raw("🔍 ")];
    if term.is_empty() && !focused {
        spans.push(Span::styled(
            "Search through thousands of movies",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(term.to_string(), Style::default().fg(Color::White)));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let title = if pending { "Search (typing...)" } else { "Search" };

    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(search, area);
}
