use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the header/title block at the top of the screen
pub fn render_header(frame: &mut Frame, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let title = Line::from(vec![
        Span::styled(
            "Cinema Search",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Find movies you'll enjoy without the hassle",
            Style::default().fg(Color::Gray),
        ),
    ]);

    frame.render_widget(Paragraph::new(title).block(title_block), area);
}
