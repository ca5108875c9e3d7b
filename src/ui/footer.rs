use crate::app::{App, CurrentScreen};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Returns the appropriate instruction text based on app state
pub fn instruction_text(app: &App) -> &'static str {
    if app.searching {
        return "(Enter) search now, (Esc) leave search box";
    }
    match app.current_screen {
        CurrentScreen::Main => {
            if app.movies.is_empty() {
                "(/) search, (c) cards, (q) quit"
            } else {
                "(/) search, (↑↓/jk) select, (←→/hl) page, (Enter) details, (c) cards, (q) quit"
            }
        }
        CurrentScreen::MovieDetail => "(Esc/b) back, (q) quit",
        CurrentScreen::Cards => "(←→) pick card, (Space) click, (l) like, (Esc/b) back",
        CurrentScreen::Exiting => "(y) to confirm, (n) to cancel",
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let bottom = Paragraph::new(Text::styled(instruction_text(app), Style::default()))
        .block(bottom_block);

    frame.render_widget(bottom, area);
}
