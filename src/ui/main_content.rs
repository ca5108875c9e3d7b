use crate::app::App;
use crate::ui::movie_card::movie_card;
use crate::ui::spinner::render_spinner;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

/// Renders the results area: spinner, error, or the movie list with pagination
pub fn render_main_content(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.is_loading {
        render_spinner(
            frame,
            &mut app.throbber_state,
            "All Movies",
            "Loading movies...",
            area,
        );
        return;
    }

    if let Some(error) = &app.error_message {
        render_error_state(frame, area, error);
        return;
    }

    if app.movies.is_empty() {
        let empty_block = Block::default()
            .title("No movies found")
            .borders(Borders::ALL)
            .style(Style::default());

        frame.render_widget(empty_block, area);
        return;
    }

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(area);

    let title = if app.debounced_term.trim().is_empty() {
        format!("Popular Movies ({})", app.movies.len())
    } else {
        format!("Results for '{}' ({})", app.debounced_term.trim(), app.movies.len())
    };

    let items: Vec<ListItem> = app.movies.iter().map(movie_card).collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, chunks[0], &mut app.list_state);

    if app.shows_pagination() {
        let pagination = Paragraph::new(pagination_line(app))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(pagination, chunks[1]);
    }
}

/// Previous/next controls around the page indicator; a control at its bound is dimmed
pub fn pagination_line(app: &App) -> Line<'static> {
    let control = |label: &'static str, enabled: bool| {
        if enabled {
            Span::styled(
                label,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };

    Line::from(vec![
        control("◀ Prev", app.can_go_previous()),
        Span::raw(format!("   Page {} / {}   ", app.current_page, app.total_pages)),
        control("Next ▶", app.can_go_next()),
    ])
}

/// Renders error state
fn render_error_state(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).split(inner);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(vec!["OOPS".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    let error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Change the search or page to try again",
            Style::default().fg(Color::Gray),
        )),
    ];

    let error_paragraph = Paragraph::new(error_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, chunks[1]);
}
