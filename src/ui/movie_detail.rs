use crate::app::App;
use crate::app::tmdb::Movie;
use crate::ui::spinner::render_spinner;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

/// Renders the movie detail screen
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(movie) = app.detail_movie.clone() else {
        render_empty_state(frame, area);
        return;
    };

    let outer_block = Block::default()
        .title(format!("Movie Details - {}", movie.title))
        .borders(Borders::ALL)
        .style(Style::default());

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner_area);

    render_poster_section(frame, columns[0], app);

    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(columns[1]);
    render_title_section(frame, rows[0], &movie);
    render_overview(frame, rows[1], &movie);
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.loading_poster {
        render_spinner(
            frame,
            &mut app.throbber_state,
            "Poster",
            "Downloading poster...",
            area,
        );
    } else if let Some(protocol) = &mut app.poster_protocol {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));

        let poster_block = Block::default().borders(Borders::ALL).title("Poster");

        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
    } else {
        let placeholder_text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "No poster available",
                Style::default().fg(Color::Gray),
            )),
        ];

        let placeholder_paragraph = Paragraph::new(placeholder_text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Poster"));

        frame.render_widget(placeholder_paragraph, area);
    }
}

/// Renders the title section with basic info
fn render_title_section(frame: &mut Frame, area: Rect, movie: &Movie) {
    let year = movie.year().unwrap_or("N/A");
    let rating = movie
        .vote_average
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "N/A".to_string());
    let language = movie.original_language.as_deref().unwrap_or("N/A");

    let title_info = vec![
        Line::from(vec![
            Span::styled(
                movie.title.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(format!("({year})"), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Rating: ", Style::default().fg(Color::Gray)),
            Span::styled(rating, Style::default().fg(rating_color(movie.vote_average))),
            Span::raw(" | "),
            Span::styled("Language: ", Style::default().fg(Color::Gray)),
            Span::styled(language.to_uppercase(), Style::default().fg(Color::White)),
        ]),
    ];

    frame.render_widget(Paragraph::new(title_info), area);
}

fn render_overview(frame: &mut Frame, area: Rect, movie: &Movie) {
    let overview = movie
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .unwrap_or("No overview available.");

    let content = vec![
        Line::from(Span::styled(
            "Overview:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(overview.to_string(), Style::default().fg(Color::White))),
    ];

    frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }), area);
}

/// Renders empty state
fn render_empty_state(frame: &mut Frame, area: Rect) {
    let empty_block = Block::default()
        .title("Movie Details")
        .borders(Borders::ALL)
        .style(Style::default());

    let empty_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No movie selected",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            Style::default().fg(Color::Gray),
        )),
    ];

    let empty_paragraph = Paragraph::new(empty_text)
        .block(empty_block)
        .alignment(Alignment::Center);

    frame.render_widget(empty_paragraph, area);
}

/// TMDB scores run 0-10
fn rating_color(score: Option<f64>) -> Color {
    match score {
        Some(s) if s >= 7.0 => Color::Green,
        Some(s) if s >= 5.0 => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::White,
    }
}
