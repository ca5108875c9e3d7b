use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::card::render_cards;
use super::footer::render_footer;
use super::header::render_header;
use super::main_content::render_main_content;
use super::movie_detail::render_movie_detail;
use super::search::render_search;
use super::trending::render_trending;

const TRENDING_WIDTH: u16 = 32;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(3), // Search
        Constraint::Min(1),    // Content
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    render_header(frame, chunks[0]);
    render_search(
        frame,
        &app.search_term,
        app.searching,
        app.search_pending(),
        chunks[1],
    );

    match app.current_screen {
        CurrentScreen::MovieDetail => render_movie_detail(frame, app, chunks[2]),
        CurrentScreen::Cards => render_cards(frame, app, chunks[2]),
        CurrentScreen::Main | CurrentScreen::Exiting => {
            let columns = Layout::horizontal([
                Constraint::Length(TRENDING_WIDTH),
                Constraint::Min(1),
            ])
            .split(chunks[2]);
            render_trending(frame, app, columns[0]);
            render_main_content(frame, app, columns[1]);
        }
    }

    render_footer(frame, app, chunks[3]);

    if app.current_screen == CurrentScreen::Exiting {
        render_quit_popup(frame);
    }
}

fn render_quit_popup(frame: &mut Frame) {
    let area = centered(frame.area(), 30, 5);
    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quit? (y/n)",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title("Exit").borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
