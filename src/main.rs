use std::io::{self, Stderr};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;
use tracing::{info, warn};

use cinema_search::app::analytics::{AppwriteClient, NoopAnalytics, SearchAnalytics};
use cinema_search::app::tmdb::TmdbClient;
use cinema_search::app::{App, CurrentScreen};
use cinema_search::config::Config;
use cinema_search::logging::init_tracing;
use cinema_search::ui;

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let log_path = init_tracing()?;
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    info!("Logging to {}", log_path.display());

    let config = Config::from_env()?;
    let movie_api = Arc::new(TmdbClient::new(&config.tmdb));
    let analytics: Arc<dyn SearchAnalytics> = match &config.analytics {
        Some(appwrite) => Arc::new(AppwriteClient::new(appwrite)),
        None => Arc::new(NoopAnalytics),
    };

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let picker = Picker::from_query_stdio().unwrap_or_else(|e| {
        warn!("Terminal graphics query failed ({:?}), using half blocks", e);
        Picker::halfblocks()
    });

    let mut app = App::new(movie_api, analytics, &config.ui).with_picker(picker);
    app.mount();
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Exiting after error: {:#}", e);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if handle_key(app, key) {
                    info!("Quitting");
                    return Ok(());
                }
            }
        }
    }
}

/// Applies one key press. Returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if app.searching {
        let now = Instant::now();
        match key.code {
            KeyCode::Char(c) => app.push_search_char(c, now),
            KeyCode::Backspace => app.pop_search_char(now),
            KeyCode::Enter => app.submit_search(),
            KeyCode::Esc => app.searching = false,
            _ => {}
        }
        return false;
    }

    match app.current_screen {
        CurrentScreen::Main => match key.code {
            KeyCode::Char('q') => app.current_screen = CurrentScreen::Exiting,
            KeyCode::Char('/') | KeyCode::Char('s') => app.searching = true,
            KeyCode::Char('c') => app.current_screen = CurrentScreen::Cards,
            KeyCode::Down | KeyCode::Char('j') => app.next_movie(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_movie(),
            KeyCode::Right | KeyCode::Char('l') => app.next_page(),
            KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
            KeyCode::Enter => app.open_selected_movie(),
            _ => {}
        },
        CurrentScreen::MovieDetail => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('b') => app.close_detail(),
            _ => {}
        },
        CurrentScreen::Cards => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('b') => app.current_screen = CurrentScreen::Main,
            KeyCode::Right | KeyCode::Tab => app.next_card(),
            KeyCode::Left | KeyCode::BackTab => app.previous_card(),
            KeyCode::Char(' ') | KeyCode::Enter => app.click_selected_card(),
            KeyCode::Char('l') => app.toggle_selected_like(),
            _ => {}
        },
        CurrentScreen::Exiting => match key.code {
            KeyCode::Char('y') => return true,
            KeyCode::Char('n') | KeyCode::Esc => app.current_screen = CurrentScreen::Main,
            _ => {}
        },
    }
    false
}
