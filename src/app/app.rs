use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use image::DynamicImage;
use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

use crate::app::analytics::{SearchAnalytics, TrendingEntry};
use crate::app::cards::{LikeCard, demo_cards};
use crate::app::debounce::Debouncer;
use crate::app::error::FetchError;
use crate::app::tmdb::{Movie, MovieApi, MoviePage};
use crate::app::utils::clamp_page;
use crate::config::UiSettings;

/// Upper bound on how long the event loop blocks waiting for input.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Results reported back to the UI thread by background workers.
pub enum AppMessage {
    MoviesFetched {
        request_id: u64,
        term: String,
        outcome: Result<MoviePage, FetchError>,
    },
    TrendingFetched(anyhow::Result<Vec<TrendingEntry>>),
    PosterFetched {
        movie_id: u64,
        outcome: anyhow::Result<DynamicImage>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Main,
    MovieDetail,
    Cards,
    Exiting,
}

pub struct App {
    pub current_screen: CurrentScreen,

    // search box
    pub searching: bool,
    pub search_term: String,
    pub debounced_term: String,
    debouncer: Debouncer<String>,

    // fetch cycle
    pub movies: Vec<Movie>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    latest_request: u64,

    pub selected_movie_index: usize,
    pub list_state: ListState,

    pub trending: Vec<TrendingEntry>,
    pub trending_loading: bool,
    pub trending_fetched_at: Option<DateTime<Local>>,
    trending_limit: usize,

    /// The movie the detail screen was opened on; survives result refreshes.
    pub detail_movie: Option<Movie>,
    pub picker: Option<Picker>,
    pub poster_protocol: Option<StatefulProtocol>,
    pub loading_poster: bool,
    poster_for: Option<u64>,

    pub cards: Vec<LikeCard>,
    pub selected_card: usize,

    pub throbber_state: ThrobberState,

    movie_api: Arc<dyn MovieApi>,
    analytics: Arc<dyn SearchAnalytics>,
    sender: mpsc::Sender<AppMessage>,
    receiver: mpsc::Receiver<AppMessage>,
}

impl App {
    pub fn new(
        movie_api: Arc<dyn MovieApi>,
        analytics: Arc<dyn SearchAnalytics>,
        settings: &UiSettings,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();

        Self {
            current_screen: CurrentScreen::Main,
            searching: false,
            search_term: String::new(),
            debounced_term: String::new(),
            debouncer: Debouncer::new(settings.debounce),
            movies: Vec::new(),
            is_loading: false,
            error_message: None,
            current_page: 1,
            total_pages: 1,
            latest_request: 0,
            selected_movie_index: 0,
            list_state: ListState::default(),
            trending: Vec::new(),
            trending_loading: false,
            trending_fetched_at: None,
            trending_limit: settings.trending_limit,
            detail_movie: None,
            picker: None,
            poster_protocol: None,
            loading_poster: false,
            poster_for: None,
            cards: demo_cards(),
            selected_card: 0,
            throbber_state: ThrobberState::default(),
            movie_api,
            analytics,
            sender,
            receiver,
        }
    }

    /// Enables poster rendering on the detail screen.
    pub fn with_picker(mut self, picker: Picker) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Kicks off the one-time trending fetch and the first page of popular movies.
    pub fn mount(&mut self) {
        self.fetch_trending();
        self.fetch_movies();
    }

    /// One turn of the event loop: settle the debouncer and apply worker results.
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now) {
            self.set_debounced_term(term);
        }
        self.process_pending();
        self.throbber_state.calc_next();
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.debouncer
            .time_remaining(now)
            .map_or(MAX_POLL, |left| left.min(MAX_POLL))
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.trending_loading || self.loading_poster
    }

    // ---- search box ----

    pub fn update_search_term(&mut self, term: String, now: Instant) {
        self.search_term = term.clone();
        self.debouncer.push(term, now);
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        let mut term = self.search_term.clone();
        term.push(c);
        self.update_search_term(term, now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        let mut term = self.search_term.clone();
        if term.pop().is_some() {
            self.update_search_term(term, now);
        }
    }

    /// Applies whatever is typed right away instead of waiting out the debounce.
    pub fn submit_search(&mut self) {
        self.searching = false;
        if let Some(term) = self.debouncer.flush() {
            self.set_debounced_term(term);
        }
    }

    /// True while typed text is still waiting out the quiet period.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_debounced_term(&mut self, term: String) {
        if term.trim() == self.debounced_term.trim() {
            self.debounced_term = term;
            return;
        }
        debug!("Debounced search term -> '{}'", term);
        self.debounced_term = term;
        self.current_page = 1;
        self.fetch_movies();
    }

    // ---- fetch cycle ----

    /// Starts a fetch for the current term and page; any older fetch still running becomes stale.
    pub fn fetch_movies(&mut self) {
        self.latest_request += 1;
        self.is_loading = true;
        self.error_message = None;

        let request_id = self.latest_request;
        let term = self.debounced_term.trim().to_string();
        let page = self.current_page;
        let api = Arc::clone(&self.movie_api);
        let sender = self.sender.clone();

        thread::spawn(move || {
            let outcome = api.fetch_movies(&term, page);
            let _ = sender.send(AppMessage::MoviesFetched {
                request_id,
                term,
                outcome,
            });
        });
    }

    fn fetch_trending(&mut self) {
        self.trending_loading = true;
        let analytics = Arc::clone(&self.analytics);
        let limit = self.trending_limit;
        let sender = self.sender.clone();

        thread::spawn(move || {
            let _ = sender.send(AppMessage::TrendingFetched(analytics.trending(limit)));
        });
    }

    /// Applies every message already waiting. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
            handled += 1;
        }
        handled
    }

    /// Blocks for at most `timeout` on the next worker result. For headless drivers.
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(message) => {
                self.handle_message(message);
                true
            }
            Err(_) => false,
        }
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::MoviesFetched {
                request_id,
                term,
                outcome,
            } => {
                if request_id != self.latest_request {
                    debug!(
                        "Discarding stale results for request {} (latest is {})",
                        request_id, self.latest_request
                    );
                    return;
                }
                self.is_loading = false;
                match outcome {
                    Ok(page) => self.apply_page(term, page),
                    Err(err) => {
                        warn!("Error fetching movies for '{}': {}", term, err);
                        self.movies.clear();
                        self.error_message = Some(err.user_message().to_string());
                        self.reset_selection();
                    }
                }
            }
            AppMessage::TrendingFetched(outcome) => {
                self.trending_loading = false;
                match outcome {
                    Ok(entries) => {
                        info!("Loaded {} trending searches", entries.len());
                        self.trending = entries;
                        self.trending_fetched_at = Some(Local::now());
                    }
                    Err(err) => warn!("Error fetching trending movies: {:#}", err),
                }
            }
            AppMessage::PosterFetched { movie_id, outcome } => {
                if self.poster_for != Some(movie_id) {
                    return;
                }
                self.loading_poster = false;
                match outcome {
                    Ok(img) => {
                        self.poster_protocol =
                            self.picker.as_ref().map(|p| p.new_resize_protocol(img));
                    }
                    Err(err) => warn!("Failed to load poster for movie {}: {:#}", movie_id, err),
                }
            }
        }
    }

    fn apply_page(&mut self, term: String, page: MoviePage) {
        debug!(
            "Showing page {} of {} ({} movies)",
            page.page,
            page.total_pages,
            page.movies.len()
        );
        self.total_pages = page.total_pages.max(1);
        self.movies = page.movies;
        self.error_message = None;
        self.reset_selection();

        if !term.is_empty() {
            if let Some(first) = self.movies.first() {
                spawn_record_search(Arc::clone(&self.analytics), term, first.clone());
            }
        }

        let clamped = clamp_page(self.current_page, self.total_pages);
        if clamped != self.current_page {
            self.current_page = clamped;
            self.fetch_movies();
        }
    }

    // ---- pagination ----

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn shows_pagination(&self) -> bool {
        !self.movies.is_empty()
    }

    pub fn previous_page(&mut self) {
        let page = clamp_page(self.current_page.saturating_sub(1), self.total_pages);
        if page != self.current_page {
            self.current_page = page;
            self.fetch_movies();
        }
    }

    pub fn next_page(&mut self) {
        let page = clamp_page(self.current_page.saturating_add(1), self.total_pages);
        if page != self.current_page {
            self.current_page = page;
            self.fetch_movies();
        }
    }

    // ---- selection ----

    fn reset_selection(&mut self) {
        self.selected_movie_index = 0;
        self.list_state
            .select(if self.movies.is_empty() { None } else { Some(0) });
    }

    pub fn next_movie(&mut self) {
        let movie_count = self.movies.len();
        if movie_count == 0 {
            return;
        }

        self.selected_movie_index = (self.selected_movie_index + 1) % movie_count;
        self.list_state.select(Some(self.selected_movie_index));
    }

    pub fn previous_movie(&mut self) {
        let movie_count = self.movies.len();
        if movie_count == 0 {
            return;
        }

        if self.selected_movie_index == 0 {
            self.selected_movie_index = movie_count - 1;
        } else {
            self.selected_movie_index -= 1;
        }
        self.list_state.select(Some(self.selected_movie_index));
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies.get(self.selected_movie_index)
    }

    // ---- detail screen ----

    pub fn open_selected_movie(&mut self) {
        let Some(movie) = self.selected_movie().cloned() else {
            return;
        };
        self.current_screen = CurrentScreen::MovieDetail;
        self.poster_protocol = None;
        self.poster_for = Some(movie.id);
        self.detail_movie = Some(movie.clone());

        let (Some(_), Some(url)) = (&self.picker, movie.poster_url()) else {
            self.loading_poster = false;
            return;
        };

        self.loading_poster = true;
        let api = Arc::clone(&self.movie_api);
        let sender = self.sender.clone();
        let movie_id = movie.id;

        thread::spawn(move || {
            let outcome = api
                .fetch_poster(&url)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| image::load_from_memory(&bytes).map_err(anyhow::Error::from));
            let _ = sender.send(AppMessage::PosterFetched { movie_id, outcome });
        });
    }

    pub fn close_detail(&mut self) {
        self.current_screen = CurrentScreen::Main;
        self.detail_movie = None;
        self.poster_for = None;
        self.poster_protocol = None;
        self.loading_poster = false;
    }

    // ---- card board ----

    pub fn next_card(&mut self) {
        if !self.cards.is_empty() {
            self.selected_card = (self.selected_card + 1) % self.cards.len();
        }
    }

    pub fn previous_card(&mut self) {
        if !self.cards.is_empty() {
            self.selected_card = (self.selected_card + self.cards.len() - 1) % self.cards.len();
        }
    }

    pub fn click_selected_card(&mut self) {
        if let Some(card) = self.cards.get_mut(self.selected_card) {
            card.click();
        }
    }

    pub fn toggle_selected_like(&mut self) {
        if let Some(card) = self.cards.get_mut(self.selected_card) {
            card.toggle_like();
        }
    }
}

/// Records a search on a detached thread.
///
/// Errors are logged and never reach the caller; nothing is retried.
pub fn spawn_record_search(analytics: Arc<dyn SearchAnalytics>, term: String, first: Movie) {
    thread::spawn(move || {
        if let Err(err) = analytics.record_search(&term, &first) {
            warn!("Failed to record search '{}': {:#}", term, err);
        }
    });
}
