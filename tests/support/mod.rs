#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cinema_search::app::analytics::{SearchAnalytics, TrendingEntry};
use cinema_search::app::error::FetchError;
use cinema_search::app::tmdb::{Movie, MovieApi, MoviePage};
use cinema_search::app::App;
use cinema_search::config::UiSettings;

pub fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        overview: Some(format!("{title} overview")),
        release_date: Some("2008-07-16".to_string()),
        vote_average: Some(8.5),
        original_language: Some("en".to_string()),
    }
}

pub struct FakeMovies {
    pub per_page: usize,
    pub total_pages: u32,
    pub fail_discover: bool,
    pub slow_terms: Vec<String>,
    /// Replaces `total_pages` in later responses, as if the result set shrank.
    pub shrink_to: Mutex<Option<u32>>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl Default for FakeMovies {
    fn default() -> Self {
        Self {
            per_page: 20,
            total_pages: 10,
            fail_discover: false,
            slow_terms: Vec::new(),
            shrink_to: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeMovies {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl MovieApi for FakeMovies {
    fn fetch_movies(&self, query: &str, page: u32) -> Result<MoviePage, FetchError> {
        self.calls.lock().unwrap().push((query.to_string(), page));

        if self.slow_terms.iter().any(|t| t == query) {
            thread::sleep(Duration::from_millis(300));
        }
        if query.is_empty() && self.fail_discover {
            return Err(FetchError::Application("discover unavailable".to_string()));
        }
        if query == "nothing" {
            return Ok(MoviePage {
                movies: Vec::new(),
                page: 1,
                total_pages: 1,
            });
        }

        let total_pages = self.shrink_to.lock().unwrap().unwrap_or(self.total_pages);
        let label = if query.is_empty() { "popular" } else { query };
        let movies = (0..self.per_page)
            .map(|i| movie(page as u64 * 100 + i as u64, &format!("{label} {i}")))
            .collect();
        Ok(MoviePage {
            movies,
            page,
            total_pages,
        })
    }

    fn fetch_poster(&self, _poster_url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Application("no posters in tests".to_string()))
    }
}

#[derive(Default)]
pub struct FakeAnalytics {
    pub fail_trending: bool,
    pub fail_record: bool,
    pub entries: Vec<TrendingEntry>,
    pub recorded: Mutex<Vec<(String, u64)>>,
}

impl FakeAnalytics {
    pub fn recorded_terms(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .map(|(term, _)| term.clone())
            .collect()
    }
}

impl SearchAnalytics for FakeAnalytics {
    fn record_search(&self, term: &str, movie: &Movie) -> anyhow::Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .push((term.to_string(), movie.id));
        if self.fail_record {
            anyhow::bail!("store is read-only");
        }
        Ok(())
    }

    fn trending(&self, limit: usize) -> anyhow::Result<Vec<TrendingEntry>> {
        if self.fail_trending {
            anyhow::bail!("trending unavailable");
        }
        Ok(self.entries.iter().take(limit).cloned().collect())
    }
}

pub fn trending_entry(id: &str, title: &str, count: u64) -> TrendingEntry {
    TrendingEntry {
        id: id.to_string(),
        title: title.to_string(),
        search_term: title.to_lowercase(),
        poster_url: None,
        search_count: count,
    }
}

pub fn build_app(movies: &Arc<FakeMovies>, analytics: &Arc<FakeAnalytics>) -> App {
    App::new(movies.clone(), analytics.clone(), &UiSettings::default())
}

/// Pumps worker results until nothing is in flight.
pub fn settle(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.is_busy() && Instant::now() < deadline {
        app.wait_for_message(Duration::from_millis(50));
    }
    assert!(!app.is_busy(), "app did not settle in time");
}

/// Waits for fire-and-forget recordings to land.
pub fn wait_for_recordings(analytics: &FakeAnalytics, expected: usize) -> Vec<String> {
    let deadline = Instant::now() + Duration::from_secs(2);
    while analytics.recorded.lock().unwrap().len() < expected && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    analytics.recorded_terms()
}
