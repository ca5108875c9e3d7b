use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::app::error::FetchError;
use crate::app::utils::{clamp_page, send_text};
use crate::config::TmdbConfig;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
/// TMDB rejects any page above this.
pub const MAX_PAGES: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl Movie {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{POSTER_BASE}{p}"))
    }

    /// Release year, when TMDB knows the release date.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
    }
}

/// One decoded page of movie results.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
}

/// Source of movie listings and poster images.
pub trait MovieApi: Send + Sync {
    /// Searches when `query` has any non-blank text, otherwise lists popular movies.
    fn fetch_movies(&self, query: &str, page: u32) -> Result<MoviePage, FetchError>;
    fn fetch_poster(&self, poster_url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }
}

impl MovieApi for TmdbClient {
    fn fetch_movies(&self, query: &str, page: u32) -> Result<MoviePage, FetchError> {
        let url = movies_url(&self.base_url, query, page);
        info!("Fetching movies: query='{}' page={}", query.trim(), page);

        let request = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json");
        let body = send_text(request)?;
        parse_movie_page(&body)
    }

    fn fetch_poster(&self, poster_url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(poster_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: poster_url.to_string(),
                status,
                body: String::new(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Builds the search URL for a non-blank query and the discover URL otherwise.
pub fn movies_url(base_url: &str, query: &str, page: u32) -> String {
    let query = query.trim();
    if query.is_empty() {
        format!("{base_url}/discover/movie?sort_by=popularity.desc&page={page}")
    } else {
        format!(
            "{base_url}/search/movie?query={}&page={page}",
            urlencoding::encode(query)
        )
    }
}

#[derive(Deserialize)]
struct MovieListResponse {
    #[serde(default)]
    results: Vec<Movie>,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    success: Option<bool>,
    status_message: Option<String>,
    #[serde(alias = "Response")]
    response: Option<Value>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl MovieListResponse {
    fn reports_failure(&self) -> bool {
        let flagged = match &self.response {
            Some(Value::Bool(ok)) => !ok,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("false"),
            _ => false,
        };
        flagged || self.success == Some(false)
    }
}

/// Decodes a listing body, rejecting bodies that flag an API-level failure.
pub fn parse_movie_page(body: &str) -> Result<MoviePage, FetchError> {
    let data: MovieListResponse = serde_json::from_str(body)?;

    if data.reports_failure() {
        let message = data
            .status_message
            .or(data.error)
            .unwrap_or_else(|| "Failed to fetch movies".to_string());
        return Err(FetchError::Application(message));
    }

    Ok(MoviePage {
        movies: data.results,
        page: data.page.max(1),
        total_pages: clamp_page(data.total_pages, MAX_PAGES),
    })
}
