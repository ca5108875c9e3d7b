use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::app::analytics::DEFAULT_TRENDING_LIMIT;
use crate::app::tmdb::TMDB_BASE;

pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: Option<String>,
}

/// Knobs the controller itself reads.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    pub debounce: Duration,
    pub trending_limit: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub tmdb: TmdbConfig,
    /// `None` turns search analytics off.
    pub analytics: Option<AppwriteConfig>,
    pub ui: UiSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let Some(api_token) = var("TMDB_API_TOKEN") else {
            bail!("Missing required environment variable: TMDB_API_TOKEN");
        };
        let tmdb = TmdbConfig {
            base_url: var("TMDB_BASE_URL").unwrap_or_else(|| TMDB_BASE.to_string()),
            api_token,
        };

        let analytics = match (
            var("APPWRITE_PROJECT_ID"),
            var("APPWRITE_DATABASE_ID"),
            var("APPWRITE_COLLECTION_ID"),
        ) {
            (Some(project_id), Some(database_id), Some(collection_id)) => Some(AppwriteConfig {
                endpoint: var("APPWRITE_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_APPWRITE_ENDPOINT.to_string()),
                project_id,
                database_id,
                collection_id,
                api_key: var("APPWRITE_API_KEY"),
            }),
            _ => {
                warn!("Appwrite not fully configured, search analytics disabled");
                None
            }
        };

        let debounce_ms: u64 = parse_or(var("SEARCH_DEBOUNCE_MS"), "SEARCH_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?;
        let trending_limit: usize = parse_or(var("TRENDING_LIMIT"), "TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT)?;

        Ok(Self {
            tmdb,
            analytics,
            ui: UiSettings {
                debounce: Duration::from_millis(debounce_ms),
                trending_limit,
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {key} value: '{raw}'")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
