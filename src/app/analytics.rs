use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::app::tmdb::Movie;
use crate::app::utils::send_json;
use crate::config::AppwriteConfig;

pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// A past search ranked by how often it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: String,
    pub title: String,
    pub search_term: String,
    pub poster_url: Option<String>,
    pub search_count: u64,
}

/// Remote store of search counts.
pub trait SearchAnalytics: Send + Sync {
    /// Bumps the counter for `term`, creating the record with `movie`'s poster and title if absent.
    fn record_search(&self, term: &str, movie: &Movie) -> Result<()>;
    /// Most searched terms, highest count first.
    fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>>;
}

/// Stands in when no analytics store is configured.
#[derive(Debug, Default, Clone)]
pub struct NoopAnalytics;

impl SearchAnalytics for NoopAnalytics {
    fn record_search(&self, term: &str, _movie: &Movie) -> Result<()> {
        debug!("Analytics disabled, not recording '{}'", term);
        Ok(())
    }

    fn trending(&self, _limit: usize) -> Result<Vec<TrendingEntry>> {
        Ok(Vec::new())
    }
}

/// Appwrite document database client.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    client: Client,
    documents_url: String,
    project_id: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<MetricDocument>,
}

#[derive(Debug, Deserialize)]
struct MetricDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl From<MetricDocument> for TrendingEntry {
    fn from(doc: MetricDocument) -> Self {
        Self {
            title: doc.title.unwrap_or_else(|| doc.search_term.clone()),
            id: doc.id,
            search_term: doc.search_term,
            poster_url: doc.poster_url,
            search_count: doc.count,
        }
    }
}

impl AppwriteClient {
    pub fn new(config: &AppwriteConfig) -> Self {
        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            config.database_id,
            config.collection_id
        );
        Self {
            client: Client::new(),
            documents_url,
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-Appwrite-Project", &self.project_id);
        match &self.api_key {
            Some(key) => request.header("X-Appwrite-Key", key),
            None => request,
        }
    }

    fn list_documents(&self, queries: &[Value]) -> Result<Vec<MetricDocument>> {
        let url = list_url(&self.documents_url, queries);
        let list: DocumentList = send_json(self.authorize(self.client.get(&url)))
            .context("listing search metrics failed")?;
        Ok(list.documents)
    }
}

impl SearchAnalytics for AppwriteClient {
    fn record_search(&self, term: &str, movie: &Movie) -> Result<()> {
        let existing = self.list_documents(&lookup_queries(term))?;

        match plan_record(existing.first(), term, movie) {
            RecordPlan::Increment { document_id, body } => {
                let url = format!("{}/{}", self.documents_url, document_id);
                let _: Value = send_json(self.authorize(self.client.patch(&url).json(&body)))
                    .with_context(|| format!("updating count for '{}' failed", term))?;
                debug!("Search '{}' counted again", term);
            }
            RecordPlan::Create { body } => {
                let _: Value =
                    send_json(self.authorize(self.client.post(&self.documents_url).json(&body)))
                        .with_context(|| format!("creating metric for '{}' failed", term))?;
                info!("Recorded first search for '{}'", term);
            }
        }
        Ok(())
    }

    fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>> {
        let documents = self.list_documents(&trending_queries(limit))?;
        Ok(documents.into_iter().map(TrendingEntry::from).collect())
    }
}

/// The write `record_search` sends, decided from what the lookup found.
#[derive(Debug, PartialEq)]
enum RecordPlan {
    Increment { document_id: String, body: Value },
    Create { body: Value },
}

fn plan_record(existing: Option<&MetricDocument>, term: &str, movie: &Movie) -> RecordPlan {
    match existing {
        Some(doc) => RecordPlan::Increment {
            document_id: doc.id.clone(),
            body: json!({"data": {"count": doc.count + 1}}),
        },
        None => RecordPlan::Create {
            body: json!({
                "documentId": "unique()",
                "data": {
                    "searchTerm": term,
                    "count": 1,
                    "movie_id": movie.id,
                    "poster_url": movie.poster_url(),
                    "title": movie.title,
                }
            }),
        },
    }
}

fn lookup_queries(term: &str) -> Vec<Value> {
    vec![
        json!({"method": "equal", "attribute": "searchTerm", "values": [term]}),
        json!({"method": "limit", "values": [1]}),
    ]
}

fn trending_queries(limit: usize) -> Vec<Value> {
    vec![
        json!({"method": "orderDesc", "attribute": "count"}),
        json!({"method": "limit", "values": [limit]}),
    ]
}

/// Appends each query as a JSON-encoded `queries[]` parameter.
fn list_url(documents_url: &str, queries: &[Value]) -> String {
    let params: Vec<String> = queries
        .iter()
        .map(|q| format!("queries%5B%5D={}", urlencoding::encode(&q.to_string())))
        .collect();
    if params.is_empty() {
        documents_url.to_string()
    } else {
        format!("{}?{}", documents_url, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppwriteConfig {
        AppwriteConfig {
            endpoint: "https://cloud.appwrite.io/v1/".to_string(),
            project_id: "proj".to_string(),
            database_id: "db".to_string(),
            collection_id: "metrics".to_string(),
            api_key: None,
        }
    }

    #[test]
    fn documents_url_is_built_from_config() {
        let client = AppwriteClient::new(&config());
        assert_eq!(
            client.documents_url,
            "https://cloud.appwrite.io/v1/databases/db/collections/metrics/documents"
        );
    }

    #[test]
    fn queries_are_json_encoded() {
        let url = list_url(
            "http://x/documents",
            &[json!({"method": "limit", "values": [5]})],
        );
        assert_eq!(
            url,
            "http://x/documents?queries%5B%5D=%7B%22method%22%3A%22limit%22%2C%22values%22%3A%5B5%5D%7D"
        );
    }

    #[test]
    fn document_without_title_falls_back_to_search_term() {
        let list: DocumentList = serde_json::from_str(
            r#"{"total": 2, "documents": [
                {"$id": "a1", "searchTerm": "batman", "count": 12,
                 "poster_url": "https://image.tmdb.org/t/p/w500/b.jpg", "title": "Batman"},
                {"$id": "b2", "searchTerm": "alien", "count": 3}
            ]}"#,
        )
        .unwrap();
        let entries: Vec<TrendingEntry> = list.documents.into_iter().map(Into::into).collect();

        assert_eq!(entries[0].title, "Batman");
        assert_eq!(entries[0].search_count, 12);
        assert_eq!(entries[1].title, "alien");
        assert_eq!(entries[1].poster_url, None);
    }

    fn heat() -> Movie {
        Movie {
            id: 949,
            title: "Heat".to_string(),
            poster_path: Some("/heat.jpg".to_string()),
            overview: None,
            release_date: None,
            vote_average: None,
            original_language: None,
        }
    }

    #[test]
    fn known_term_is_incremented() {
        let doc = MetricDocument {
            id: "doc-7".to_string(),
            search_term: "heat".to_string(),
            count: 4,
            poster_url: None,
            title: Some("Heat".to_string()),
        };

        let plan = plan_record(Some(&doc), "heat", &heat());
        assert_eq!(
            plan,
            RecordPlan::Increment {
                document_id: "doc-7".to_string(),
                body: json!({"data": {"count": 5}}),
            }
        );
    }

    #[test]
    fn unknown_term_is_created_with_first_result() {
        let RecordPlan::Create { body } = plan_record(None, "heat", &heat()) else {
            panic!("expected a create");
        };
        assert_eq!(body["documentId"], "unique()");
        assert_eq!(
            body["data"],
            json!({
                "searchTerm": "heat",
                "count": 1,
                "movie_id": 949,
                "poster_url": "https://image.tmdb.org/t/p/w500/heat.jpg",
                "title": "Heat",
            })
        );
    }

    #[test]
    fn lookup_matches_the_exact_term_once() {
        assert_eq!(
            lookup_queries("heat"),
            vec![
                json!({"method": "equal", "attribute": "searchTerm", "values": ["heat"]}),
                json!({"method": "limit", "values": [1]}),
            ]
        );
    }

    #[test]
    fn trending_orders_by_count_descending_with_limit() {
        assert_eq!(
            trending_queries(5),
            vec![
                json!({"method": "orderDesc", "attribute": "count"}),
                json!({"method": "limit", "values": [5]}),
            ]
        );
    }

    #[test]
    fn noop_analytics_reports_nothing() {
        let movie = heat();
        assert!(NoopAnalytics.record_search("heat", &movie).is_ok());
        assert!(NoopAnalytics.trending(5).unwrap().is_empty());
    }
}
