use reqwest::StatusCode;
use thiserror::Error;

/// The one message the user ever sees for a failed movie fetch.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API reported failure: {0}")]
    Application(String),
}

impl FetchError {
    /// Transport and application failures are deliberately indistinguishable here.
    pub fn user_message(&self) -> &'static str {
        FETCH_ERROR_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_collapses_to_the_same_user_message() {
        let status = FetchError::Status {
            url: "https://example.test/discover/movie".to_string(),
            status: StatusCode::UNAUTHORIZED,
            body: "{}".to_string(),
        };
        let application = FetchError::Application("Invalid API key".to_string());
        let decode = FetchError::from(serde_json::from_str::<u32>("nope").unwrap_err());

        assert_eq!(status.user_message(), FETCH_ERROR_MESSAGE);
        assert_eq!(application.user_message(), FETCH_ERROR_MESSAGE);
        assert_eq!(decode.user_message(), FETCH_ERROR_MESSAGE);
    }

    #[test]
    fn status_error_names_the_url() {
        let err = FetchError::Status {
            url: "https://example.test/search/movie".to_string(),
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("search/movie"));
        assert!(text.contains("404"));
    }
}
