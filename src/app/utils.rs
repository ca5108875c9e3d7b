use reqwest::blocking::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::app::error::FetchError;

/// Sends a request and decodes a JSON body, treating non-2xx statuses as errors.
pub fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let text = send_text(request)?;
    Ok(serde_json::from_str(&text)?)
}

/// Sends a request and returns the raw body, treating non-2xx statuses as errors.
pub fn send_text(request: RequestBuilder) -> Result<String, FetchError> {
    let response = request.send()?;
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text()?;
    debug!("{} -> {}", url, status);

    if !status.is_success() {
        return Err(FetchError::Status { url, status, body });
    }
    Ok(body)
}

/// Keeps an integer inside `[1, max]`.
pub fn clamp_page(page: u32, max: u32) -> u32 {
    page.clamp(1, max.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_respects_both_bounds() {
        assert_eq!(clamp_page(0, 10), 1);
        assert_eq!(clamp_page(4, 10), 4);
        assert_eq!(clamp_page(11, 10), 10);
    }

    #[test]
    fn clamp_page_treats_zero_pages_as_one() {
        assert_eq!(clamp_page(3, 0), 1);
    }
}
