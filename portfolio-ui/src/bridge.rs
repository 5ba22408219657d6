use gloo_net::http::Request;
use portfolio_core::{Fetch, FetchError};

/// `fetch()`-backed GET.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFetch;

impl Fetch for HttpFetch {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
