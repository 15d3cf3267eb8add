//! Transport seam shared by all service clients.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request error: {0:#}")]
    Request(#[from] reqwest::Error),

    #[error("request error: {0:#}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Performs a single GET and returns the raw body.
///
/// The municipal services are too inconsistent to deserialize at this level:
/// callers decide what the body should parse as, and whether a parse failure
/// is worth another attempt.
#[async_trait]
pub trait Fetch {
    async fn fetch_text(&self, url: &Url) -> Result<String, TransportError>;
}

#[async_trait]
impl Fetch for ClientWithMiddleware {
    async fn fetch_text(&self, url: &Url) -> Result<String, TransportError> {
        let response = self.get(url.clone()).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
