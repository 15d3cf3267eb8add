//! Provides the shared HTTP client.

use std::time::Duration;

use clap::crate_version;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderValue},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::prelude::*;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared client.
///
/// Nominatim's usage policy requires a client-identifying `User-Agent`,
/// so it is set as a default header for all outgoing requests.
pub fn build_client() -> Result<ClientWithMiddleware> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(concat!(
            "schulmonitor / ",
            crate_version!(),
            " (Rust; https://github.com/koevoet1221/schulmonitor)",
        )),
    );
    let client = Client::builder()
        .gzip(true)
        .use_rustls_tls()
        .default_headers(headers)
        .timeout(DEFAULT_TIMEOUT)
        .pool_idle_timeout(Some(Duration::from_secs(600)))
        .build()
        .context("failed to build an HTTP client")?;
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(2);
    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}
