use bon::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    fetch::Fetch,
    prelude::*,
    transparenz::{DocumentRecord, record::Package},
};

pub const ENDPOINT: &str = "https://suche.transparenz.hamburg.de/api/3/action/package_search";

/// Relevance first, freshest records second, the ranking the dossier tables
/// are built on.
const SORT: &str = "score desc, metadata_modified desc";

#[must_use]
pub struct SearchClient<F> {
    fetch: F,
    endpoint: Url,
}

impl<F: Fetch> SearchClient<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch, endpoint: Url::parse(ENDPOINT).expect("the endpoint constant must parse") }
    }

    /// Search the portal.
    ///
    /// Query operators (`OR`, quoted phrases) are the upstream index's
    /// business and pass through verbatim. Any failure, including an
    /// unsuccessful envelope, degrades to an empty sequence: the caller
    /// always renders "no documents found", never an error page.
    ///
    /// The HTTP round trip happens up front (bounded by `rows`); only the
    /// per-record normalization is lazy. The returned sequence owns its data
    /// and outlives the request — re-invoke to re-query.
    #[instrument(skip_all, fields(q = request.q, rows = request.rows))]
    pub async fn search(
        &self,
        request: &SearchRequest<'_>,
    ) -> impl Iterator<Item = DocumentRecord> + use<F> {
        info!(request.q, request.rows, "🔎 Searching…");
        let packages = match self.call(request).await {
            Ok(packages) => packages,
            Err(error) => {
                warn!("⚠️ Search for `{}` failed: {error:#}", request.q);
                Vec::new()
            }
        };
        packages.into_iter().map(DocumentRecord::from)
    }

    async fn call(&self, request: &SearchRequest<'_>) -> Result<Vec<Package>> {
        let url = {
            let query =
                serde_qs::to_string(request).context("failed to serialize the search request")?;
            let mut url = self.endpoint.clone();
            url.set_query(Some(&query));
            url
        };
        let body = self.fetch.fetch_text(&url).await?;
        let envelope: Envelope =
            serde_json::from_str(&body).context("failed to deserialize the search response")?;
        if !envelope.success {
            bail!("the portal reported an unsuccessful search");
        }
        Ok(envelope.result.results)
    }
}

#[must_use]
#[derive(Builder, Serialize)]
pub struct SearchRequest<'a> {
    pub q: &'a str,

    /// Maximum number of results.
    #[builder(default = 5)]
    pub rows: u32,

    #[builder(default = SORT)]
    pub sort: &'a str,
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,

    #[serde(default)]
    result: EnvelopeResult,
}

#[derive(Default, Deserialize)]
struct EnvelopeResult {
    #[serde(default)]
    results: Vec<Package>,
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::fetch::testing::FakeFetch;

    #[test]
    fn search_request_ok() -> Result {
        let request = SearchRequest::builder().q("Schulentwicklungsplan").rows(3).build();
        let query = serde_qs::to_string(&request)?;
        assert!(query.starts_with("q=Schulentwicklungsplan&rows=3&sort="), "query was `{query}`");
        assert!(query.contains("metadata_modified"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_result_set_is_an_empty_sequence_ok() {
        // language=json
        let body = r#"{"success": true, "result": {"results": []}}"#;
        let client = SearchClient::new(FakeFetch::new([Ok(body.to_string())]));

        let records = client.search(&SearchRequest::builder().q("").build()).await;
        assert_eq!(records.count(), 0);
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_an_empty_sequence_ok() {
        // language=json
        let body = r#"{"success": false}"#;
        let client = SearchClient::new(FakeFetch::new([Ok(body.to_string())]));

        let records = client.search(&SearchRequest::builder().q("Bebauungsplan").build()).await;
        assert_eq!(records.count(), 0);
    }

    #[tokio::test]
    async fn unreachable_service_is_an_empty_sequence_ok() {
        let client = SearchClient::new(FakeFetch::unreachable_service());
        let records = client.search(&SearchRequest::builder().q("Drucksache").build()).await;
        assert_eq!(records.count(), 0);
    }

    #[tokio::test]
    async fn records_outlive_the_request_ok() {
        // language=json
        let body = r#"{"success": true, "result": {"results": [{"title": "SEPL Altona"}]}}"#;
        let client = SearchClient::new(FakeFetch::new([Ok(body.to_string())]));

        // The request and its query string are gone before the records are
        // consumed.
        let records = {
            let query = format!(r#"Schulentwicklungsplan "{}""#, "Altona");
            let request = SearchRequest::builder().q(&query).build();
            client.search(&request).await
        };
        assert_eq!(records.count(), 1);
    }

    #[tokio::test]
    async fn records_are_normalized_ok() {
        // language=json
        let body = r#"{
            "success": true,
            "result": {
                "results": [
                    {
                        "title": "Drucksache 21/1234",
                        "metadata_modified": "2024-05-13T09:41:27.123456",
                        "url": "https://example.test/dataset/drucksache",
                        "resources": [{"format": "PDF", "url": "https://example.test/drucksache.pdf"}]
                    },
                    {
                        "title": "SEPL Altona",
                        "url": "https://example.test/dataset/sepl"
                    }
                ]
            }
        }"#;
        let client = SearchClient::new(FakeFetch::new([Ok(body.to_string())]));

        let records =
            client.search(&SearchRequest::builder().q("SEPL").rows(2).build()).await.collect_vec();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].link.as_deref(), Some("https://example.test/drucksache.pdf"));
        assert_eq!(records[1].title, "SEPL Altona");
        assert_eq!(records[1].modified, None);
    }
}
