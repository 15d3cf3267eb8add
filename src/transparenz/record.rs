use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Normalized planning record, one per raw search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRecord {
    pub title: String,

    /// Upstream modification timestamp, truncated to the day.
    pub modified: Option<NaiveDate>,

    /// Display link: the first attached PDF resource if there is one, else
    /// the result's landing page. Kept as a raw string since the portal
    /// serves empty and relative links.
    pub link: Option<String>,
}

/// Raw `package_search` result entry.
#[derive(Debug, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub title: String,

    pub metadata_modified: Option<NaiveDateTime>,

    pub url: Option<String>,

    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub format: String,

    pub url: Option<String>,
}

impl From<Package> for DocumentRecord {
    fn from(package: Package) -> Self {
        let pdf_link = package
            .resources
            .iter()
            .find(|resource| resource.format.eq_ignore_ascii_case("pdf"))
            .and_then(|resource| resource.url.clone());
        Self {
            title: package.title,
            modified: package.metadata_modified.map(|timestamp| timestamp.date()),
            link: pdf_link.or(package.url),
        }
    }
}
