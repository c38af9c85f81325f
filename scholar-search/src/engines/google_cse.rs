//! Google Custom Search JSON API client.
//!
//! One `GET` per page with `key`, `cx`, `q`, `num` and `start` parameters.
//! Items without a title or link are skipped; image candidates are taken
//! from the `pagemap` metadata in a fixed priority order.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::http::{build_client, classify_error};
use crate::types::{RawHit, SearchPage};

/// Client for the Google Custom Search JSON API.
#[derive(Debug, Clone)]
pub struct GoogleCseEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleCseEngine {
    /// Build a client from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the config is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            engine_id: config.engine_id.clone(),
        })
    }
}

impl SearchProvider for GoogleCseEngine {
    async fn fetch_page(
        &self,
        query: &str,
        start: u32,
        num: u32,
    ) -> Result<SearchPage, SearchError> {
        tracing::trace!(query, start, num, "custom search request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", &num.to_string()),
                ("start", &start.to_string()),
            ])
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_error)?;

        if !status.is_success() {
            return Err(SearchError::Http(format!(
                "custom search returned {status}: {}",
                provider_message(&body)
            )));
        }

        parse_response(&body)
    }

    fn name(&self) -> &'static str {
        "google-cse"
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
    #[serde(rename = "searchInformation", default)]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(rename = "totalResults", default)]
    total_results: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    cse_image: Vec<ImageEntry>,
    #[serde(default)]
    organization: Vec<OrganizationEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    src: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganizationEntry {
    logo: Option<String>,
}

/// Decode a Custom Search response body into a [`SearchPage`].
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not a valid response object.
pub fn parse_response(body: &str) -> Result<SearchPage, SearchError> {
    let response: CseResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid custom search response: {e}")))?;

    let total_results = response
        .search_information
        .and_then(|info| info.total_results)
        .map_or(0, |value| parse_total(&value));

    let hits = response
        .items
        .into_iter()
        .filter_map(|item| {
            let title = item.title.filter(|t| !t.trim().is_empty());
            let link = item.link.filter(|l| !l.trim().is_empty());
            let (Some(title), Some(link)) = (title, link) else {
                tracing::debug!("skipping custom search item without title or link");
                return None;
            };
            Some(RawHit {
                title,
                link,
                snippet: item.snippet,
                image_candidates: image_candidates(item.pagemap.unwrap_or_default()),
            })
        })
        .collect();

    Ok(SearchPage {
        hits,
        total_results,
    })
}

/// `totalResults` is documented as a decimal string; accept plain numbers too.
fn parse_total(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn image_candidates(pagemap: PageMap) -> Vec<String> {
    let cse = pagemap.cse_image.into_iter().next().and_then(|img| img.src);
    let logo = pagemap
        .organization
        .into_iter()
        .next()
        .and_then(|org| org.logo);
    cse.into_iter().chain(logo).collect()
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}
