use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::error::{AppError, Result};

/// Prefix turning a location into a competitor search.
pub const CLINIC_QUERY_PREFIX: &str = "top dental clinics in ";

/// Anchor class DuckDuckGo's HTML endpoint puts on organic result links.
const RESULT_LINK_SELECTOR: &str = "a.result__a";

/// A single search result from DuckDuckGo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Finds competitor clinics by scraping DuckDuckGo's HTML results page
#[derive(Clone)]
pub struct ClinicFinder {
    client: Client,
    base_url: String,
    default_max_results: usize,
    timeout: std::time::Duration,
}

impl ClinicFinder {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.search_base_url.clone(),
            default_max_results: settings.default_max_results,
            timeout: settings.search_timeout,
        })
    }

    /// Search for dental clinics near `location`.
    ///
    /// `None` uses the configured default result count.
    pub async fn search_clinics_near(
        &self,
        location: &str,
        max_results: Option<usize>,
    ) -> Vec<SearchResult> {
        let query = format!("{}{}", CLINIC_QUERY_PREFIX, location);
        self.search(&query, max_results.unwrap_or(self.default_max_results))
            .await
    }

    /// Search DuckDuckGo and return at most `max_results` parsed results.
    ///
    /// Every failure is logged and reported as an empty list, so callers
    /// cannot tell "nothing found" from "search failed".
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        match self.try_search(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                error!(query = %query, error = %e, "Clinic search failed");
                vec![]
            }
        }
    }

    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::BadRequest("Search query cannot be empty".into()));
        }
        if max_results == 0 {
            return Ok(vec![]);
        }

        info!(query = %query, max_results = %max_results, "Performing clinic search");

        let url = build_search_url(&self.base_url, query);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Search returned non-success status");
            return Err(AppError::Internal(format!(
                "Search failed with status: {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read response: {}", e)))?;

        let results = parse_results(&html, max_results)?;

        info!(count = results.len(), query = %query, "Search completed");

        Ok(results)
    }
}

/// Append the encoded query to the provider URL, rendering spaces as `+`.
pub fn build_search_url(base_url: &str, query: &str) -> String {
    let encoded_query = urlencoding::encode(query).replace("%20", "+");
    format!("{}?q={}", base_url, encoded_query)
}

/// Extract (title, href) pairs from result anchors in document order.
fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse(RESULT_LINK_SELECTOR)
        .map_err(|e| AppError::Internal(format!("Invalid result selector: {}", e)))?;

    let mut results = Vec::new();

    for link in document.select(&link_selector) {
        if results.len() >= max_results {
            break;
        }

        let title = link.text().collect::<String>().trim().to_string();
        let href = link.value().attr("href").unwrap_or_default();

        // Skip results without title or URL
        if title.is_empty() || href.trim().is_empty() {
            continue;
        }

        results.push(SearchResult {
            title,
            url: href.to_string(),
        });
    }

    Ok(results)
}

/// Format search results as `- title: url` lines for the marketing prompt
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| format!("- {}: {}", result.title, result.url))
        .collect::<Vec<_>>()
        .join("\n")
}
