//! Wikipedia summaries
//!
//! The topic is first resolved to an article title with the opensearch API
//! (so "alan turing" finds "Alan Turing"), then the REST summary endpoint
//! provides the extract. Disambiguation pages are treated as no answer.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Title resolution through opensearch before fetching the summary
//! - 1.0.0: Initial release

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;

use crate::core::first_sentences;

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Short summary of `topic`, or `None` when nothing usable was found
    async fn lookup(&self, topic: &str, sentences: usize) -> Option<String>;
}

#[derive(Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("jarvis/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(WikipediaClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: reqwest::Url) -> Result<Value> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("Request timed out after {REQUEST_TIMEOUT:?}")
            } else if e.is_connect() {
                anyhow!("Could not connect to Wikipedia")
            } else {
                anyhow!("HTTP request failed: {e}")
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Wikipedia returned HTTP {status}"));
        }
        Ok(response.json().await?)
    }

    async fn resolve_title(&self, topic: &str) -> Result<Option<String>> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/w/api.php", self.base_url),
            &[
                ("action", "opensearch"),
                ("search", topic),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ],
        )?;
        Ok(title_from_opensearch(&self.get_json(url).await?))
    }

    async fn summary(&self, title: &str) -> Result<Option<String>> {
        let mut url = reqwest::Url::parse(&format!("{}/api/rest_v1/page/summary", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid Wikipedia base URL"))?
            .push(&title.replace(' ', "_"));
        Ok(extract_from_summary(&self.get_json(url).await?))
    }

    async fn try_lookup(&self, topic: &str) -> Result<Option<String>> {
        let Some(title) = self.resolve_title(topic).await? else {
            debug!("No Wikipedia article for '{topic}'");
            return Ok(None);
        };
        debug!("Resolved '{topic}' to article '{title}'");
        self.summary(&title).await
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn lookup(&self, topic: &str, sentences: usize) -> Option<String> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        match self.try_lookup(topic).await {
            Ok(extract) => extract.map(|text| first_sentences(&text, sentences)),
            Err(e) => {
                warn!("Wikipedia lookup for '{topic}' failed: {e:#}");
                None
            }
        }
    }
}

/// First title of an opensearch response: `[query, [titles], [descs], [urls]]`
fn title_from_opensearch(json: &Value) -> Option<String> {
    json.get(1)?
        .as_array()?
        .first()?
        .as_str()
        .map(|s| s.to_string())
}

fn extract_from_summary(json: &Value) -> Option<String> {
    if json.get("type").and_then(|t| t.as_str()) == Some("disambiguation") {
        return None;
    }
    json.get("extract")
        .and_then(|e| e.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
