use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use nl_core::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize)]
struct EnrichmentRequest<'a> {
    words: &'a [String],
}

#[derive(Deserialize)]
struct EnrichmentResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Lemma-to-detail lookup the pipeline runs once per crawl batch.
#[async_trait]
pub trait Enrichment: Send + Sync {
    async fn lookup(&self, words: &[String]) -> HashMap<String, serde_json::Value>;
}

/// Client for the optional word-enrichment service. Any failure degrades
/// to "no enrichment" instead of failing the cycle.
pub struct EnrichmentClient {
    client: Client,
    endpoint: String,
}

impl EnrichmentClient {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, endpoint })
    }

    async fn request(&self, words: &[String]) -> Result<HashMap<String, serde_json::Value>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EnrichmentRequest { words })
            .send()
            .await?
            .error_for_status()?;
        let body: EnrichmentResponse = response.json().await?;

        let mut map = HashMap::new();
        for entry in body.results {
            if let Some(word) = entry.get("word").and_then(|w| w.as_str()) {
                map.insert(word.to_string(), entry.clone());
            }
        }
        Ok(map)
    }
}

#[async_trait]
impl Enrichment for EnrichmentClient {
    /// Look up detail for a set of lemmas. A lemma absent from the
    /// response simply has no enrichment available.
    async fn lookup(&self, words: &[String]) -> HashMap<String, serde_json::Value> {
        if words.is_empty() {
            return HashMap::new();
        }
        match self.request(words).await {
            Ok(map) => map,
            Err(e) => {
                warn!("enrichment lookup failed, continuing without detail: {}", e);
                HashMap::new()
            }
        }
    }
}
