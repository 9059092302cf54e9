use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use nl_core::{
    ArticleStore, EnrichedArticle, Error, KeywordEntry, KeywordExtractor, RawArticle, Result,
};
use nl_extract::VocabularyRef;
use tracing::{info, warn};

use crate::enrich::Enrichment;
use crate::registry::SourceRegistry;

/// Drives one crawl cycle: discovery, fault-isolated extraction, one
/// batched keyword pass, optional enrichment, idempotent persistence.
pub struct CrawlPipeline {
    registry: Arc<SourceRegistry>,
    extractor: Arc<dyn KeywordExtractor>,
    vocab: Arc<VocabularyRef>,
    store: Arc<dyn ArticleStore>,
    enrichment: Option<Arc<dyn Enrichment>>,
    discovery_limit: usize,
}

impl CrawlPipeline {
    pub fn new(
        registry: Arc<SourceRegistry>,
        extractor: Arc<dyn KeywordExtractor>,
        vocab: Arc<VocabularyRef>,
        store: Arc<dyn ArticleStore>,
        discovery_limit: usize,
    ) -> Self {
        Self {
            registry,
            extractor,
            vocab,
            store,
            enrichment: None,
            discovery_limit,
        }
    }

    pub fn with_enrichment(mut self, client: impl Enrichment + 'static) -> Self {
        self.enrichment = Some(Arc::new(client));
        self
    }

    pub fn sources(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Run one cycle for a single source. Individual article failures are
    /// dropped from the batch; only persistence failures (and an unknown
    /// source name) surface to the caller.
    pub async fn crawl(&self, source: &str) -> Result<Vec<EnrichedArticle>> {
        let adapter = self
            .registry
            .get(source)
            .ok_or_else(|| Error::UnknownSource(source.to_string()))?;

        let links = adapter.discover_links(self.discovery_limit).await;
        info!("{}: discovered {} links", source, links.len());
        if links.is_empty() {
            return Ok(Vec::new());
        }

        // One fetch attempt per link, concurrently; join_all keeps the
        // discovery order, so corpus position equals article position.
        let attempts = join_all(links.iter().map(|link| adapter.extract_article(link))).await;
        let dropped = attempts.iter().filter(|a| a.is_none()).count();
        if dropped > 0 {
            warn!("{}: dropped {} unparsable articles", source, dropped);
        }
        let articles: Vec<RawArticle> = attempts.into_iter().flatten().collect();
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let corpus: Vec<String> = articles.iter().map(|a| a.body.clone()).collect();
        let ranked = self.extractor.extract(&corpus).await?;

        let detail = self.lookup_enrichment(&ranked).await;

        let today = Utc::now().date_naive();
        let enriched: Vec<EnrichedArticle> = articles
            .into_iter()
            .zip(ranked)
            .map(|(article, keywords)| {
                let words = keywords
                    .into_iter()
                    .filter_map(|keyword| {
                        self.vocab.level_of(&keyword.lemma).map(|level| KeywordEntry {
                            detail: detail.get(&keyword.lemma).cloned(),
                            lemma: keyword.lemma,
                            level,
                        })
                    })
                    .collect();
                EnrichedArticle {
                    source: article.source,
                    link: article.link,
                    title: article.title,
                    description: article.description,
                    author: article.author,
                    published_at: article.published_at,
                    image: article.image,
                    words,
                    crawled_on: today,
                }
            })
            .collect();

        for article in &enriched {
            self.store.upsert(article).await?;
        }
        info!("{}: stored {} articles", source, enriched.len());
        Ok(enriched)
    }

    /// One enrichment call per batch, over the union of accepted lemmas.
    async fn lookup_enrichment(
        &self,
        ranked: &[Vec<nl_core::RankedKeyword>],
    ) -> std::collections::HashMap<String, serde_json::Value> {
        let Some(client) = &self.enrichment else {
            return Default::default();
        };
        let mut union: Vec<String> = ranked
            .iter()
            .flatten()
            .map(|k| k.lemma.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        union.sort();
        client.lookup(&union).await
    }
}
