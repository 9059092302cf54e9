use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use nl_core::{ArticleStore, Result};
use nl_sources::CrawlPipeline;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Automatic once-a-day crawl over every registered source.
///
/// The gate mutex is held across the exists-check and the crawl itself,
/// so overlapping triggers (a second process tick, a manual poke)
/// serialize and cannot both observe "not crawled today".
pub struct DailyScheduler {
    pipeline: Arc<CrawlPipeline>,
    store: Arc<dyn ArticleStore>,
    gate: Mutex<()>,
}

impl DailyScheduler {
    pub fn new(pipeline: Arc<CrawlPipeline>, store: Arc<dyn ArticleStore>) -> Self {
        Self {
            pipeline,
            store,
            gate: Mutex::new(()),
        }
    }

    /// Crawl every source unless today's crawl already happened.
    /// Returns whether a crawl ran.
    pub async fn run_if_due(&self) -> Result<bool> {
        let _claim = self.gate.lock().await;

        let today = Utc::now().date_naive();
        if self.store.exists_for_date(today).await? {
            return Ok(false);
        }

        info!("daily crawl starting for {}", today);
        for source in self.pipeline.sources() {
            if let Err(e) = self.pipeline.crawl(&source).await {
                warn!("daily crawl failed for {}: {}", source, e);
            }
        }
        Ok(true)
    }

    /// Background task ticking hourly; the date gate makes the extra
    /// ticks no-ops.
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));
            loop {
                interval.tick().await;
                match self.run_if_due().await {
                    Ok(true) => info!("daily crawl completed"),
                    Ok(false) => {}
                    Err(e) => warn!("daily crawl aborted: {}", e),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nl_core::{CefrLevel, Config, KeywordExtractor, RawArticle, UNKNOWN};
    use nl_extract::{create_extractor, VocabularyRef};
    use nl_sources::adapters::SourceAdapter;
    use nl_sources::SourceRegistry;
    use nl_storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAdapter {
        discoveries: AtomicUsize,
    }

    #[async_trait]
    impl SourceAdapter for CountingAdapter {
        fn source(&self) -> &str {
            "Counting Source"
        }

        async fn discover_links(&self, _limit: usize) -> Vec<String> {
            self.discoveries.fetch_add(1, Ordering::SeqCst);
            vec!["http://c/1".to_string()]
        }

        async fn extract_article(&self, url: &str) -> Option<RawArticle> {
            Some(RawArticle {
                source: "Counting Source".to_string(),
                link: url.to_string(),
                title: "Election coverage".to_string(),
                description: UNKNOWN.to_string(),
                author: UNKNOWN.to_string(),
                published_at: UNKNOWN.to_string(),
                image: UNKNOWN.to_string(),
                body: "Election analysts examined government policy across the border regions."
                    .to_string(),
            })
        }
    }

    fn scheduler() -> (Arc<DailyScheduler>, Arc<CountingAdapter>) {
        let adapter = Arc::new(CountingAdapter {
            discoveries: AtomicUsize::new(0),
        });
        let mut registry = SourceRegistry::new();
        registry.insert("counting", adapter.clone());

        let vocab = Arc::new(VocabularyRef::from_entries([
            ("election".to_string(), CefrLevel::B2),
            ("analyst".to_string(), CefrLevel::C1),
            ("government".to_string(), CefrLevel::A2),
            ("policy".to_string(), CefrLevel::B1),
            ("border".to_string(), CefrLevel::A2),
        ]));
        let extractor: Arc<dyn KeywordExtractor> =
            create_extractor(&Config::default(), vocab.clone()).into();
        let store: Arc<dyn ArticleStore> = Arc::new(MemoryStore::new());
        let pipeline = Arc::new(CrawlPipeline::new(
            Arc::new(registry),
            extractor,
            vocab,
            store.clone(),
            5,
        ));
        (
            Arc::new(DailyScheduler::new(pipeline, store)),
            adapter,
        )
    }

    #[tokio::test]
    async fn second_run_is_gated_off() {
        let (scheduler, adapter) = scheduler();
        assert!(scheduler.run_if_due().await.unwrap());
        assert!(!scheduler.run_if_due().await.unwrap());
        assert_eq!(adapter.discoveries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_triggers_crawl_once() {
        let (scheduler, adapter) = scheduler();
        let (a, b) = tokio::join!(scheduler.run_if_due(), scheduler.run_if_due());
        let ran = [a.unwrap(), b.unwrap()];
        assert_eq!(ran.iter().filter(|&&r| r).count(), 1);
        assert_eq!(adapter.discoveries.load(Ordering::SeqCst), 1);
    }
}
