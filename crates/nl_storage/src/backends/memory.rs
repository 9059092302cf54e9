use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use nl_core::{ArticleStore, EnrichedArticle, Result};
use tokio::sync::RwLock;

/// Keyed by article link; an upsert replaces the whole record, so
/// repeated crawls of the same link keep exactly one entry.
#[derive(Debug)]
pub struct MemoryStore {
    articles: Arc<RwLock<HashMap<String, EnrichedArticle>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn upsert(&self, article: &EnrichedArticle) -> Result<()> {
        let mut articles = self.articles.write().await;
        articles.insert(article.link.clone(), article.clone());
        Ok(())
    }

    async fn exists_for_date(&self, date: NaiveDate) -> Result<bool> {
        let articles = self.articles.read().await;
        Ok(articles.values().any(|a| a.crawled_on == date))
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<EnrichedArticle>> {
        let articles = self.articles.read().await;
        let mut found: Vec<EnrichedArticle> = articles
            .values()
            .filter(|a| a.crawled_on == date)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.link.cmp(&b.link));
        Ok(found)
    }
}
