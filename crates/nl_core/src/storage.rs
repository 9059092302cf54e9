use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::EnrichedArticle;
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync + std::fmt::Debug {
    /// Insert the article or replace the record sharing its link.
    /// Replace, not merge: the incoming fields win entirely.
    async fn upsert(&self, article: &EnrichedArticle) -> Result<()>;

    /// Whether any record was stored with the given crawl date.
    async fn exists_for_date(&self, date: NaiveDate) -> Result<bool>;

    /// All records stamped with the given crawl date.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<EnrichedArticle>>;
}
