use async_trait::async_trait;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReplaceOptions;
use mongodb::{Client, Collection};
use nl_core::{ArticleStore, EnrichedArticle, Error, Result};
use tracing::info;

const DATABASE: &str = "newslex";
const COLLECTION: &str = "articles";

/// MongoDB-backed store. Records are keyed by article link through
/// `replace_one` with upsert, matching the memory backend's replace
/// semantics. `crawled_on` serializes as `YYYY-MM-DD`, so date queries
/// are plain string matches.
#[derive(Debug)]
pub struct MongoStore {
    collection: Collection<EnrichedArticle>,
}

impl MongoStore {
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| Error::Storage(format!("mongodb connect failed: {}", e)))?;
        let collection = client.database(DATABASE).collection(COLLECTION);
        info!("connected to mongodb at {}", uri);
        Ok(Self { collection })
    }
}

#[async_trait]
impl ArticleStore for MongoStore {
    async fn upsert(&self, article: &EnrichedArticle) -> Result<()> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "link": &article.link }, article, options)
            .await
            .map_err(|e| Error::Storage(format!("upsert failed: {}", e)))?;
        Ok(())
    }

    async fn exists_for_date(&self, date: NaiveDate) -> Result<bool> {
        let count = self
            .collection
            .count_documents(doc! { "crawled_on": date.to_string() }, None)
            .await
            .map_err(|e| Error::Storage(format!("date check failed: {}", e)))?;
        Ok(count > 0)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<EnrichedArticle>> {
        let cursor = self
            .collection
            .find(doc! { "crawled_on": date.to_string() }, None)
            .await
            .map_err(|e| Error::Storage(format!("date query failed: {}", e)))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| Error::Storage(format!("date query failed: {}", e)))
    }
}
