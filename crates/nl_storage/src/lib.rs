use std::sync::Arc;

use nl_core::{ArticleStore, Result};

pub mod backends;

pub use backends::*;

/// Build the store the configuration asks for: `memory`, or a MongoDB
/// URI when the `mongo` feature is compiled in.
pub async fn create_store(storage_url: &str) -> Result<Arc<dyn ArticleStore>> {
    match storage_url {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "mongo")]
        uri => Ok(Arc::new(MongoStore::connect(uri).await?)),
        #[cfg(not(feature = "mongo"))]
        other => Err(nl_core::Error::Init(format!(
            "storage target {} requires the `mongo` feature",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::MemoryStore;
    pub use super::create_store;
    pub use nl_core::{ArticleStore, EnrichedArticle, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_target_builds_without_features() {
        assert!(create_store("memory").await.is_ok());
    }

    #[cfg(not(feature = "mongo"))]
    #[tokio::test]
    async fn mongo_target_requires_feature() {
        let err = create_store("mongodb://localhost:27017").await.unwrap_err();
        assert!(matches!(err, nl_core::Error::Init(_)));
    }
}
