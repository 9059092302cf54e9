use async_trait::async_trait;

use crate::types::RankedKeyword;
use crate::Result;

#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Strategy name as it appears in configuration.
    fn name(&self) -> &str;

    /// Rank keywords for a batch of document texts.
    ///
    /// The output is parallel to the input: one list per document, in the
    /// same order. Each list holds at most the configured limit of lemmas
    /// with no duplicates, all of them present in the vocabulary
    /// reference. A degenerate document yields an empty list without
    /// affecting its siblings; corpus-wide strategies get the whole batch
    /// in one call so they can fit over it.
    async fn extract(&self, corpus: &[String]) -> Result<Vec<Vec<RankedKeyword>>>;
}
