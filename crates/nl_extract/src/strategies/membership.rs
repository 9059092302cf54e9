use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use nl_core::{KeywordExtractor, RankedKeyword, Result};

use crate::normalize;
use crate::vocab::VocabularyRef;

use super::MIN_DOC_TOKENS;

/// Plain vocabulary filter: every lemma of the document that appears in
/// the reference, in first-occurrence order, up to the limit. No scoring.
pub struct MembershipExtractor {
    vocab: Arc<VocabularyRef>,
    limit: usize,
}

impl MembershipExtractor {
    pub fn new(vocab: Arc<VocabularyRef>, limit: usize) -> Self {
        Self { vocab, limit }
    }
}

#[async_trait]
impl KeywordExtractor for MembershipExtractor {
    fn name(&self) -> &str {
        "membership"
    }

    async fn extract(&self, corpus: &[String]) -> Result<Vec<Vec<RankedKeyword>>> {
        Ok(corpus
            .iter()
            .map(|text| {
                let stream = normalize::lemma_stream(text);
                if stream.len() < MIN_DOC_TOKENS {
                    return Vec::new();
                }
                let mut seen = HashSet::new();
                stream
                    .into_iter()
                    .filter(|lemma| self.vocab.contains(lemma) && seen.insert(lemma.clone()))
                    .take(self.limit)
                    .map(|lemma| RankedKeyword { lemma, score: 0.0 })
                    .collect()
            })
            .collect())
    }
}
