use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use nl_core::{KeywordExtractor, RankedKeyword, Result};
use tracing::debug;

use crate::normalize;
use crate::vocab::VocabularyRef;

use super::MIN_DOC_TOKENS;

/// Corpus-frequency ranking. The model is fitted over the whole batch in
/// one `extract` call: document frequencies are counted, terms outside
/// the configured bounds are dropped, and each document ranks its own
/// terms by tf-idf weight (smoothed idf, ties broken by first
/// occurrence).
pub struct TfIdfExtractor {
    vocab: Arc<VocabularyRef>,
    limit: usize,
    /// A term must occur in at least this many documents of the batch.
    min_df: usize,
    /// A term must occur in at most this fraction of the batch.
    max_df: f64,
}

impl TfIdfExtractor {
    pub fn new(vocab: Arc<VocabularyRef>, limit: usize, min_df: usize, max_df: f64) -> Self {
        Self {
            vocab,
            limit,
            min_df,
            max_df,
        }
    }
}

#[async_trait]
impl KeywordExtractor for TfIdfExtractor {
    fn name(&self) -> &str {
        "tfidf"
    }

    async fn extract(&self, corpus: &[String]) -> Result<Vec<Vec<RankedKeyword>>> {
        let streams: Vec<Vec<String>> = corpus.iter().map(|text| normalize::lemma_stream(text)).collect();
        let usable: Vec<&Vec<String>> = streams
            .iter()
            .filter(|stream| stream.len() >= MIN_DOC_TOKENS)
            .collect();

        // Too small a batch to fit a weighting model over: the whole
        // batch yields empty lists, by policy rather than by error.
        if usable.len() < 2 {
            debug!("tfidf batch degenerate: {} usable documents", usable.len());
            return Ok(vec![Vec::new(); corpus.len()]);
        }

        let n_docs = usable.len();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for stream in &usable {
            let terms: HashSet<&str> = stream.iter().map(String::as_str).collect();
            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let fitted: HashMap<&str, f64> = doc_freq
            .iter()
            .filter(|(_, &df)| df >= self.min_df && df as f64 / n_docs as f64 <= self.max_df)
            .map(|(&term, &df)| {
                // Smoothed idf; never zero, so in-bounds terms always rank.
                let idf = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
                (term, idf)
            })
            .collect();

        if fitted.is_empty() {
            debug!("tfidf batch uniform: no terms within df bounds");
            return Ok(vec![Vec::new(); corpus.len()]);
        }

        Ok(streams
            .iter()
            .map(|stream| {
                if stream.len() < MIN_DOC_TOKENS {
                    return Vec::new();
                }
                self.rank_document(stream, &fitted)
            })
            .collect())
    }
}

impl TfIdfExtractor {
    fn rank_document(&self, stream: &[String], fitted: &HashMap<&str, f64>) -> Vec<RankedKeyword> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (i, term) in stream.iter().enumerate() {
            *counts.entry(term).or_insert(0) += 1;
            first_seen.entry(term).or_insert(i);
        }

        let total = stream.len() as f64;
        let mut weighted: Vec<(&str, f64, usize)> = counts
            .iter()
            .filter_map(|(&term, &count)| {
                fitted
                    .get(term)
                    .map(|idf| (term, count as f64 / total * idf, first_seen[term]))
            })
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });

        weighted
            .into_iter()
            .filter(|(term, _, _)| self.vocab.contains(term))
            .take(self.limit)
            .map(|(term, score, _)| RankedKeyword {
                lemma: term.to_string(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::news_vocab;

    fn extractor(min_df: usize) -> TfIdfExtractor {
        TfIdfExtractor::new(news_vocab(), 20, min_df, 1.0)
    }

    #[tokio::test]
    async fn excludes_terms_below_min_document_frequency() {
        // "inflation" appears in one of three documents; with min_df = 2
        // it must never come back even though the vocabulary knows it.
        let corpus = vec![
            "The election dominated every debate, and election officials said plainly.".to_string(),
            "Election night coverage examined the economy and regional turnout patterns.".to_string(),
            "Inflation pressures shaped the economy conversation ahead of annual budget talks."
                .to_string(),
        ];

        let results = extractor(2).extract(&corpus).await.unwrap();
        for list in &results {
            assert!(list.iter().all(|k| k.lemma != "inflation"));
            assert!(!list.is_empty());
        }
    }

    #[tokio::test]
    async fn excludes_terms_above_max_document_fraction() {
        // "election" shows up in all three documents; a 0.7 ceiling drops
        // it while "economy" (two of three) survives.
        let strict = TfIdfExtractor::new(news_vocab(), 20, 1, 0.7);
        let corpus = vec![
            "The election dominated every debate among regional officials today.".to_string(),
            "Election coverage examined the economy and provincial turnout patterns.".to_string(),
            "Economy pressures shaped the election conversation ahead of budget talks.".to_string(),
        ];

        let results = strict.extract(&corpus).await.unwrap();
        for list in &results {
            assert!(list.iter().all(|k| k.lemma != "election"));
        }
        assert!(results[1].iter().any(|k| k.lemma == "economy"));
        assert!(results[2].iter().any(|k| k.lemma == "economy"));
    }

    #[tokio::test]
    async fn ranks_by_descending_weight() {
        let corpus = vec![
            "Election election election coverage mentioned the economy once more today.".to_string(),
            "The economy report referenced one election while dissecting economy figures.".to_string(),
        ];

        let results = extractor(2).extract(&corpus).await.unwrap();
        assert_eq!(results[0][0].lemma, "election");
        assert_eq!(results[1][0].lemma, "economy");
        for list in &results {
            for pair in list.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[tokio::test]
    async fn single_document_batch_is_degenerate() {
        let corpus =
            vec!["The election dominated the economy debate across every region.".to_string()];
        let results = extractor(2).extract(&corpus).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
    }

    #[tokio::test]
    async fn degenerate_document_does_not_poison_batch() {
        let corpus = vec![
            "The election dominated the economy debate, officials said repeatedly today.".to_string(),
            "Too short.".to_string(),
            "Election coverage examined the economy and turnout across several provinces.".to_string(),
        ];

        let results = extractor(2).extract(&corpus).await.unwrap();
        assert!(results[1].is_empty());
        assert!(!results[0].is_empty());
        assert!(!results[2].is_empty());
    }

    #[tokio::test]
    async fn all_results_are_vocab_members_within_limit() {
        let small = TfIdfExtractor::new(news_vocab(), 1, 2, 1.0);
        let corpus = vec![
            "Election analysts weighed the economy and government policy at length.".to_string(),
            "Government policy and the economy dominated election analysis again today.".to_string(),
        ];
        let vocab = news_vocab();
        let results = small.extract(&corpus).await.unwrap();
        for list in results {
            assert!(list.len() <= 1);
            assert!(list.iter().all(|k| vocab.contains(&k.lemma)));
        }
    }
}
