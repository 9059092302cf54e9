use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nl_core::{KeywordExtractor, RankedKeyword, Result};

use crate::normalize;
use crate::vocab::VocabularyRef;

use super::MIN_DOC_TOKENS;

/// Candidates proposed per document before thresholding.
const MAX_CANDIDATES: usize = 100;

/// Dimensionality of the frequency-feature vectors.
const EMBEDDING_DIM: usize = 128;

/// Similarity-gated extraction. Candidates are single-lemma phrases
/// ranked by an unsupervised relevance score; each is accepted when its
/// relevance clears the primary threshold or its embedding sits close
/// enough to the whole-document embedding, and the vocabulary knows it.
pub struct EmbeddingExtractor {
    vocab: Arc<VocabularyRef>,
    limit: usize,
    primary_threshold: f64,
    secondary_threshold: f64,
}

struct Candidate {
    lemma: String,
    relevance: f64,
}

impl EmbeddingExtractor {
    pub fn new(
        vocab: Arc<VocabularyRef>,
        limit: usize,
        primary_threshold: f64,
        secondary_threshold: f64,
    ) -> Self {
        Self {
            vocab,
            limit,
            primary_threshold,
            secondary_threshold,
        }
    }

    /// Rank unique lemmas by normalized term frequency damped by how
    /// late the lemma first appears. Deterministic for a given stream.
    fn candidates(stream: &[String]) -> Vec<Candidate> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (i, term) in stream.iter().enumerate() {
            *counts.entry(term).or_insert(0) += 1;
            first_seen.entry(term).or_insert(i);
        }
        let max_count = counts.values().copied().max().unwrap_or(1) as f64;
        let len = stream.len() as f64;

        let mut ranked: Vec<(f64, usize, &str)> = counts
            .into_iter()
            .map(|(term, count)| {
                let tf = count as f64 / max_count;
                let salience = 1.0 - (first_seen[term] as f64 / len) * 0.5;
                (tf * salience, first_seen[term], term)
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        ranked
            .into_iter()
            .take(MAX_CANDIDATES)
            .map(|(relevance, _, term)| Candidate {
                lemma: term.to_string(),
                relevance,
            })
            .collect()
    }

    fn rank_document(&self, stream: &[String]) -> Vec<RankedKeyword> {
        let doc_embedding = embed_terms(stream.iter().map(String::as_str));
        let mut accepted = Vec::new();

        for candidate in Self::candidates(stream) {
            if accepted.len() >= self.limit {
                break;
            }
            if !self.vocab.contains(&candidate.lemma) {
                continue;
            }
            if accepted
                .iter()
                .any(|k: &RankedKeyword| k.lemma == candidate.lemma)
            {
                continue;
            }
            let similarity =
                cosine_similarity(&embed_terms(std::iter::once(candidate.lemma.as_str())), &doc_embedding);
            if accepts(
                candidate.relevance,
                similarity as f64,
                self.primary_threshold,
                self.secondary_threshold,
            ) {
                accepted.push(RankedKeyword {
                    lemma: candidate.lemma,
                    score: candidate.relevance,
                });
            }
        }
        accepted
    }
}

#[async_trait]
impl KeywordExtractor for EmbeddingExtractor {
    fn name(&self) -> &str {
        "embedding"
    }

    async fn extract(&self, corpus: &[String]) -> Result<Vec<Vec<RankedKeyword>>> {
        Ok(corpus
            .iter()
            .map(|text| {
                let stream = normalize::lemma_stream(text);
                if stream.len() < MIN_DOC_TOKENS {
                    return Vec::new();
                }
                self.rank_document(&stream)
            })
            .collect())
    }
}

/// The double-threshold acceptance rule: strong relevance stands on its
/// own, weaker candidates need embedding support.
fn accepts(relevance: f64, similarity: f64, primary: f64, secondary: f64) -> bool {
    relevance >= primary || similarity >= secondary
}

/// Deterministic character-frequency embedding over a bag of terms.
fn embed_terms<'a>(terms: impl Iterator<Item = &'a str>) -> Vec<f32> {
    let mut embedding = vec![0.0f32; EMBEDDING_DIM];
    let mut total = 0usize;
    for term in terms {
        for (i, byte) in term.bytes().enumerate() {
            let bucket = (byte as usize).wrapping_mul(31).wrapping_add(i) % EMBEDDING_DIM;
            embedding[bucket] += 1.0;
            total += 1;
        }
    }
    if total > 0 {
        for value in &mut embedding {
            *value /= total as f32;
        }
    }
    embedding
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
