//! Text normalization: raw body text in, candidate lemmas out.
//!
//! Every strategy goes through here first. `lemma_stream` keeps term
//! statistics intact for the frequency-based strategies; `lemma_set` is
//! the deduplicated, first-occurrence-ordered view.

use std::collections::HashSet;

/// English function words dropped before lemmatization.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can",
    "had", "has", "have", "her", "him", "his", "how", "its", "may", "nor",
    "our", "out", "she", "such", "than", "that", "their", "them", "then",
    "there", "these", "they", "this", "those", "was", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "would", "your", "about", "above", "after", "again", "against",
    "because", "been", "before", "being", "below", "between", "both",
    "could", "did", "does", "doing", "down", "during", "each", "few",
    "from", "further", "here", "into", "itself", "just", "more", "most",
    "once", "only", "other", "over", "own", "same", "should", "some",
    "through", "too", "under", "until", "very", "yours", "himself",
    "herself", "themselves", "ourselves", "myself", "yourself", "off",
    "now", "don", "didn", "doesn", "isn", "wasn", "weren", "won",
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Reduce a token to its dictionary form. Plural-suffix rules only; the
/// CEFR list stores headwords in singular form, which is all the
/// membership check needs.
pub fn lemmatize(token: &str) -> String {
    let n = token.len();
    if n > 3 && token.ends_with("ies") {
        return format!("{}y", &token[..n - 3]);
    }
    if n > 4
        && (token.ends_with("sses")
            || token.ends_with("xes")
            || token.ends_with("zes")
            || token.ends_with("ches")
            || token.ends_with("shes"))
    {
        return token[..n - 2].to_string();
    }
    if n > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..n - 1].to_string();
    }
    token.to_string()
}

/// Order-preserving lemma multiset: tokenize on word boundaries, keep
/// alphabetic tokens longer than two characters that are not stopwords,
/// lemmatize each one.
pub fn lemma_stream(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|token| token.len() > 2 && !is_stopword(token))
        .map(lemmatize)
        .collect()
}

/// Deduplicated lemmas in first-occurrence order.
pub fn lemma_set(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    lemma_stream(text)
        .into_iter()
        .filter(|lemma| seen.insert(lemma.clone()))
        .collect()
}
