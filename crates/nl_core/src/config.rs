use std::env;
use std::str::FromStr;

use crate::{Error, Result};

/// Which keyword-extraction backend the pipeline runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Membership,
    TfIdf,
    Embedding,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "membership" => Ok(Strategy::Membership),
            "tfidf" | "tf-idf" => Ok(Strategy::TfIdf),
            "embedding" => Ok(Strategy::Embedding),
            other => Err(Error::Init(format!("unknown extraction strategy: {}", other))),
        }
    }
}

/// Runtime configuration. Defaults match the reference deployment; every
/// field can be overridden through a `NEWSLEX_*` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the CEFR word list CSV.
    pub vocab_path: String,
    /// Accepted header names for the word column, tried in order.
    pub vocab_word_columns: Vec<String>,
    /// Accepted header names for the level column, tried in order.
    pub vocab_level_columns: Vec<String>,
    /// Links to discover per source per cycle.
    pub discovery_limit: usize,
    /// Keywords to keep per article.
    pub keyword_limit: usize,
    pub strategy: Strategy,
    /// tf-idf: a term must appear in at least this many documents.
    pub min_df: usize,
    /// tf-idf: a term must appear in at most this fraction of documents.
    pub max_df: f64,
    /// Embedding strategy: accept on phrase relevance alone above this.
    pub primary_threshold: f64,
    /// Embedding strategy: otherwise accept on document similarity above this.
    pub secondary_threshold: f64,
    /// Word-enrichment service endpoint; `None` disables enrichment.
    pub enrichment_endpoint: Option<String>,
    /// `memory` or a MongoDB connection URI.
    pub storage_url: String,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocab_path: "data/word_list_cefr.csv".to_string(),
            vocab_word_columns: vec!["word".to_string(), "headword".to_string()],
            vocab_level_columns: vec!["level".to_string(), "cefr".to_string()],
            discovery_limit: 5,
            keyword_limit: 20,
            strategy: Strategy::Membership,
            min_df: 2,
            max_df: 0.95,
            primary_threshold: 0.3,
            secondary_threshold: 0.2,
            enrichment_endpoint: None,
            storage_url: "memory".to_string(),
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Config {
    /// Build a config from the environment on top of the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = env::var("NEWSLEX_VOCAB_PATH") {
            config.vocab_path = path;
        }
        if let Ok(raw) = env::var("NEWSLEX_VOCAB_WORD_COLUMNS") {
            config.vocab_word_columns = parse_columns("NEWSLEX_VOCAB_WORD_COLUMNS", &raw)?;
        }
        if let Ok(raw) = env::var("NEWSLEX_VOCAB_LEVEL_COLUMNS") {
            config.vocab_level_columns = parse_columns("NEWSLEX_VOCAB_LEVEL_COLUMNS", &raw)?;
        }
        if let Some(limit) = parse_var::<usize>("NEWSLEX_DISCOVERY_LIMIT")? {
            config.discovery_limit = limit;
        }
        if let Some(limit) = parse_var::<usize>("NEWSLEX_KEYWORD_LIMIT")? {
            config.keyword_limit = limit;
        }
        if let Ok(strategy) = env::var("NEWSLEX_STRATEGY") {
            config.strategy = strategy.parse()?;
        }
        if let Some(min_df) = parse_var::<usize>("NEWSLEX_MIN_DF")? {
            config.min_df = min_df;
        }
        if let Some(max_df) = parse_var::<f64>("NEWSLEX_MAX_DF")? {
            config.max_df = max_df;
        }
        if let Some(threshold) = parse_var::<f64>("NEWSLEX_PRIMARY_THRESHOLD")? {
            config.primary_threshold = threshold;
        }
        if let Some(threshold) = parse_var::<f64>("NEWSLEX_SECONDARY_THRESHOLD")? {
            config.secondary_threshold = threshold;
        }
        if let Ok(endpoint) = env::var("NEWSLEX_ENRICHMENT_URL") {
            config.enrichment_endpoint = Some(endpoint);
        }
        if let Ok(url) = env::var("NEWSLEX_STORAGE_URL") {
            config.storage_url = url;
        }
        if let Ok(addr) = env::var("NEWSLEX_BIND_ADDR") {
            config.bind_addr = addr;
        }
        Ok(config)
    }
}

/// Comma-separated header candidates, e.g. `word,headword`.
fn parse_columns(name: &str, raw: &str) -> Result<Vec<String>> {
    let columns: Vec<String> = raw
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        return Err(Error::Init(format!("invalid {}: no column names", name)));
    }
    Ok(columns)
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Init(format!("invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}
