use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel for optional source fields the publisher did not provide.
pub const UNKNOWN: &str = "unknown";

/// Article as it comes out of a source adapter. Never persisted; the body
/// only lives long enough to feed the keyword extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub source: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub published_at: String,
    pub image: String,
    pub body: String,
}

/// CEFR proficiency grade, A1 lowest to C2 highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl FromStr for CefrLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(crate::Error::Parse(format!("unknown CEFR level: {}", other))),
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        };
        f.write_str(s)
    }
}

/// One lemma ranked by an extraction strategy. The score is strategy
/// defined: membership emits 0.0, tf-idf emits the term weight, the
/// embedding strategy emits the phrase-relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub lemma: String,
    pub score: f64,
}

/// An accepted lemma on a persisted article, graded and optionally
/// enriched with external detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub lemma: String,
    pub level: CefrLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Unit of persistence: the raw article minus its body, plus the graded
/// word list and the date of the crawl that produced it. `link` is the
/// unique identity across all stored records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedArticle {
    pub source: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub published_at: String,
    pub image: String,
    pub words: Vec<KeywordEntry>,
    pub crawled_on: NaiveDate,
}
