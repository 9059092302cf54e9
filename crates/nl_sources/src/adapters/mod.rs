use async_trait::async_trait;
use nl_core::{RawArticle, Result};
use reqwest::Client;
use scraper::{Html, Selector};

pub mod bbc;
pub mod guardian;
pub mod reuters;

pub use bbc::BbcAdapter;
pub use guardian::GuardianAdapter;
pub use reuters::ReutersAdapter;

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// One implementation per publisher. Both operations are best-effort:
/// network or markup trouble yields an empty list or `None`, never an
/// error, so one flaky publisher cannot take down a batch.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Registry name of the publisher.
    fn source(&self) -> &str;

    /// Ordered, deduplicated article links from the front page, at most
    /// `limit` of them.
    async fn discover_links(&self, limit: usize) -> Vec<String>;

    /// Fetch and parse one article. Optional fields fall back to the
    /// `unknown` sentinel; only a record with no usable title or body
    /// comes back as `None`.
    async fn extract_article(&self, url: &str) -> Option<RawArticle>;
}

pub(crate) async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Shared selector helpers. Selectors come from publisher constants, so
/// a parse failure is a programming error.
pub(crate) mod markup {
    use super::*;

    pub fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
    }

    pub fn first_text(document: &Html, css: &str) -> Option<String> {
        let sel = selector(css);
        document.select(&sel).next().map(|el| {
            el.text().collect::<String>().trim().to_string()
        })
    }

    pub fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
        let sel = selector(css);
        document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|v| v.to_string())
    }

    pub fn joined_text(document: &Html, css: &str, separator: &str) -> String {
        let sel = selector(css);
        document
            .select(&sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Resolve an href against the publisher base, keeping absolute
    /// links as they are.
    pub fn absolutize(base: &str, href: &str) -> Option<String> {
        if href.starts_with("http") {
            return Some(href.to_string());
        }
        url::Url::parse(base)
            .ok()?
            .join(href)
            .ok()
            .map(|u| u.to_string())
    }
}
