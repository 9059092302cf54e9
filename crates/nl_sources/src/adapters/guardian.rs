use std::collections::HashSet;

use async_trait::async_trait;
use nl_core::{RawArticle, UNKNOWN};
use reqwest::Client;
use scraper::Html;
use tracing::warn;

use super::markup;
use super::{fetch_html, SourceAdapter};

pub struct GuardianAdapter {
    client: Client,
}

impl GuardianAdapter {
    const BASE_URL: &'static str = "https://www.theguardian.com";
    const NEWS_URL: &'static str = "https://www.theguardian.com/world";

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceAdapter for GuardianAdapter {
    fn source(&self) -> &str {
        "The Guardian"
    }

    async fn discover_links(&self, limit: usize) -> Vec<String> {
        match fetch_html(&self.client, Self::NEWS_URL).await {
            Ok(html) => parse_links(&html, limit),
            Err(e) => {
                warn!("guardian link discovery failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn extract_article(&self, url: &str) -> Option<RawArticle> {
        match fetch_html(&self.client, url).await {
            Ok(html) => parse_article(&html, url),
            Err(e) => {
                warn!("guardian fetch failed for {}: {}", url, e);
                None
            }
        }
    }
}

fn parse_links(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let sel = markup::selector(r#"a[data-link-name="article"]"#);

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&sel) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(link) = markup::absolutize(GuardianAdapter::BASE_URL, href) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }
    links
}

/// Guardian URLs embed the publication day: `/world/2026/aug/24/slug`.
/// Fallback for pages that stopped exposing a `<time datetime>` tag.
fn date_from_url(url: &str) -> Option<String> {
    let parts: Vec<&str> = url.split('/').collect();
    for window in parts.windows(3) {
        let [year, month, day] = [window[0], window[1], window[2]];
        if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) && day.len() == 2 {
            let month = match month {
                "jan" => "01",
                "feb" => "02",
                "mar" => "03",
                "apr" => "04",
                "may" => "05",
                "jun" => "06",
                "jul" => "07",
                "aug" => "08",
                "sep" => "09",
                "oct" => "10",
                "nov" => "11",
                "dec" => "12",
                _ => continue,
            };
            if day.bytes().all(|b| b.is_ascii_digit()) {
                return Some(format!("{}-{}-{}T00:00:00Z", year, month, day));
            }
        }
    }
    None
}

fn find_main_image(document: &Html) -> Option<String> {
    if let Some(srcset) = markup::first_attr(document, "picture source[srcset]", "srcset") {
        if let Some(first) = srcset.split(',').next() {
            let url = first.split_whitespace().next().unwrap_or("");
            if !url.is_empty() {
                return Some(url.to_string());
            }
        }
    }
    markup::first_attr(document, "figure img", "src")
        .or_else(|| markup::first_attr(document, r#"img[src*="i.guim.co.uk"]"#, "src"))
}

fn parse_article(html: &str, url: &str) -> Option<RawArticle> {
    let document = Html::parse_document(html);

    let title = markup::first_text(&document, "h1")?;
    let content = markup::joined_text(&document, "div#maincontent p", " ");
    if title.is_empty() || content.is_empty() {
        return None;
    }

    let description = markup::first_text(&document, r#"div[data-gu-name="standfirst"] p"#)
        .unwrap_or_else(|| UNKNOWN.to_string());
    let published_at = markup::first_attr(&document, "time", "datetime")
        .or_else(|| date_from_url(url))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let image = find_main_image(&document).unwrap_or_else(|| UNKNOWN.to_string());

    // The standfirst and headline carry vocabulary of their own, so they
    // join the analyzed text.
    let body = if description == UNKNOWN {
        format!("{}. {}", title, content)
    } else {
        format!("{}. {} {}", title, description, content)
    };

    Some(RawArticle {
        source: "The Guardian".to_string(),
        link: url.to_string(),
        title,
        description,
        author: UNKNOWN.to_string(),
        published_at,
        image,
        body,
    })
}
