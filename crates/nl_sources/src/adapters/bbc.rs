use std::collections::HashSet;

use async_trait::async_trait;
use nl_core::{RawArticle, UNKNOWN};
use reqwest::Client;
use scraper::Html;
use tracing::warn;

use super::markup;
use super::{fetch_html, SourceAdapter};

pub struct BbcAdapter {
    client: Client,
}

impl BbcAdapter {
    const BASE_URL: &'static str = "https://www.bbc.com";
    const NEWS_URL: &'static str = "https://www.bbc.com/news";

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceAdapter for BbcAdapter {
    fn source(&self) -> &str {
        "BBC News"
    }

    async fn discover_links(&self, limit: usize) -> Vec<String> {
        match fetch_html(&self.client, Self::NEWS_URL).await {
            Ok(html) => parse_links(&html, limit),
            Err(e) => {
                warn!("bbc link discovery failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn extract_article(&self, url: &str) -> Option<RawArticle> {
        match fetch_html(&self.client, url).await {
            Ok(html) => parse_article(&html, url),
            Err(e) => {
                warn!("bbc fetch failed for {}: {}", url, e);
                None
            }
        }
    }
}

/// Story links carry either an `/articles/` path or a trailing numeric id
/// (`...-12345678`). Live blogs, video pages and topic hubs are skipped.
fn is_story_href(href: &str) -> bool {
    if href.contains("/live/") || href.contains("/av/") || href.contains("/topics/") {
        return false;
    }
    if href.contains("/articles/") {
        return true;
    }
    href.rsplit('-')
        .next()
        .map(|tail| tail.len() >= 6 && tail.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

fn parse_links(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let sel = markup::selector(r#"a[href*="/news/"]"#);

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&sel) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_story_href(href) {
            continue;
        }
        if let Some(link) = markup::absolutize(BbcAdapter::BASE_URL, href) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }
    links
}

fn parse_article(html: &str, url: &str) -> Option<RawArticle> {
    let document = Html::parse_document(html);

    let title = markup::first_text(&document, "article h1, main#main-content h1")?;
    let body = markup::joined_text(&document, "article p, main#main-content p", " ");
    if title.is_empty() || body.is_empty() {
        return None;
    }

    let description = markup::first_attr(&document, r#"meta[name="description"]"#, "content")
        .unwrap_or_else(|| UNKNOWN.to_string());
    let author = markup::first_attr(&document, r#"meta[name="author"]"#, "content")
        .unwrap_or_else(|| UNKNOWN.to_string());
    let published_at = markup::first_attr(&document, "article time, main#main-content time", "datetime")
        .unwrap_or_else(|| UNKNOWN.to_string());
    let image = markup::first_attr(&document, r#"meta[property="og:image"]"#, "content")
        .or_else(|| markup::first_attr(&document, "article img", "src"))
        .filter(|src| !src.contains("placeholder"))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Some(RawArticle {
        source: "BBC News".to_string(),
        link: url.to_string(),
        title,
        description,
        author,
        published_at,
        image,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_PAGE: &str = r#"
        <a href="/news/articles/c1234abcd">Story A</a>
        <a href="/news/world-europe-6812345">Story B</a>
        <a href="/news/articles/c1234abcd">Story A again</a>
        <a href="/news/live/election-day">Live blog</a>
        <a href="/news/topics/politics">Topic hub</a>
        <a href="/news/av/video-clip-123456">Video</a>
        <a href="/news/world-asia-7654321">Story C</a>
    "#;

    #[test]
    fn discovers_ordered_deduplicated_story_links() {
        let links = parse_links(FRONT_PAGE, 10);
        assert_eq!(
            links,
            vec![
                "https://www.bbc.com/news/articles/c1234abcd",
                "https://www.bbc.com/news/world-europe-6812345",
                "https://www.bbc.com/news/world-asia-7654321",
            ]
        );
    }

    #[test]
    fn discovery_respects_limit() {
        let links = parse_links(FRONT_PAGE, 2);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn parses_full_article() {
        let html = r#"
            <html><head>
                <meta name="description" content="A short description">
                <meta name="author" content="Jo Reporter">
                <meta property="og:image" content="https://ichef.bbci.co.uk/pic.jpg">
            </head><body>
                <article>
                    <h1>Election results announced</h1>
                    <time datetime="2026-08-24T09:00:00Z">today</time>
                    <p>First paragraph.</p>
                    <p>Second paragraph.</p>
                </article>
            </body></html>
        "#;
        let article = parse_article(html, "https://www.bbc.com/news/articles/c1").unwrap();
        assert_eq!(article.title, "Election results announced");
        assert_eq!(article.body, "First paragraph. Second paragraph.");
        assert_eq!(article.author, "Jo Reporter");
        assert_eq!(article.published_at, "2026-08-24T09:00:00Z");
        assert_eq!(article.image, "https://ichef.bbci.co.uk/pic.jpg");
    }

    #[test]
    fn missing_optionals_fall_back_to_sentinel() {
        let html = r#"
            <article>
                <h1>Bare story</h1>
                <p>Only a body paragraph here.</p>
            </article>
        "#;
        let article = parse_article(html, "https://www.bbc.com/news/articles/c2").unwrap();
        assert_eq!(article.author, UNKNOWN);
        assert_eq!(article.image, UNKNOWN);
        assert_eq!(article.published_at, UNKNOWN);
        assert_eq!(article.description, UNKNOWN);
    }

    #[test]
    fn unusable_record_is_dropped() {
        assert!(parse_article("<article><h1>Title only</h1></article>", "u").is_none());
        assert!(parse_article("<article><p>Body only</p></article>", "u").is_none());
    }
}
