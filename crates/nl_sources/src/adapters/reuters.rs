use std::collections::HashSet;

use async_trait::async_trait;
use nl_core::{RawArticle, UNKNOWN};
use reqwest::Client;
use scraper::Html;
use tracing::warn;

use super::markup;
use super::{fetch_html, SourceAdapter};

pub struct ReutersAdapter {
    client: Client,
}

impl ReutersAdapter {
    const BASE_URL: &'static str = "https://www.reuters.com";
    const NEWS_URL: &'static str = "https://www.reuters.com/world";

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceAdapter for ReutersAdapter {
    fn source(&self) -> &str {
        "Reuters"
    }

    async fn discover_links(&self, limit: usize) -> Vec<String> {
        match fetch_html(&self.client, Self::NEWS_URL).await {
            Ok(html) => parse_links(&html, limit),
            Err(e) => {
                warn!("reuters link discovery failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn extract_article(&self, url: &str) -> Option<RawArticle> {
        match fetch_html(&self.client, url).await {
            Ok(html) => parse_article(&html, url),
            Err(e) => {
                warn!("reuters fetch failed for {}: {}", url, e);
                None
            }
        }
    }
}

fn parse_links(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let sel = markup::selector(r#"a[data-testid="TitleLink"]"#);

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&sel) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(link) = markup::absolutize(ReutersAdapter::BASE_URL, href) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }
    links
}

fn parse_article(html: &str, url: &str) -> Option<RawArticle> {
    let document = Html::parse_document(html);

    let title = markup::first_text(&document, r#"h1[data-testid="Heading"]"#)?;
    let content = markup::joined_text(
        &document,
        r#"div[data-testid="ArticleBody"] div[data-testid^="paragraph-"]"#,
        " ",
    );
    if title.is_empty() || content.is_empty() {
        return None;
    }

    let description = markup::first_text(&document, r#"div[data-testid="paragraph-0"]"#)
        .or_else(|| markup::first_attr(&document, r#"meta[name="description"]"#, "content"))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let published_at = markup::first_attr(&document, r#"time[data-testid="Body"]"#, "datetime")
        .unwrap_or_else(|| UNKNOWN.to_string());
    let image = markup::first_attr(&document, r#"meta[property="og:image"]"#, "content")
        .or_else(|| markup::first_attr(&document, r#"img[data-testid="EagerImage"]"#, "src"))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let body = format!("{}. {}. {}", title, description, content);

    Some(RawArticle {
        source: "Reuters".to_string(),
        link: url.to_string(),
        title,
        description,
        author: UNKNOWN.to_string(),
        published_at,
        image,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_title_links() {
        let html = r#"
            <a data-testid="TitleLink" href="/world/europe/story-one/">One</a>
            <a data-testid="TitleLink" href="/world/asia/story-two/">Two</a>
            <a data-testid="TitleLink" href="/world/europe/story-one/">One dup</a>
            <a href="/world/other/">Not a title link</a>
        "#;
        let links = parse_links(html, 10);
        assert_eq!(
            links,
            vec![
                "https://www.reuters.com/world/europe/story-one/",
                "https://www.reuters.com/world/asia/story-two/",
            ]
        );
    }

    #[test]
    fn parses_article_with_testid_markup() {
        let html = r#"
            <h1 data-testid="Heading">Markets rally on rate cut</h1>
            <time data-testid="Body" datetime="2026-08-24T08:30:00Z"></time>
            <meta property="og:image" content="https://www.reuters.com/pic.jpg">
            <div data-testid="ArticleBody">
                <div data-testid="paragraph-0">Stocks climbed sharply.</div>
                <div data-testid="paragraph-1">Analysts welcomed the move.</div>
            </div>
        "#;
        let article = parse_article(html, "https://www.reuters.com/markets/story/").unwrap();
        assert_eq!(article.title, "Markets rally on rate cut");
        assert_eq!(article.description, "Stocks climbed sharply.");
        assert_eq!(article.published_at, "2026-08-24T08:30:00Z");
        assert_eq!(article.image, "https://www.reuters.com/pic.jpg");
        assert!(article.body.contains("Analysts welcomed the move."));
        assert_eq!(article.author, UNKNOWN);
    }

    #[test]
    fn article_without_title_is_dropped() {
        let html = r#"
            <div data-testid="ArticleBody">
                <div data-testid="paragraph-0">Body without heading.</div>
            </div>
        "#;
        assert!(parse_article(html, "https://www.reuters.com/x").is_none());
    }
}
