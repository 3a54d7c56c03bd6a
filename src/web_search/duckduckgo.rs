//! DuckDuckGo search engine.
//!
//! Uses DuckDuckGo's HTML interface, which needs no API key.

use super::SearchEngine;
use crate::error::{Result, SeminarError};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// DuckDuckGo HTML search engine.
pub struct DuckDuckGoEngine {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoEngine {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl SearchEngine for DuckDuckGoEngine {
    async fn result_urls(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SeminarError::WebSearch(format!(
                "DuckDuckGo request failed with HTTP {}",
                response.status().as_u16()
            )));
        }

        let html = response.text().await?;
        Ok(parse_result_urls(&html, limit))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Pull result links out of a DuckDuckGo HTML results page, in order.
fn parse_result_urls(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a.result__a") else {
        return Vec::new();
    };

    let mut urls: Vec<String> = Vec::new();
    for href in document.select(&selector).filter_map(|a| a.value().attr("href")) {
        if urls.len() >= limit {
            break;
        }
        if let Some(url) = resolve_result_href(href) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}

/// Decode DuckDuckGo's `//duckduckgo.com/l/?uddg=<target>` redirect links.
fn resolve_result_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;

    if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
        return Some(target.into_owned());
    }

    let is_ddg = parsed
        .host_str()
        .is_some_and(|host| host.ends_with("duckduckgo.com"));

    match parsed.scheme() {
        "http" | "https" if !is_ddg => Some(absolute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_redirect_href() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage%3Fa%3D1&rut=abc";
        assert_eq!(
            resolve_result_href(href),
            Some("https://example.com/page?a=1".to_string())
        );
    }

    #[test]
    fn test_resolve_direct_href() {
        assert_eq!(
            resolve_result_href("https://example.org/x"),
            Some("https://example.org/x".to_string())
        );
        assert_eq!(resolve_result_href("https://duckduckgo.com/y.js?ad=1"), None);
        assert_eq!(resolve_result_href("/relative"), None);
    }

    #[test]
    fn test_parse_result_urls() {
        let html = r#"
            <div class="result"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fa.example%2F">A</a></div>
            <div class="result"><a class="result__a" href="https://b.example/">B</a></div>
            <div class="result"><a class="result__a" href="https://b.example/">B again</a></div>
            <div class="result"><a class="result__url" href="https://ignored.example/">x</a></div>
            <div class="result"><a class="result__a" href="https://c.example/">C</a></div>
        "#;

        assert_eq!(
            parse_result_urls(html, 10),
            vec!["https://a.example/", "https://b.example/", "https://c.example/"]
        );
        assert_eq!(parse_result_urls(html, 1), vec!["https://a.example/"]);
        assert!(parse_result_urls("", 10).is_empty());
    }
}
