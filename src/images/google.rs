//! Google image search via the plain HTML results page.

use super::ImageSearch;
use crate::error::{Result, SeminarError};
use crate::topic::Topic;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

/// Google image search scraper.
pub struct GoogleImageSearch {
    client: Client,
    endpoint: String,
}

impl GoogleImageSearch {
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl ImageSearch for GoogleImageSearch {
    async fn image_urls(&self, topic: &Topic, count: usize) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("hl", "en"), ("tbm", "isch"), ("q", topic.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SeminarError::Image(format!(
                "Image search failed with HTTP {}",
                response.status().as_u16()
            )));
        }

        let html = response.text().await?;
        Ok(parse_image_urls(&html, count))
    }
}

/// Take the `<img>` tags after the first (the page logo), up to `count`,
/// and keep those with absolute http(s) sources.
fn parse_image_urls(html: &str, count: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .skip(1)
        .take(count)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| src.starts_with("http"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_logo_and_relative() {
        let html = r#"
            <img src="/logo.png">
            <img src="https://img.example/1.jpg">
            <img src="data:image/gif;base64,R0lGOD">
            <img src="https://img.example/3.jpg">
            <img src="https://img.example/4.jpg">
        "#;

        assert_eq!(
            parse_image_urls(html, 3),
            vec!["https://img.example/1.jpg", "https://img.example/3.jpg"]
        );
        assert_eq!(parse_image_urls(html, 10).len(), 3);
    }
}
