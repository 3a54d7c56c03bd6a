//! Web search fallback.
//!
//! When the encyclopedia has no page for a topic, a search engine supplies
//! result URLs and the paragraph text of the first few substantial pages
//! becomes the content.

mod duckduckgo;

pub use duckduckgo::DuckDuckGoEngine;

use crate::config::WebSearchSettings;
use crate::error::{Result, SeminarError};
use crate::text::truncate_chars;
use crate::topic::Topic;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Text returned when no page yielded usable content.
pub const INSUFFICIENT_DATA: &str = "Couldn't extract enough data from the web.";

/// Outcome of a web search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebSearchOutcome {
    /// Newline-joined text of the accepted pages.
    Pages(String),
    /// Nothing usable was extracted.
    Insufficient,
}

impl WebSearchOutcome {
    /// The text to present: page content or the failure placeholder.
    pub fn content(&self) -> &str {
        match self {
            WebSearchOutcome::Pages(text) => text,
            WebSearchOutcome::Insufficient => INSUFFICIENT_DATA,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            WebSearchOutcome::Pages(text) => text,
            WebSearchOutcome::Insufficient => INSUFFICIENT_DATA.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WebSearchOutcome::Pages(_))
    }
}

/// Trait for web search fallbacks. Never fails outward.
#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    async fn search(&self, topic: &Topic) -> WebSearchOutcome;
}

/// Trait for search engines that turn a query into ordered result URLs.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn result_urls(&self, query: &str, limit: usize) -> Result<Vec<String>>;

    fn name(&self) -> &'static str;
}

/// Thresholds applied to fetched pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeLimits {
    /// Pages with fewer extracted characters are discarded.
    pub min_page_chars: usize,
    /// Accepted text is cut to this many characters.
    pub max_page_chars: usize,
    /// Stop once this many pages are accepted.
    pub max_pages: usize,
    /// Result URLs requested from the engine.
    pub max_results: usize,
}

impl Default for ScrapeLimits {
    fn default() -> Self {
        Self {
            min_page_chars: 200,
            max_page_chars: 3000,
            max_pages: 3,
            max_results: 10,
        }
    }
}

impl From<&WebSearchSettings> for ScrapeLimits {
    fn from(settings: &WebSearchSettings) -> Self {
        Self {
            min_page_chars: settings.min_page_chars,
            max_page_chars: settings.max_page_chars,
            max_pages: settings.max_pages,
            max_results: settings.max_results,
        }
    }
}

/// Web search provider that scrapes paragraph text from result pages.
pub struct PageScraper {
    engine: Arc<dyn SearchEngine>,
    client: Client,
    limits: ScrapeLimits,
}

impl PageScraper {
    /// Create a scraper using the configured engine endpoint.
    pub fn new(settings: &WebSearchSettings) -> Result<Self> {
        let engine = Arc::new(DuckDuckGoEngine::new(
            &settings.engine_url,
            &settings.user_agent,
            settings.timeout(),
        )?);
        Self::with_engine(engine, settings)
    }

    /// Create a scraper with a custom search engine.
    pub fn with_engine(engine: Arc<dyn SearchEngine>, settings: &WebSearchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(&settings.user_agent)
            .build()?;

        Ok(Self {
            engine,
            client,
            limits: ScrapeLimits::from(settings),
        })
    }

    pub fn limits(&self) -> ScrapeLimits {
        self.limits
    }

    /// Fetch a page and return its paragraph text.
    async fn fetch_paragraphs(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeminarError::WebSearch(format!("HTTP {}", status.as_u16())));
        }

        let html = response.text().await?;
        Ok(extract_paragraphs(&html))
    }
}

#[async_trait]
impl WebSearchProvider for PageScraper {
    #[instrument(skip(self), fields(topic = %topic))]
    async fn search(&self, topic: &Topic) -> WebSearchOutcome {
        let urls = match self.engine.result_urls(topic.as_str(), self.limits.max_results).await {
            Ok(urls) => urls,
            Err(e) => {
                error!("{} search error: {}", self.engine.name(), e);
                return WebSearchOutcome::Insufficient;
            }
        };

        debug!("{} returned {} result URLs", self.engine.name(), urls.len());

        let mut accepted: Vec<String> = Vec::new();

        for url in urls {
            if accepted.len() >= self.limits.max_pages {
                break;
            }

            let text = match self.fetch_paragraphs(&url).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to extract from {}: {}", url, e);
                    continue;
                }
            };

            let len = text.chars().count();
            if len < self.limits.min_page_chars {
                debug!("Skipping {} ({} chars of paragraph text)", url, len);
                continue;
            }

            debug!("Accepted {} ({} chars)", url, len);
            accepted.push(truncate_chars(&text, self.limits.max_page_chars));
        }

        if accepted.is_empty() {
            warn!("No usable pages for '{}'", topic);
            WebSearchOutcome::Insufficient
        } else {
            info!("Collected text from {} pages", accepted.len());
            WebSearchOutcome::Pages(accepted.join("\n"))
        }
    }
}

/// Concatenate the text of every `<p>` element with single spaces.
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_paragraphs() {
        let html = r#"
            <html><body>
                <nav><a href="/">Home</a></nav>
                <p>First <b>bold</b> paragraph.</p>
                <div><p>Second paragraph.</p></div>
                <footer>Copyright</footer>
            </body></html>
        "#;
        assert_eq!(extract_paragraphs(html), "First bold paragraph. Second paragraph.");
    }

    #[test]
    fn test_extract_paragraphs_empty() {
        assert_eq!(extract_paragraphs("<html><body><div>no paragraphs</div></body></html>"), "");
        assert_eq!(extract_paragraphs(""), "");
    }

    #[test]
    fn test_outcome_content() {
        assert_eq!(WebSearchOutcome::Insufficient.content(), INSUFFICIENT_DATA);
        assert!(!WebSearchOutcome::Insufficient.is_success());

        let pages = WebSearchOutcome::Pages("text".to_string());
        assert_eq!(pages.content(), "text");
        assert!(pages.is_success());
        assert_eq!(pages.into_content(), "text");
    }

    #[test]
    fn test_limits_from_settings() {
        let settings = WebSearchSettings::default();
        assert_eq!(ScrapeLimits::from(&settings), ScrapeLimits::default());
    }
}
