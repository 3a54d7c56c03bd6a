//! Wikipedia implementation backed by the MediaWiki `extracts` API.

use super::{Article, EncyclopediaLookup, EncyclopediaProvider, Section};
use crate::config::EncyclopediaSettings;
use crate::error::{Result, SeminarError};
use crate::topic::Topic;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
}

/// Wikipedia client.
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    max_chars: usize,
    heading_regex: Regex,
}

impl WikipediaClient {
    /// Create a client from settings.
    pub fn new(settings: &EncyclopediaSettings) -> Result<Self> {
        Self::with_base_url(
            settings.resolved_base_url(),
            &settings.user_agent,
            settings.max_chars,
        )
    }

    /// Create a client against a specific wiki host.
    pub fn with_base_url(base_url: impl Into<String>, user_agent: &str, max_chars: usize) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;

        let heading_regex = Regex::new(r"^(={2,6})\s*(.+?)\s*={2,6}\s*$")
            .map_err(|e| SeminarError::Encyclopedia(format!("Invalid heading pattern: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_chars,
            heading_regex,
        })
    }

    /// Fetch the plain-text extract for a page, or None if it does not exist.
    async fn fetch_extract(&self, title: &str) -> Result<Option<String>> {
        let url = format!("{}/w/api.php", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("exsectionformat", "wiki"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: QueryResponse = response.json().await?;

        let page = body
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| SeminarError::Encyclopedia("Response contained no pages".to_string()))?;

        if page.missing || page.invalid {
            return Ok(None);
        }

        Ok(page.extract)
    }

    /// Split a wiki-formatted plain-text extract into summary and top-level
    /// sections. Text under deeper headings (`===` and below) is dropped, so
    /// each section body is only the text before its first subsection.
    pub(crate) fn parse_extract(&self, extract: &str) -> Article {
        let mut article = Article::default();
        let mut current: Option<Section> = None;
        let mut buffer: Vec<&str> = Vec::new();
        let mut in_subsection = false;

        for line in extract.lines() {
            let Some(caps) = self.heading_regex.captures(line.trim()) else {
                if !in_subsection {
                    buffer.push(line);
                }
                continue;
            };

            if caps[1].len() > 2 && current.is_some() {
                in_subsection = true;
                continue;
            }

            let body = buffer.join("\n").trim().to_string();
            buffer.clear();
            in_subsection = false;
            match current.take() {
                Some(mut section) => {
                    section.body = body;
                    article.sections.push(section);
                }
                None => article.summary = body,
            }
            current = Some(Section {
                title: caps[2].to_string(),
                body: String::new(),
            });
        }

        let body = buffer.join("\n").trim().to_string();
        match current {
            Some(mut section) => {
                section.body = body;
                article.sections.push(section);
            }
            None => article.summary = body,
        }

        article
    }
}

#[async_trait]
impl EncyclopediaProvider for WikipediaClient {
    #[instrument(skip(self), fields(topic = %topic))]
    async fn lookup(&self, topic: &Topic) -> EncyclopediaLookup {
        match self.fetch_extract(topic.as_str()).await {
            Ok(Some(extract)) => {
                let article = self.parse_extract(&extract);
                info!("Found Wikipedia page with {} sections", article.sections.len());
                EncyclopediaLookup::Found(article.render(self.max_chars))
            }
            Ok(None) => {
                debug!("No Wikipedia page");
                EncyclopediaLookup::NotFound
            }
            Err(e) => {
                warn!("Wikipedia lookup failed: {}", e);
                EncyclopediaLookup::Failed(e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }
}
