//! Encyclopedia lookup for seminar topics.
//!
//! Provides a trait-based interface so the resolver can be driven by the
//! Wikipedia client or by a test double.

mod wikipedia;

pub use wikipedia::WikipediaClient;

use crate::text::truncate_chars;
use crate::topic::Topic;
use async_trait::async_trait;

/// Outcome of an encyclopedia lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncyclopediaLookup {
    /// A page exists; the rendered article text.
    Found(String),
    /// No page exists for the topic. Not an error.
    NotFound,
    /// The lookup could not be completed.
    Failed(String),
}

/// Trait for encyclopedia providers.
#[async_trait]
pub trait EncyclopediaProvider: Send + Sync {
    /// Look up a page matching the topic exactly.
    async fn lookup(&self, topic: &Topic) -> EncyclopediaLookup;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// A titled section of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// An article split into its summary and sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub summary: String,
    pub sections: Vec<Section>,
}

impl Article {
    /// Summary followed by `"<heading>:\n<body>"` blocks, joined by blank
    /// lines and cut to `max_chars` characters.
    pub fn render(&self, max_chars: usize) -> String {
        let mut parts = Vec::with_capacity(self.sections.len() + 1);
        parts.push(self.summary.clone());
        for section in &self.sections {
            parts.push(format!("{}:\n{}", section.title, section.body));
        }
        truncate_chars(&parts.join("\n\n"), max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_sections() {
        let article = Article {
            summary: "Plants convert light into energy.".to_string(),
            sections: vec![
                Section {
                    title: "Overview".to_string(),
                    body: "Chlorophyll absorbs light.".to_string(),
                },
                Section {
                    title: "History".to_string(),
                    body: "Discovered in the 18th century.".to_string(),
                },
            ],
        };

        assert_eq!(
            article.render(8000),
            "Plants convert light into energy.\n\nOverview:\nChlorophyll absorbs light.\n\nHistory:\nDiscovered in the 18th century."
        );
    }

    #[test]
    fn test_render_truncates() {
        let article = Article {
            summary: "x".repeat(9000),
            sections: vec![],
        };
        assert_eq!(article.render(8000).chars().count(), 8000);
    }

    #[test]
    fn test_render_summary_only() {
        let article = Article {
            summary: "Just a summary.".to_string(),
            sections: vec![],
        };
        assert_eq!(article.render(8000), "Just a summary.");
    }
}
