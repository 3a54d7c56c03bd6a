//! Topic resolution pipeline.
//!
//! Cache lookup, then the encyclopedia, then the web search fallback; the
//! result is written back to the cache before it is returned.

use crate::cache::{CacheEntry, ContentCache, ContentSource};
use crate::config::Settings;
use crate::encyclopedia::{EncyclopediaLookup, EncyclopediaProvider, WikipediaClient};
use crate::error::Result;
use crate::topic::Topic;
use crate::web_search::{PageScraper, WebSearchOutcome, WebSearchProvider};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Resolved content for a topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub topic: Topic,
    pub content: String,
    pub source: ContentSource,
    /// Served from the cache without network I/O.
    pub from_cache: bool,
}

impl Resolution {
    /// False when the content is the web-search failure text.
    pub fn is_success(&self) -> bool {
        self.source.is_success()
    }
}

/// Turns topics into content.
pub struct TopicResolver {
    cache: ContentCache,
    encyclopedia: Arc<dyn EncyclopediaProvider>,
    web_search: Arc<dyn WebSearchProvider>,
    cache_failures: bool,
}

impl TopicResolver {
    /// Create a resolver with Wikipedia, DuckDuckGo and the configured cache file.
    pub fn new(settings: &Settings) -> Result<Self> {
        let cache = ContentCache::load(settings.cache_path());
        let encyclopedia = Arc::new(WikipediaClient::new(&settings.encyclopedia)?);
        let web_search = Arc::new(PageScraper::new(&settings.web_search)?);

        Ok(Self::with_components(cache, encyclopedia, web_search)
            .cache_failures(settings.cache.cache_failures))
    }

    /// Create a resolver with custom components.
    pub fn with_components(
        cache: ContentCache,
        encyclopedia: Arc<dyn EncyclopediaProvider>,
        web_search: Arc<dyn WebSearchProvider>,
    ) -> Self {
        Self {
            cache,
            encyclopedia,
            web_search,
            cache_failures: true,
        }
    }

    /// Whether failed web searches are cached like real content.
    pub fn cache_failures(mut self, enabled: bool) -> Self {
        self.cache_failures = enabled;
        self
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ContentCache {
        &mut self.cache
    }

    /// Resolve a topic to content. Never fails; the worst case is the
    /// web-search failure text.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn resolve(&mut self, topic: &Topic) -> Resolution {
        if let Some(entry) = self.cache.get(topic) {
            if self.cache_failures || entry.source.is_success() {
                debug!("Cache hit ({})", entry.source);
                return Resolution {
                    topic: topic.clone(),
                    content: entry.content.clone(),
                    source: entry.source,
                    from_cache: true,
                };
            }
            info!("Retrying topic whose cached resolution failed");
        }

        let (content, source) = match self.encyclopedia.lookup(topic).await {
            EncyclopediaLookup::Found(text) => (text, ContentSource::Encyclopedia),
            lookup => {
                if let EncyclopediaLookup::Failed(reason) = &lookup {
                    warn!("{} unavailable, falling back to web search: {}", self.encyclopedia.name(), reason);
                } else {
                    info!("No {} page, falling back to web search", self.encyclopedia.name());
                }

                match self.web_search.search(topic).await {
                    WebSearchOutcome::Pages(text) => (text, ContentSource::WebSearch),
                    outcome @ WebSearchOutcome::Insufficient => {
                        (outcome.into_content(), ContentSource::Unavailable)
                    }
                }
            }
        };

        if source.is_success() || self.cache_failures {
            if let Err(e) = self.cache.put(topic, CacheEntry::new(content.clone(), source)) {
                error!("Failed to persist cache: {}", e);
            }
        } else {
            debug!("Not caching failed resolution");
        }

        Resolution {
            topic: topic.clone(),
            content,
            source,
            from_cache: false,
        }
    }
}
