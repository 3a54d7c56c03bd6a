//! Cache command implementation.

use crate::cache::ContentCache;
use crate::cli::{join_topic, CacheAction, Output};
use crate::config::Settings;
use crate::topic::Topic;
use anyhow::Result;

/// Run the cache command.
pub fn run_cache(action: &CacheAction, settings: Settings) -> Result<()> {
    let path = settings.cache_path();

    match action {
        CacheAction::List => {
            let cache = ContentCache::load(&path);
            if cache.is_empty() {
                Output::info("No cached topics yet. Use 'seminar present <topic>' to add one.");
                return Ok(());
            }

            Output::header(&format!("Cached Topics ({})", cache.len()));
            println!();
            for (topic, entry) in cache.iter() {
                Output::cache_entry(topic, entry);
            }

            let failed = cache.iter().filter(|(_, e)| !e.source.is_success()).count();
            println!();
            Output::kv("Total topics", &cache.len().to_string());
            Output::kv("Failed lookups", &failed.to_string());
        }

        CacheAction::Show { topic } => {
            let topic = Topic::new(join_topic(topic))?;
            let cache = ContentCache::load(&path);
            match cache.get(&topic) {
                Some(entry) => Output::content(topic.as_str(), entry.source, true, &entry.content),
                None => Output::warning(&format!("'{}' is not cached.", topic)),
            }
        }

        CacheAction::Forget { topic } => {
            let topic = Topic::new(join_topic(topic))?;
            let mut cache = ContentCache::load(&path);
            if cache.remove(&topic)? {
                Output::success(&format!("Removed '{}' from the cache.", topic));
            } else {
                Output::warning(&format!("'{}' is not cached.", topic));
            }
        }

        CacheAction::Clear => {
            let mut cache = ContentCache::load(&path);
            let removed = cache.clear()?;
            Output::success(&format!("Removed {} cached topics.", removed));
        }

        CacheAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
