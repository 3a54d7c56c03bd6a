//! Seminar - topic lookup, narration and PDF export
//!
//! A CLI assistant that prepares a short seminar on any topic.
//!
//! # Overview
//!
//! For a topic typed or spoken by the user, Seminar:
//! - Looks the topic up in a local JSON cache
//! - Falls back to a Wikipedia lookup, then to scraping web search results
//! - Reads a short explanation aloud
//! - Downloads a few illustrative images
//! - Exports the content and images as a PDF
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `topic` - Validated topic names
//! - `cache` - Persistent topic → content cache
//! - `encyclopedia` - Encyclopedia lookup (Wikipedia)
//! - `web_search` - Web search fallback and page scraping
//! - `resolver` - Cache → encyclopedia → web search pipeline
//! - `images` - Image search and download
//! - `voice` - Narration and spoken topic capture
//! - `export` - PDF rendering
//! - `presenter` - One full seminar pass
//!
//! # Example
//!
//! ```rust,no_run
//! use seminar::config::Settings;
//! use seminar::resolver::TopicResolver;
//! use seminar::topic::Topic;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let mut resolver = TopicResolver::new(&settings)?;
//!
//!     let resolution = resolver.resolve(&Topic::new("Photosynthesis")?).await;
//!     println!("{} ({})", resolution.content, resolution.source);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod encyclopedia;
pub mod error;
pub mod export;
pub mod images;
pub mod presenter;
pub mod resolver;
pub mod text;
pub mod topic;
pub mod voice;
pub mod web_search;

pub use error::{Result, SeminarError};
