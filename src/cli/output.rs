//! CLI output formatting utilities.

use crate::cache::{CacheEntry, ContentSource};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print resolved seminar content.
    pub fn content(title: &str, source: ContentSource, from_cache: bool, content: &str) {
        let origin = if from_cache {
            format!("{}, cached", source)
        } else {
            source.to_string()
        };
        println!("\n{} {}", style(title).bold().underlined(), style(format!("({})", origin)).dim());
        println!();
        if source.is_success() {
            println!("{}", content);
        } else {
            println!("{}", style(content).yellow());
        }
        println!();
    }

    /// Print a one-line cache entry summary.
    pub fn cache_entry(topic: &str, entry: &CacheEntry) {
        let when = entry
            .resolved_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {} ({}, {} chars, {})",
            style("*").cyan(),
            style(topic).bold(),
            style(entry.source).dim(),
            entry.content.chars().count(),
            when
        );
        println!("    {}", style(content_preview(&entry.content, 100)).dim());
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_len {
        content
    } else {
        format!("{}...", crate::text::truncate_chars(&content, max_len))
    }
}
