//! CLI module for the seminar assistant.

pub mod commands;
mod output;
pub mod preflight;
mod reporter;

pub use output::Output;
pub use reporter::TerminalReporter;

use clap::{Args, Parser, Subcommand};

/// Seminar - look up a topic, narrate it and export a PDF
///
/// Content comes from Wikipedia, falling back to a web search, and is cached
/// locally so repeated topics are instant.
#[derive(Parser, Debug)]
#[command(name = "seminar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Switches for the steps of a seminar pass.
#[derive(Args, Debug, Clone, Copy)]
pub struct PresentFlags {
    /// Do not narrate aloud
    #[arg(long)]
    pub no_voice: bool,

    /// Do not fetch images
    #[arg(long)]
    pub no_images: bool,

    /// Do not export a PDF
    #[arg(long)]
    pub no_pdf: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare a seminar for a typed topic
    Present {
        /// The seminar topic (multiple words are joined)
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,

        #[command(flatten)]
        flags: PresentFlags,
    },

    /// Say the topic aloud, then prepare the seminar
    Listen {
        #[command(flatten)]
        flags: PresentFlags,
    },

    /// Inspect or edit the content cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Check external tools and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached topics
    List,

    /// Print the cached content for a topic
    Show {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },

    /// Remove a topic so it is resolved again next time
    Forget {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },

    /// Remove every cached topic
    Clear,

    /// Show cache file path
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

/// Join topic words given on the command line.
pub fn join_topic(words: &[String]) -> String {
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_joins_words() {
        let cli = Cli::parse_from(["seminar", "present", "black", "holes", "--no-pdf"]);
        match cli.command {
            Commands::Present { topic, flags } => {
                assert_eq!(join_topic(&topic), "black holes");
                assert!(flags.no_pdf);
                assert!(!flags.no_voice);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_present_requires_topic() {
        assert!(Cli::try_parse_from(["seminar", "present"]).is_err());
    }

    #[test]
    fn test_cache_forget() {
        let cli = Cli::parse_from(["seminar", "-v", "cache", "forget", "Rust"]);
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Cache { action: CacheAction::Forget { .. } }));
    }
}
