//! Present command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{join_topic, Output, PresentFlags, TerminalReporter};
use crate::config::Settings;
use crate::presenter::{PresentOptions, Presenter};
use crate::topic::Topic;
use anyhow::Result;
use std::sync::Arc;

impl From<PresentFlags> for PresentOptions {
    fn from(flags: PresentFlags) -> Self {
        Self {
            narrate: !flags.no_voice,
            images: !flags.no_images,
            pdf: !flags.no_pdf,
        }
    }
}

/// Run the present command.
pub async fn run_present(words: &[String], flags: PresentFlags, settings: Settings) -> Result<()> {
    let topic = match Topic::new(join_topic(words)) {
        Ok(topic) => topic,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    let mut options = PresentOptions::from(flags);
    if options.narrate {
        if let Err(e) = preflight::check(Operation::Present, &settings) {
            Output::warning(&format!("{}; continuing without narration.", e));
            options.narrate = false;
        }
    }

    let mut presenter =
        Presenter::new(&settings, options)?.observer(Arc::new(TerminalReporter::new()));
    let report = presenter.present(&topic).await;

    if !report.resolution.is_success() {
        Output::warning("No usable content was found for this topic.");
        Output::info(&format!("Run 'seminar cache forget {}' to retry later.", topic));
    }

    Ok(())
}
