//! Listen command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, PresentFlags, TerminalReporter};
use crate::config::Settings;
use crate::presenter::{PresentOptions, Presenter};
use crate::voice::CommandListener;
use anyhow::Result;
use std::sync::Arc;

/// Run the listen command.
pub async fn run_listen(flags: PresentFlags, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Listen, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'seminar doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let mut options = PresentOptions::from(flags);
    if options.narrate && preflight::check(Operation::Present, &settings).is_err() {
        Output::warning("Text-to-speech program not found; continuing without narration.");
        options.narrate = false;
    }

    let listener = Arc::new(CommandListener::from_settings(&settings.voice));
    let mut presenter =
        Presenter::new(&settings, options)?.observer(Arc::new(TerminalReporter::new()));

    if presenter.listen_and_present(listener).await.is_none() {
        Output::info("Run 'seminar listen' to try again, or 'seminar present <topic>' to type it.");
    }

    Ok(())
}
