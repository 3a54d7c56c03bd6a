//! Terminal rendering of seminar pass progress.

use super::Output;
use crate::error::SeminarError;
use crate::images::ImageRef;
use crate::presenter::{PassObserver, Stage};
use crate::resolver::Resolution;
use crate::topic::Topic;
use crate::voice::VoiceFailure;
use indicatif::ProgressBar;
use std::path::Path;
use std::sync::Mutex;

/// Shows spinners during network stages and prints each result.
#[derive(Default)]
pub struct TerminalReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_spinner(&self, msg: &str) {
        let spinner = Output::spinner(msg);
        if let Some(previous) = self.replace_spinner(Some(spinner)) {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.replace_spinner(None) {
            spinner.finish_and_clear();
        }
    }

    fn replace_spinner(&self, next: Option<ProgressBar>) -> Option<ProgressBar> {
        match self.spinner.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, next),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), next),
        }
    }
}

impl PassObserver for TerminalReporter {
    fn stage_started(&self, stage: Stage<'_>) {
        match stage {
            Stage::Resolving(topic) => self.start_spinner(&format!("Looking up '{}'...", topic)),
            Stage::FetchingImages => self.start_spinner("Fetching images..."),
            Stage::Listening => Output::info("Listening for a seminar topic (Ctrl-C to cancel)..."),
        }
    }

    fn resolved(&self, resolution: &Resolution) {
        self.stop_spinner();
        Output::content(
            &format!("Seminar on {}", resolution.topic.title_case()),
            resolution.source,
            resolution.from_cache,
            &resolution.content,
        );
    }

    fn images_fetched(&self, images: &[ImageRef]) {
        self.stop_spinner();
        if images.is_empty() {
            Output::warning("No images could be downloaded.");
            return;
        }

        Output::info(&format!("Downloaded {} images", images.len()));
        for image in images {
            Output::list_item(&image.path.display().to_string());
        }
    }

    fn pdf_exported(&self, result: Result<&Path, &SeminarError>) {
        match result {
            Ok(path) => Output::success(&format!("Saved PDF to {}", path.display())),
            Err(e) => Output::error(&format!("Could not save PDF: {}", e)),
        }
    }

    fn heard(&self, topic: &Topic) {
        Output::info(&format!("You said: {}", topic));
    }

    fn voice_failed(&self, failure: &VoiceFailure) {
        self.stop_spinner();
        Output::warning(&failure.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_is_cleared_after_stage() {
        let reporter = TerminalReporter::new();
        reporter.stage_started(Stage::FetchingImages);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.images_fetched(&[]);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
