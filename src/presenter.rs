//! Seminar presentation.
//!
//! Drives one full pass for a topic: resolve the content, show it, narrate
//! it, fetch images and export the PDF. A failing step is reported and the
//! pass continues; the user always gets something back. Progress is reported
//! through a [`PassObserver`] so the front end decides how to render it.

use crate::config::Settings;
use crate::error::{Result, SeminarError};
use crate::export::PdfExporter;
use crate::images::{ImageProvider, ImageRef};
use crate::resolver::{Resolution, TopicResolver};
use crate::topic::Topic;
use crate::voice::{
    explanation, CommandNarrator, ListenOutcome, ListenTask, Narrator, SilentNarrator,
    TopicListener, VoiceFailure,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A network-bound step that is about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    Resolving(&'a Topic),
    FetchingImages,
    Listening,
}

/// Receives progress events from a pass. Every hook defaults to a no-op.
pub trait PassObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage<'_>) {}

    fn resolved(&self, _resolution: &Resolution) {}

    fn images_fetched(&self, _images: &[ImageRef]) {}

    fn pdf_exported(&self, _result: std::result::Result<&Path, &SeminarError>) {}

    fn heard(&self, _topic: &Topic) {}

    fn voice_failed(&self, _failure: &VoiceFailure) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl PassObserver for SilentObserver {}

/// Which steps of a pass to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentOptions {
    pub narrate: bool,
    pub images: bool,
    pub pdf: bool,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            narrate: true,
            images: true,
            pdf: true,
        }
    }
}

/// What a pass produced.
#[derive(Debug)]
pub struct SeminarReport {
    pub resolution: Resolution,
    pub images: Vec<ImageRef>,
    pub pdf_path: Option<PathBuf>,
}

/// Presents seminars.
pub struct Presenter {
    resolver: TopicResolver,
    images: ImageProvider,
    narrator: Arc<dyn Narrator>,
    exporter: PdfExporter,
    options: PresentOptions,
    observer: Arc<dyn PassObserver>,
}

impl Presenter {
    /// Create a presenter from settings. Steps disabled in the settings are
    /// turned off regardless of `options`.
    pub fn new(settings: &Settings, options: PresentOptions) -> Result<Self> {
        let resolver = TopicResolver::new(settings)?;
        let images = ImageProvider::new(&settings.images)?;
        let narrator: Arc<dyn Narrator> = if settings.voice.enabled {
            Arc::new(CommandNarrator::from_settings(&settings.voice))
        } else {
            Arc::new(SilentNarrator)
        };
        let exporter = PdfExporter::new(settings.export_dir());

        let options = PresentOptions {
            narrate: options.narrate && settings.voice.enabled,
            images: options.images && settings.images.enabled,
            pdf: options.pdf,
        };

        Ok(Self::with_components(resolver, images, narrator, exporter, options))
    }

    /// Create a presenter with custom components.
    pub fn with_components(
        resolver: TopicResolver,
        images: ImageProvider,
        narrator: Arc<dyn Narrator>,
        exporter: PdfExporter,
        options: PresentOptions,
    ) -> Self {
        Self {
            resolver,
            images,
            narrator,
            exporter,
            options,
            observer: Arc::new(SilentObserver),
        }
    }

    /// Report progress to `observer`.
    pub fn observer(mut self, observer: Arc<dyn PassObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn resolver(&self) -> &TopicResolver {
        &self.resolver
    }

    /// Run a full seminar pass for `topic`.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn present(&mut self, topic: &Topic) -> SeminarReport {
        self.observer.stage_started(Stage::Resolving(topic));
        let resolution = self.resolver.resolve(topic).await;
        self.observer.resolved(&resolution);

        self.speak(&explanation(&resolution.content)).await;

        let images = if self.options.images {
            self.observer.stage_started(Stage::FetchingImages);
            let images = self.images.fetch(topic, self.exporter.export_dir()).await;
            self.observer.images_fetched(&images);
            images
        } else {
            Vec::new()
        };

        let pdf_path = if self.options.pdf {
            match self.exporter.export(topic, &resolution.content, &images) {
                Ok(path) => {
                    self.observer.pdf_exported(Ok(&path));
                    self.speak(&format!("Seminar with images on {} saved as PDF.", topic)).await;
                    Some(path)
                }
                Err(e) => {
                    warn!("PDF export failed: {}", e);
                    self.observer.pdf_exported(Err(&e));
                    None
                }
            }
        } else {
            None
        };

        SeminarReport {
            resolution,
            images,
            pdf_path,
        }
    }

    /// Capture a topic by voice, then present it.
    ///
    /// Voice failures are spoken back and yield `None`. Ctrl-C cancels the
    /// capture.
    pub async fn listen_and_present(&mut self, listener: Arc<dyn TopicListener>) -> Option<SeminarReport> {
        self.speak("Adjusting for ambient noise. Please wait.").await;
        self.speak("Listening for seminar topic now. Please speak clearly.").await;

        self.observer.stage_started(Stage::Listening);
        let task = ListenTask::spawn(listener);
        let abort = task.abort_handle();

        let outcome = tokio::select! {
            outcome = task.outcome() => outcome,
            _ = tokio::signal::ctrl_c() => {
                abort.abort();
                ListenOutcome::Failed(VoiceFailure::Cancelled)
            }
        };

        let heard = match outcome {
            ListenOutcome::Heard(text) => Topic::new(&text).map_err(|_| VoiceFailure::NoSpeech),
            ListenOutcome::Failed(failure) => Err(failure),
        };

        let topic = match heard {
            Ok(topic) => topic,
            Err(failure) => {
                warn!("Voice capture failed: {:?}", failure);
                self.observer.voice_failed(&failure);
                self.speak(&failure.message()).await;
                return None;
            }
        };

        info!("Heard topic '{}'", topic);
        self.observer.heard(&topic);
        self.speak(&format!("You said: {}. Generating seminar...", topic)).await;

        Some(self.present(&topic).await)
    }

    /// Speak `text`, logging rather than propagating failures.
    async fn speak(&self, text: &str) {
        if !self.options.narrate {
            return;
        }
        if let Err(e) = self.narrator.say(text).await {
            warn!("Narration failed: {}", e);
        }
    }
}
