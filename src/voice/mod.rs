//! Speech output and voice capture.
//!
//! Both sides delegate to external programs: a text-to-speech command for
//! narration and a recognizer command for capturing the spoken topic.
//! Capture runs as a background task so the caller stays responsive.

mod command;

pub use command::{classify_exit, CommandListener, CommandNarrator};

use crate::error::Result;
use crate::text::truncate_chars;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// Characters of content read aloud in the explanation.
const EXPLANATION_CHARS: usize = 500;

/// Trait for speech output. `say` returns once the text has been spoken.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn say(&self, text: &str) -> Result<()>;
}

/// Narrator that stays quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

#[async_trait]
impl Narrator for SilentNarrator {
    async fn say(&self, text: &str) -> Result<()> {
        debug!("(silent) {}", text);
        Ok(())
    }
}

/// Why voice capture produced no topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceFailure {
    /// Audio was captured but contained no speech.
    NoSpeech,
    /// Speech was heard but could not be transcribed.
    Unrecognized,
    /// The recognition service could not be reached.
    ServiceUnavailable,
    /// Nothing was said before the timeout (seconds).
    Timeout(u64),
    /// Capture was cancelled.
    Cancelled,
    /// Anything else.
    Other(String),
}

impl VoiceFailure {
    /// Message spoken back to the user.
    pub fn message(&self) -> String {
        match self {
            VoiceFailure::NoSpeech => "Sorry, I didn't catch that. Please try again.".to_string(),
            VoiceFailure::Unrecognized => "Speech not recognized clearly. Try again slowly.".to_string(),
            VoiceFailure::ServiceUnavailable => "Could not connect to the recognition service.".to_string(),
            VoiceFailure::Timeout(secs) => {
                format!("Listening timed out. Please speak within {} seconds.", secs)
            }
            VoiceFailure::Cancelled => "Listening was cancelled.".to_string(),
            VoiceFailure::Other(_) => "Sorry, something went wrong while listening.".to_string(),
        }
    }
}

/// Result of a voice capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    Heard(String),
    Failed(VoiceFailure),
}

/// Trait for speech-to-text capture of a single topic.
#[async_trait]
pub trait TopicListener: Send + Sync {
    async fn listen(&self) -> ListenOutcome;
}

/// Voice capture running in the background.
pub struct ListenTask {
    handle: JoinHandle<ListenOutcome>,
}

impl ListenTask {
    /// Start listening on a background task.
    pub fn spawn(listener: Arc<dyn TopicListener>) -> Self {
        let handle = tokio::spawn(async move { listener.listen().await });
        Self { handle }
    }

    /// Abort the capture. The outcome becomes `Cancelled`.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Handle that can cancel the capture after `outcome` has taken the task.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the capture to finish.
    pub async fn outcome(self) -> ListenOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => ListenOutcome::Failed(VoiceFailure::Cancelled),
            Err(e) => ListenOutcome::Failed(VoiceFailure::Other(e.to_string())),
        }
    }
}

/// The spoken introduction: a fixed preamble plus the start of the content.
pub fn explanation(content: &str) -> String {
    format!(
        "Here is an explanation of your seminar topic. {}",
        truncate_chars(content, EXPLANATION_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixedListener(ListenOutcome);

    #[async_trait]
    impl TopicListener for FixedListener {
        async fn listen(&self) -> ListenOutcome {
            self.0.clone()
        }
    }

    struct SlowListener;

    #[async_trait]
    impl TopicListener for SlowListener {
        async fn listen(&self) -> ListenOutcome {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            ListenOutcome::Heard("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_listen_task_returns_outcome() {
        let task = ListenTask::spawn(Arc::new(FixedListener(ListenOutcome::Heard("Gravity".to_string()))));
        assert_eq!(task.outcome().await, ListenOutcome::Heard("Gravity".to_string()));
    }

    #[tokio::test]
    async fn test_listen_task_cancel() {
        let task = ListenTask::spawn(Arc::new(SlowListener));
        task.cancel();
        assert_eq!(task.outcome().await, ListenOutcome::Failed(VoiceFailure::Cancelled));
    }

    #[test]
    fn test_explanation_is_bounded() {
        let text = "a".repeat(2000);
        let spoken = explanation(&text);
        assert!(spoken.starts_with("Here is an explanation of your seminar topic. "));
        assert_eq!(spoken.chars().count(), "Here is an explanation of your seminar topic. ".len() + 500);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            VoiceFailure::Timeout(20).message(),
            "Listening timed out. Please speak within 20 seconds."
        );
        assert!(VoiceFailure::Other("boom".into()).message().contains("something went wrong"));
    }

    #[tokio::test]
    async fn test_silent_narrator() {
        tokio_test::assert_ok!(SilentNarrator.say("hello").await);
    }
}
