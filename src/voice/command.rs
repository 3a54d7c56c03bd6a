//! Voice backends that shell out to external programs.

use super::{ListenOutcome, Narrator, TopicListener, VoiceFailure};
use crate::config::VoiceSettings;
use crate::error::{Result, SeminarError};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Text-to-speech through a program such as `espeak`.
///
/// Invoked as `<program> -s <rate> <text>`.
pub struct CommandNarrator {
    program: String,
    rate: u32,
}

impl CommandNarrator {
    pub fn new(program: impl Into<String>, rate: u32) -> Self {
        Self {
            program: program.into(),
            rate,
        }
    }

    pub fn from_settings(settings: &VoiceSettings) -> Self {
        Self::new(&settings.tts_command, settings.rate)
    }
}

#[async_trait]
impl Narrator for CommandNarrator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn say(&self, text: &str) -> Result<()> {
        let result = Command::new(&self.program)
            .arg("-s")
            .arg(self.rate.to_string())
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                let err = String::from_utf8_lossy(&out.stderr);
                Err(SeminarError::Voice(format!("{} failed: {}", self.program, err.trim())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SeminarError::ToolNotFound(self.program.clone()))
            }
            Err(e) => Err(SeminarError::Voice(format!("{} error: {}", self.program, e))),
        }
    }
}

/// Speech capture through a recognizer program.
///
/// Invoked as `<program> --language <lang> --calibration <secs>
/// --timeout <secs> --phrase-limit <secs>`. The program prints the
/// recognized text on stdout and signals failures by exit code:
/// 2 unrecognized speech, 3 service unavailable, 4 timeout.
pub struct CommandListener {
    program: String,
    language: String,
    calibration_seconds: u32,
    listen_timeout_seconds: u64,
    phrase_limit_seconds: u32,
}

impl CommandListener {
    pub fn from_settings(settings: &VoiceSettings) -> Self {
        Self {
            program: settings.recognizer_command.clone(),
            language: settings.language.clone(),
            calibration_seconds: settings.calibration_seconds,
            listen_timeout_seconds: settings.listen_timeout_seconds,
            phrase_limit_seconds: settings.phrase_limit_seconds,
        }
    }

    /// Upper bound on the whole capture: calibration, waiting, phrase.
    fn deadline(&self) -> Duration {
        Duration::from_secs(
            self.calibration_seconds as u64
                + self.listen_timeout_seconds
                + self.phrase_limit_seconds as u64,
        )
    }
}

#[async_trait]
impl TopicListener for CommandListener {
    #[instrument(skip(self))]
    async fn listen(&self) -> ListenOutcome {
        let child = Command::new(&self.program)
            .arg("--language")
            .arg(&self.language)
            .arg("--calibration")
            .arg(self.calibration_seconds.to_string())
            .arg("--timeout")
            .arg(self.listen_timeout_seconds.to_string())
            .arg("--phrase-limit")
            .arg(self.phrase_limit_seconds.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.deadline(), child).await {
            Err(_) => {
                warn!("Recognizer did not finish within {:?}", self.deadline());
                ListenOutcome::Failed(VoiceFailure::Timeout(self.listen_timeout_seconds))
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Recognizer {} not found", self.program);
                ListenOutcome::Failed(VoiceFailure::Other(format!("{} not found", self.program)))
            }
            Ok(Err(e)) => {
                warn!("Speech recognition error: {}", e);
                ListenOutcome::Failed(VoiceFailure::Other(e.to_string()))
            }
            Ok(Ok(out)) => {
                let stdout = String::from_utf8_lossy(&out.stdout);
                debug!("Recognizer exited with {:?}", out.status.code());
                match classify_exit(out.status.code(), &stdout) {
                    ListenOutcome::Failed(VoiceFailure::Timeout(_)) => {
                        ListenOutcome::Failed(VoiceFailure::Timeout(self.listen_timeout_seconds))
                    }
                    outcome => outcome,
                }
            }
        }
    }
}

/// Map a recognizer exit code and stdout to an outcome.
pub fn classify_exit(code: Option<i32>, stdout: &str) -> ListenOutcome {
    match code {
        Some(0) => {
            let text = stdout.trim();
            if text.is_empty() {
                ListenOutcome::Failed(VoiceFailure::NoSpeech)
            } else {
                ListenOutcome::Heard(text.to_string())
            }
        }
        Some(2) => ListenOutcome::Failed(VoiceFailure::Unrecognized),
        Some(3) => ListenOutcome::Failed(VoiceFailure::ServiceUnavailable),
        Some(4) => ListenOutcome::Failed(VoiceFailure::Timeout(0)),
        Some(other) => ListenOutcome::Failed(VoiceFailure::Other(format!("exit code {}", other))),
        None => ListenOutcome::Failed(VoiceFailure::Other("terminated by signal".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exit() {
        assert_eq!(
            classify_exit(Some(0), "  black holes\n"),
            ListenOutcome::Heard("black holes".to_string())
        );
        assert_eq!(classify_exit(Some(0), "\n"), ListenOutcome::Failed(VoiceFailure::NoSpeech));
        assert_eq!(classify_exit(Some(2), ""), ListenOutcome::Failed(VoiceFailure::Unrecognized));
        assert_eq!(classify_exit(Some(3), ""), ListenOutcome::Failed(VoiceFailure::ServiceUnavailable));
        assert!(matches!(classify_exit(Some(4), ""), ListenOutcome::Failed(VoiceFailure::Timeout(_))));
        assert!(matches!(classify_exit(Some(1), ""), ListenOutcome::Failed(VoiceFailure::Other(_))));
        assert!(matches!(classify_exit(None, ""), ListenOutcome::Failed(VoiceFailure::Other(_))));
    }

    #[test]
    fn test_listener_deadline() {
        let listener = CommandListener::from_settings(&VoiceSettings::default());
        assert_eq!(listener.deadline(), Duration::from_secs(2 + 20 + 15));
    }

    #[tokio::test]
    async fn test_missing_narrator_program() {
        let narrator = CommandNarrator::new("definitely-not-a-real-tts-binary", 160);
        let err = narrator.say("hello").await.unwrap_err();
        assert!(matches!(err, SeminarError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_recognizer_program() {
        let settings = VoiceSettings {
            recognizer_command: "definitely-not-a-real-recognizer".to_string(),
            ..VoiceSettings::default()
        };
        let outcome = CommandListener::from_settings(&settings).listen().await;
        assert!(matches!(outcome, ListenOutcome::Failed(VoiceFailure::Other(_))));
    }
}
