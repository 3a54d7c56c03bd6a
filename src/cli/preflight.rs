//! Pre-flight checks before voice operations.
//!
//! Validates that the configured speech programs are available before
//! starting a pass that would otherwise degrade midway.

use crate::config::Settings;
use crate::error::{Result, SeminarError};
use std::path::{Path, PathBuf};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Presenting only needs the narrator when voice is enabled.
    Present,
    /// Listening needs the recognizer.
    Listen,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Present => {
            if settings.voice.enabled {
                check_tool(&settings.voice.tts_command)?;
            }
        }
        Operation::Listen => {
            check_tool(&settings.voice.recognizer_command)?;
        }
    }
    Ok(())
}

/// Check that a program can be found.
pub fn check_tool(name: &str) -> Result<()> {
    find_program(name)
        .map(|_| ())
        .ok_or_else(|| SeminarError::ToolNotFound(name.to_string()))
}

/// Resolve a program name against `PATH`, or accept an existing path.
pub fn find_program(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_without_voice_has_no_requirements() {
        let mut settings = Settings::default();
        settings.voice.enabled = false;
        tokio_test::assert_ok!(check(Operation::Present, &settings));
    }

    #[test]
    fn test_missing_tool() {
        let err = check_tool("definitely-not-installed-anywhere").unwrap_err();
        assert!(matches!(err, SeminarError::ToolNotFound(_)));
    }

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("speak");
        std::fs::write(&program, "#!/bin/sh\n").unwrap();
        assert_eq!(find_program(program.to_str().unwrap()), Some(program.clone()));
        assert!(find_program(dir.path().join("absent").to_str().unwrap()).is_none());
    }
}
