//! Configuration settings for the seminar assistant.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub cache: CacheSettings,
    pub encyclopedia: EncyclopediaSettings,
    pub web_search: WebSearchSettings,
    pub images: ImageSettings,
    pub voice: VoiceSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory where PDFs and image folders are written.
    pub export_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.seminar".to_string(),
            export_dir: ".".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Content cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Path to the JSON cache file.
    pub path: String,
    /// Cache the web-search failure text like real content.
    ///
    /// When false, failed resolutions are never written and cached failures
    /// are retried on the next lookup.
    pub cache_failures: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: "~/.seminar/seminars.json".to_string(),
            cache_failures: true,
        }
    }
}

/// Encyclopedia (Wikipedia) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncyclopediaSettings {
    /// Base URL; `{language}` is replaced with the configured language.
    pub base_url: String,
    /// Wikipedia language edition.
    pub language: String,
    /// User-Agent sent to the API.
    pub user_agent: String,
    /// Maximum characters kept from an article.
    pub max_chars: usize,
}

impl Default for EncyclopediaSettings {
    fn default() -> Self {
        Self {
            base_url: "https://{language}.wikipedia.org".to_string(),
            language: "en".to_string(),
            user_agent: "AI-Seminar-Assistant/1.0".to_string(),
            max_chars: 8000,
        }
    }
}

impl EncyclopediaSettings {
    /// Base URL with the language substituted.
    pub fn resolved_base_url(&self) -> String {
        self.base_url.replace("{language}", &self.language)
    }
}

/// Web search fallback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchSettings {
    /// Search engine HTML endpoint.
    pub engine_url: String,
    /// User-Agent for search and page requests.
    pub user_agent: String,
    /// Per-page fetch timeout in seconds.
    pub timeout_seconds: u64,
    /// Pages with less extracted text than this are discarded.
    pub min_page_chars: usize,
    /// Accepted page text is truncated to this many characters.
    pub max_page_chars: usize,
    /// Stop after this many accepted pages.
    pub max_pages: usize,
    /// Maximum number of result URLs considered.
    pub max_results: usize,
}

impl Default for WebSearchSettings {
    fn default() -> Self {
        Self {
            engine_url: "https://html.duckduckgo.com/html/".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout_seconds: 10,
            min_page_chars: 200,
            max_page_chars: 3000,
            max_pages: 3,
            max_results: 10,
        }
    }
}

impl WebSearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Image fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Fetch images at all.
    pub enabled: bool,
    /// Number of images to download per topic.
    pub count: usize,
    /// Image search HTML endpoint.
    pub search_url: String,
    /// User-Agent for image requests.
    pub user_agent: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 3,
            search_url: "https://www.google.com/search".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Speech input and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Narrate content aloud.
    pub enabled: bool,
    /// Text-to-speech program; receives `-s <rate>` and the text.
    pub tts_command: String,
    /// Speech rate in words per minute.
    pub rate: u32,
    /// Speech recognizer program; prints the recognized text on stdout.
    pub recognizer_command: String,
    /// Recognition language.
    pub language: String,
    /// Ambient-noise calibration period in seconds.
    pub calibration_seconds: u32,
    /// Overall listen timeout in seconds.
    pub listen_timeout_seconds: u64,
    /// Maximum phrase length in seconds.
    pub phrase_limit_seconds: u32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tts_command: "espeak".to_string(),
            rate: 160,
            recognizer_command: "seminar-recognize".to_string(),
            language: "en-IN".to_string(),
            calibration_seconds: 2,
            listen_timeout_seconds: 20,
            phrase_limit_seconds: 15,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SeminarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seminar")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded export directory path.
    pub fn export_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.export_dir)
    }

    /// Get the expanded cache file path.
    pub fn cache_path(&self) -> PathBuf {
        Self::expand_path(&self.cache.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_limits() {
        let settings = Settings::default();
        assert_eq!(settings.encyclopedia.max_chars, 8000);
        assert_eq!(settings.web_search.min_page_chars, 200);
        assert_eq!(settings.web_search.max_page_chars, 3000);
        assert_eq!(settings.web_search.max_pages, 3);
        assert_eq!(settings.web_search.timeout(), Duration::from_secs(10));
        assert_eq!(settings.images.count, 3);
        assert!(settings.cache.cache_failures);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [cache]
            cache_failures = false

            [encyclopedia]
            language = "de"
            "#,
        )
        .unwrap();

        assert!(!settings.cache.cache_failures);
        assert_eq!(settings.cache.path, "~/.seminar/seminars.json");
        assert_eq!(settings.encyclopedia.resolved_base_url(), "https://de.wikipedia.org");
        assert_eq!(settings.voice.rate, 160);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.web_search.max_pages = 5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.web_search.max_pages, 5);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.export_dir, ".");
    }
}
