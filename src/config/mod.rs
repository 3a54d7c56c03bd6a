//! Configuration module for the seminar assistant.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    CacheSettings, EncyclopediaSettings, GeneralSettings, ImageSettings, Settings,
    VoiceSettings, WebSearchSettings,
};
