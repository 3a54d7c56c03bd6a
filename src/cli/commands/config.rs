//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the config command against `config_path`, or the default location
/// when `--config` was not given.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: Option<&Path>) -> Result<()> {
    let path = config_file(config_path);

    match action {
        ConfigAction::Show => show(&settings, &path),
        ConfigAction::Edit => edit(&settings, &path),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// The file the config commands operate on.
pub(crate) fn config_file(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_config_path)
}

fn show(settings: &Settings, path: &Path) -> Result<()> {
    let rendered = toml::to_string_pretty(settings).context("Failed to serialize config")?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# defaults ({} does not exist)", path.display());
    }
    println!("{}", rendered);
    Ok(())
}

/// Open the config file in `$EDITOR`, writing the current settings first
/// if the file does not exist yet.
fn edit(settings: &Settings, path: &Path) -> Result<()> {
    if ensure_config_file(settings, path)? {
        Output::info(&format!("Created config at {}", path.display()));
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    Output::info(&format!("Opening {} in {}...", path.display(), editor));

    match std::process::Command::new(&editor).arg(path).status() {
        Ok(status) if status.success() => {
            // A broken file would make every later command fail to start.
            match Settings::load_from(Some(&path.to_path_buf())) {
                Ok(_) => Output::success("Config saved."),
                Err(e) => Output::warning(&format!("Config no longer parses: {}", e)),
            }
        }
        Ok(_) => Output::warning("Editor exited with non-zero status."),
        Err(e) => {
            Output::error(&format!("Failed to open editor '{}': {}", editor, e));
            Output::info(&format!("Config file is at: {}", path.display()));
        }
    }

    Ok(())
}

/// Write `settings` to `path` unless a file is already there. Returns
/// whether a file was created.
fn ensure_config_file(settings: &Settings, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    settings
        .save_to(&path.to_path_buf())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
