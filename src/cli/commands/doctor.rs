//! Doctor command - verify speech tools, cache and configuration.

use crate::cache::ContentCache;
use crate::cli::preflight::find_program;
use crate::cli::Output;
use super::config::config_file;
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<&Path>) -> anyhow::Result<()> {
    Output::header("Seminar Doctor");
    println!();
    println!("Checking speech tools, cache and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Speech Tools").bold());
    let tool_checks = vec![
        check_tool("Text-to-speech", &settings.voice.tts_command, install_hint_tts()),
        check_tool(
            "Speech recognizer",
            &settings.voice.recognizer_command,
            "Set voice.recognizer_command to a program that prints the recognized text",
        ),
    ];
    for check in &tool_checks {
        check.print();
    }
    checks.extend(tool_checks);

    println!();

    println!("{}", style("Storage").bold());
    let storage_checks = vec![check_cache(settings), check_export_dir(settings)];
    for check in &storage_checks {
        check.print();
    }
    checks.extend(storage_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(&config_file(config_path));
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found. Please fix them before presenting.", errors));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Ready to present.");
    }

    Ok(())
}

/// Speech programs are optional: missing ones only disable voice.
fn check_tool(label: &str, program: &str, hint: &str) -> CheckResult {
    match find_program(program) {
        Some(path) => CheckResult::ok(label, &format!("{}", path.display())),
        None => CheckResult::warning(label, &format!("{} not found", program), hint),
    }
}

fn check_cache(settings: &Settings) -> CheckResult {
    let path = settings.cache_path();
    if !path.exists() {
        return CheckResult::warning(
            "Cache",
            &format!("{} (not created yet)", path.display()),
            "The cache is created after the first seminar",
        );
    }

    let size = std::fs::metadata(&path)
        .map(|m| format_size(m.len()))
        .unwrap_or_else(|_| "unknown size".to_string());
    let cache = ContentCache::load(&path);
    let failed = cache.iter().filter(|(_, e)| !e.source.is_success()).count();

    if failed > 0 {
        CheckResult::warning(
            "Cache",
            &format!("{} ({}, {} topics, {} failed)", path.display(), size, cache.len(), failed),
            "Retry failed topics with: seminar cache forget <topic>",
        )
    } else {
        CheckResult::ok(
            "Cache",
            &format!("{} ({}, {} topics)", path.display(), size, cache.len()),
        )
    }
}

fn check_export_dir(settings: &Settings) -> CheckResult {
    let dir = settings.export_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        return CheckResult::error(
            "Export directory",
            &format!("{}: {}", dir.display(), e),
            "Set general.export_dir to a writable directory",
        );
    }

    match tempfile::tempfile_in(&dir) {
        Ok(_) => CheckResult::ok("Export directory", &format!("{}", dir.display())),
        Err(e) => CheckResult::error(
            "Export directory",
            &format!("{} is not writable: {}", dir.display(), e),
            "Set general.export_dir to a writable directory",
        ),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: seminar config edit",
        )
    }
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Platform-specific install hint for the text-to-speech program.
fn install_hint_tts() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install espeak (or set voice.tts_command)"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install espeak (or your package manager)"
    } else {
        "Install espeak-ng from: https://github.com/espeak-ng/espeak-ng"
    }
}
