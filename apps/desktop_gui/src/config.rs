use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::{domain::CountMode, request::DEFAULT_MAX_RANGE_LEN};

pub const DEFAULT_CONFIG_FILE: &str = "counting.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_mode: CountMode,
    pub range_start: i64,
    pub range_end: i64,
    pub range_step: i64,
    pub case_sensitive: bool,
    pub max_range_len: usize,
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: CountMode::Basic,
            range_start: 1,
            range_end: 10,
            range_step: 1,
            case_sensitive: false,
            max_range_len: DEFAULT_MAX_RANGE_LEN,
            window_title: "AI Counting Assistant".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    default_mode: Option<CountMode>,
    range_start: Option<i64>,
    range_end: Option<i64>,
    range_step: Option<i64>,
    case_sensitive: Option<bool>,
    max_range_len: Option<usize>,
    window_title: Option<String>,
}

/// Defaults, then the TOML file, then `COUNTING__*` environment overrides.
///
/// A missing default file is fine; a missing explicitly requested file is not.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |name| std::env::var(name).ok())
}

fn load_settings_with(
    explicit_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut settings = Settings::default();
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit_path.is_none() => {
            tracing::debug!(path = %path.display(), "config: no settings file, using defaults");
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    apply_env_overrides(&mut settings, lookup);
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.default_mode {
        settings.default_mode = v;
    }
    if let Some(v) = file_cfg.range_start {
        settings.range_start = v;
    }
    if let Some(v) = file_cfg.range_end {
        settings.range_end = v;
    }
    if let Some(v) = file_cfg.range_step {
        settings.range_step = v;
    }
    if let Some(v) = file_cfg.case_sensitive {
        settings.case_sensitive = v;
    }
    if let Some(v) = file_cfg.max_range_len {
        settings.max_range_len = v;
    }
    if let Some(v) = file_cfg.window_title {
        settings.window_title = v;
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("COUNTING__DEFAULT_MODE") {
        match v.parse::<CountMode>() {
            Ok(mode) => settings.default_mode = mode,
            Err(err) => tracing::warn!(value = %v, "config: ignoring COUNTING__DEFAULT_MODE: {err}"),
        }
    }

    if let Some(v) = lookup("COUNTING__MAX_RANGE_LEN") {
        match v.trim().parse::<usize>() {
            Ok(parsed) => settings.max_range_len = parsed,
            Err(err) => {
                tracing::warn!(value = %v, "config: ignoring COUNTING__MAX_RANGE_LEN: {err}")
            }
        }
    }

    if let Some(v) = lookup("COUNTING__CASE_SENSITIVE") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.case_sensitive = true,
            "0" | "false" | "no" | "off" => settings.case_sensitive = false,
            _ => tracing::warn!(value = %v, "config: ignoring COUNTING__CASE_SENSITIVE"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
