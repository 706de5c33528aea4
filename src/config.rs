//! Run configuration shared by every component.
//!
//! Values are layered as defaults, then an optional TOML file, then CLI flags.

use crate::error::{GitlocalError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WINDOW_DAYS: u32 = 183;
pub const MAX_WINDOW_DAYS: u32 = 3660;
pub const DEFAULT_REGISTRY_FILE: &str = ".gitlocalstats";
pub const DEFAULT_EXCLUDES: [&str; 5] = ["node_modules", "vendor", "Pictures", "Library", ".Trash"];

/// What to do when a single registered repository cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole run on the first failure.
    #[default]
    Abort,
    /// Log the failure and continue with the next repository.
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub window_days: u32,
    pub registry_path: PathBuf,
    pub exclude: Vec<String>,
    pub on_repo_error: ErrorPolicy,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            registry_path: PathBuf::from(DEFAULT_REGISTRY_FILE),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            on_repo_error: ErrorPolicy::default(),
            color: ColorMode::default(),
        }
    }
}

/// Shape of the optional config file; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct FileConfig {
    window_days: Option<u32>,
    registry: Option<PathBuf>,
    exclude: Vec<String>,
    on_repo_error: Option<ErrorPolicy>,
    color: Option<ColorMode>,
}

/// Overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub window_days: Option<u32>,
    pub registry_path: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub on_repo_error: Option<ErrorPolicy>,
    pub color: Option<ColorMode>,
}

impl Config {
    /// Builds the effective config. A named config file must exist and parse.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = Config::default();
        if let Some(path) = config_path {
            let content = fs::read_to_string(path).map_err(|e| {
                GitlocalError::Config(format!("Failed reading {}: {e}", path.display()))
            })?;
            config.apply_file(parse_file(&content, path)?);
        }
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn weeks_in_window(&self) -> u32 {
        self.window_days / 7
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(days) = file.window_days {
            self.window_days = days;
        }
        if let Some(registry) = file.registry {
            self.registry_path = registry;
        }
        self.exclude.extend(file.exclude);
        if let Some(policy) = file.on_repo_error {
            self.on_repo_error = policy;
        }
        if let Some(color) = file.color {
            self.color = color;
        }
    }

    fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(days) = overrides.window_days {
            self.window_days = days;
        }
        if let Some(registry) = overrides.registry_path {
            self.registry_path = registry;
        }
        self.exclude.extend(overrides.exclude);
        if let Some(policy) = overrides.on_repo_error {
            self.on_repo_error = policy;
        }
        if let Some(color) = overrides.color {
            self.color = color;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.window_days < 7 {
            return Err(GitlocalError::Config(format!(
                "window-days must cover at least one week, got {}",
                self.window_days
            )));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(GitlocalError::Config(format!(
                "window-days must be at most {MAX_WINDOW_DAYS}, got {}",
                self.window_days
            )));
        }
        Ok(())
    }
}

fn parse_file(content: &str, path: &Path) -> Result<FileConfig> {
    toml::from_str(content)
        .map_err(|e| GitlocalError::Config(format!("Invalid config {}: {e}", path.display())))
}
