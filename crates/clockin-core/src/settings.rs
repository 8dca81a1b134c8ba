use clap::{CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClockInError, Result};
use crate::models::YearMonth;
use crate::punctuality::PunctualityPolicy;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Monthly attendance summaries from a clock-in CSV export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clockin-report",
    about = "Monthly attendance summaries from a clock-in CSV export",
    version
)]
pub struct Settings {
    /// CSV export of clock-in events
    pub file: PathBuf,

    /// Month to report on as YYYY-MM (defaults to the most recent month in the file)
    #[arg(long)]
    pub month: Option<String>,

    /// Write the print-friendly report to stdout instead of opening the viewer
    #[arg(long)]
    pub print: bool,

    /// Timezone clock-ins are reported in (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Employee id judged against the 9:00 AM schedule (repeatable)
    #[arg(long = "flexible-id", value_name = "ID")]
    pub flexible_ids: Vec<i64>,

    /// JSON config file (defaults to <config dir>/clockin-report/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (defaults to a file under the local data dir while the viewer runs)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── ConfigFile ─────────────────────────────────────────────────────────────────

/// Optional JSON config, e.g. `~/.config/clockin-report/config.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub flexible_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl ConfigFile {
    /// Default location under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| Self::path_in(&dir))
    }

    /// Config path rooted at `base_dir` (used for testing).
    pub fn path_in(base_dir: &Path) -> PathBuf {
        base_dir.join("clockin-report").join("config.json")
    }

    /// Load the config at `path`. A missing file yields `Ok(None)`; an
    /// unreadable or malformed one is a configuration error.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ClockInError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|e| {
            ClockInError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        Ok(Some(config))
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments and merge the config file.
    pub fn load() -> Result<Self> {
        Self::load_impl(std::env::args_os().collect(), ConfigFile::default_path())
    }

    /// Full implementation. `default_config` is consulted when `--config` is
    /// not given; an explicit `--config` path must exist.
    pub fn load_impl(
        args: Vec<std::ffi::OsString>,
        default_config: Option<PathBuf>,
    ) -> Result<Self> {
        let matches = Settings::command().get_matches_from(args);
        let mut settings =
            Settings::from_arg_matches(&matches).map_err(|e| ClockInError::Config(e.to_string()))?;

        let config = match (&settings.config, default_config) {
            (Some(explicit), _) => {
                let loaded = ConfigFile::load_from(explicit)?;
                Some(loaded.ok_or_else(|| {
                    ClockInError::Config(format!("config file not found: {}", explicit.display()))
                })?)
            }
            (None, Some(default)) => ConfigFile::load_from(&default)?,
            (None, None) => None,
        };

        // CLI always wins over the config file; allow-lists are merged.
        if let Some(config) = config {
            if !is_arg_explicitly_set(&matches, "timezone") {
                if let Some(tz) = config.timezone {
                    settings.timezone = tz;
                }
            }
            if !is_arg_explicitly_set(&matches, "theme") {
                if let Some(theme) = config.theme {
                    settings.theme = theme;
                }
            }
            for id in config.flexible_ids {
                if !settings.flexible_ids.contains(&id) {
                    settings.flexible_ids.push(id);
                }
            }
        }

        Ok(Self::resolve_auto_values(settings))
    }

    /// Resolve the `"auto"` timezone and apply the `--debug` flag.
    fn resolve_auto_values(mut settings: Settings) -> Settings {
        settings.timezone = crate::time_utils::resolve_timezone_name(&settings.timezone);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The `--month` selector, if one was given.
    pub fn selected_month(&self) -> Result<Option<YearMonth>> {
        self.month.as_deref().map(str::parse).transpose()
    }

    pub fn punctuality_policy(&self) -> PunctualityPolicy {
        PunctualityPolicy::new(self.flexible_ids.iter().copied())
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
