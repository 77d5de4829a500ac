use core_types::TieBreak;
use serde::Deserialize;
use std::path::PathBuf;

/// Upper bound for `display.precision`.
pub const MAX_PRECISION: u32 = 10;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub logging: Logging,
}

/// Where the record collections are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    /// Directory holding `students.json`, `subjects.json` and `grades.json`.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

/// Parameters for the statistics engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Statistics {
    /// How equal averages (or notes) are ordered in rankings and best-of queries.
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Refuse to compute anything when a coefficient is `<= 0` or a note is
    /// outside `[0, 20]`, instead of skipping those records.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Display {
    /// Decimal places shown for averages.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// --- Default Implementations ---
// These allow a user to omit any section, or any key within a section, from their toml.

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_precision() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Data {
    fn default() -> Self {
        Self { dir: default_data_dir() }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self { precision: default_precision() }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}
