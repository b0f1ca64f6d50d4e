//! Settings: CLI flag > environment > ~/.salestrack/config.json > defaults

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Result, SalesError};

pub const SOURCE_ENV: &str = "SALESTRACK_SOURCE";
pub const FONTS_DIR_ENV: &str = "SALESTRACK_FONTS_DIR";

const DEFAULT_FONT_FAMILY: &str = "Roboto";
const DEFAULT_CURRENCY: &str = "₱";

/// On-disk config; every field is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub source: Option<String>,
    pub fonts_dir: Option<PathBuf>,
    pub font_family: Option<String>,
    pub currency: Option<String>,
    pub report_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Read a config file. A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|e| SalesError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Values passed on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub fonts_dir: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Snapshot path or export URL
    pub source: String,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    pub currency: String,
    pub report_dir: PathBuf,
}

impl Config {
    /// Load from the user's home directory and process environment
    pub fn load(overrides: Overrides) -> Result<Self> {
        let home = home_dir()?;
        let file = FileConfig::read(&config_path(&home))?;
        Ok(Self::resolve(
            file,
            |key| std::env::var(key).ok().filter(|v| !v.is_empty()),
            overrides,
            &home,
        ))
    }

    /// Merge layers without touching the environment or filesystem
    pub fn resolve<F>(file: FileConfig, env: F, overrides: Overrides, home: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = overrides
            .source
            .or_else(|| env(SOURCE_ENV))
            .or(file.source)
            .unwrap_or_else(|| default_source(home));

        let fonts_dir = overrides
            .fonts_dir
            .or_else(|| env(FONTS_DIR_ENV).map(PathBuf::from))
            .or(file.fonts_dir)
            .unwrap_or_else(|| PathBuf::from("fonts"));

        Self {
            source,
            fonts_dir,
            font_family: file
                .font_family
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            currency: file.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            report_dir: file.report_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// ~/.salestrack
pub fn data_dir(home: &Path) -> PathBuf {
    home.join(".salestrack")
}

pub fn config_path(home: &Path) -> PathBuf {
    data_dir(home).join("config.json")
}

fn default_source(home: &Path) -> String {
    data_dir(home).join("orders").display().to_string()
}

fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| SalesError::Config("failed to get home directory".into()))
}
