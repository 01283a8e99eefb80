//! Settings file handling and input/output path resolution

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{self, settings_path};
use super::{Error, Result};

/// Main settings structure
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Default file locations
    #[serde(default)]
    pub paths: PathSettings,
}

/// File locations used when no command-line option is given
#[derive(Debug, Deserialize, Default)]
pub struct PathSettings {
    /// Test case configuration (JSON)
    pub config: Option<PathBuf>,

    /// Report document
    pub report: Option<PathBuf>,

    /// Workspace root for the legacy layout
    pub workspace: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default settings file
    ///
    /// Returns default settings if the file doesn't exist
    pub fn load() -> Result<Self> {
        match settings_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::SettingsParse(e.to_string()))
    }
}

/// Fully resolved input and output locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub config: PathBuf,
    pub report: PathBuf,
}

impl ReportPaths {
    /// Resolve paths from the command line, the settings file and the
    /// workspace root, in that order of precedence
    ///
    /// `env_root` is the root named by the environment; it beats
    /// `paths.workspace` from the settings file.
    pub fn resolve(
        cli_config: Option<PathBuf>,
        cli_report: Option<PathBuf>,
        settings: &Settings,
        env_root: Option<PathBuf>,
    ) -> Result<Self> {
        let root = env_root.or_else(|| settings.paths.workspace.clone());

        let config = cli_config
            .or_else(|| settings.paths.config.clone())
            .or_else(|| root.as_deref().map(paths::default_config_path))
            .ok_or_else(|| {
                Error::Config(format!(
                    "No test case configuration given. Pass --config <PATH> or set {} or {}",
                    paths::WORKSPACE_ENV,
                    paths::GOPATH_ENV
                ))
            })?;

        let report = cli_report
            .or_else(|| settings.paths.report.clone())
            .or_else(|| root.as_deref().map(paths::default_report_path))
            .ok_or_else(|| {
                Error::Config(format!(
                    "No report path given. Pass --report <PATH> or set {} or {}",
                    paths::WORKSPACE_ENV,
                    paths::GOPATH_ENV
                ))
            })?;

        Ok(Self { config, report })
    }
}
