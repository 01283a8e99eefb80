//! Default locations for the settings file and the legacy workspace layout
//!
//! The legacy layout roots everything at the CSI driver checkout inside
//! `$GOPATH`. `E2E_REPORT_WORKSPACE` points at a checkout directly.

use std::path::{Path, PathBuf};

/// Name used for the settings directory
const APP_NAME: &str = "e2e-report";

/// Environment variable naming the workspace root directly
pub const WORKSPACE_ENV: &str = "E2E_REPORT_WORKSPACE";

/// Go workspace variable the legacy layout hangs off
pub const GOPATH_ENV: &str = "GOPATH";

/// Checkout location of the driver repository below `$GOPATH`
const GOPATH_REPO: &str = "src/github.com/IBM/ibm-csi-common";

/// Test case list, relative to the workspace root
const CONFIG_RELATIVE: &str = "tests/e2e/conf/testcases.json";

/// Report file, relative to the workspace root
const REPORT_RELATIVE: &str = "block-vpc-csi-driver-e2e.out";

/// Get the settings directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/e2e-report/`
/// - macOS: `~/Library/Application Support/e2e-report/`
/// - Windows: `%APPDATA%\e2e-report\`
pub fn settings_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the settings file
pub fn settings_path() -> Option<PathBuf> {
    settings_dir().map(|dir| dir.join("config.toml"))
}

/// Workspace root as given by the process environment, if any
pub fn env_workspace_root() -> Option<PathBuf> {
    workspace_root_from(
        std::env::var(WORKSPACE_ENV).ok().as_deref(),
        std::env::var(GOPATH_ENV).ok().as_deref(),
    )
}

/// Resolve the workspace root from the two environment values
///
/// An explicit workspace wins over the `$GOPATH` layout. Empty values count
/// as unset.
pub fn workspace_root_from(workspace: Option<&str>, gopath: Option<&str>) -> Option<PathBuf> {
    if let Some(dir) = workspace.filter(|s| !s.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    gopath
        .filter(|s| !s.is_empty())
        .map(|gopath| PathBuf::from(gopath).join(GOPATH_REPO))
}

/// Test case configuration path inside a workspace
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_RELATIVE)
}

/// Report path inside a workspace
pub fn default_report_path(root: &Path) -> PathBuf {
    root.join(REPORT_RELATIVE)
}
