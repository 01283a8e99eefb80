//! Expected test case configuration
//!
//! Defines the data structures for deserializing the JSON test case list.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::common::{Error, Result};

/// The expected test cases, in the order they are reported
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCases {
    /// Environment preparation steps; a missing one invalidates the run
    pub setup: Vec<String>,
    /// End-to-end tests, each judged on its own
    pub e2e: Vec<String>,
}

/// Which list a test case came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Setup,
    E2e,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Setup => write!(f, "setup"),
            Group::E2e => write!(f, "e2e"),
        }
    }
}

impl TestCases {
    /// Load the test case list from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let cases: Self = serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        // Each identifier must fit on one report line
        if let Some((group, id)) = cases.iter().find(|(_, id)| id.contains(['\n', '\r'])) {
            return Err(Error::ConfigParse {
                path: path.display().to_string(),
                error: format!("{group} test case {id:?} contains a line break"),
            });
        }

        Ok(cases)
    }

    /// All identifiers with their group, setup first
    pub fn iter(&self) -> impl Iterator<Item = (Group, &str)> {
        self.setup
            .iter()
            .map(|id| (Group::Setup, id.as_str()))
            .chain(self.e2e.iter().map(|id| (Group::E2e, id.as_str())))
    }

    pub fn len(&self) -> usize {
        self.setup.len() + self.e2e.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
