//! Report document
//!
//! One `<identifier>: <status>` line per expected test case. The file is
//! rewritten whole on every change, through a temporary file in the same
//! directory that is renamed over the old one.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::common::{Error, Result};

use super::cases::TestCases;

/// Separator between identifier and status on a report line
const SEPARATOR: &str = ": ";

/// Outcome recorded for one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Not yet reconciled
    Na,
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Na => "NA",
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }

    /// Parse a status token as written in the report
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "NA" => Some(Status::Na),
            "PASS" => Some(Status::Pass),
            "FAIL" => Some(Status::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single report line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub identifier: String,
    pub status: Status,
}

/// Number of entries in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub na: usize,
    pub pass: usize,
    pub fail: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.na + self.pass + self.fail
    }
}

/// In-memory form of the report document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// A report with every expected test case at `NA`
    pub fn from_cases(cases: &TestCases) -> Self {
        let entries = cases
            .iter()
            .map(|(_, id)| ReportEntry {
                identifier: id.to_string(),
                status: Status::Na,
            })
            .collect();
        Self { entries }
    }

    /// Parse report text
    ///
    /// Lines split at their last `": "`, so identifiers may themselves
    /// contain the separator. Blank lines are skipped.
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = line
                .rsplit_once(SEPARATOR)
                .and_then(|(identifier, token)| {
                    Status::parse(token.trim()).map(|status| ReportEntry {
                        identifier: identifier.to_string(),
                        status,
                    })
                })
                .ok_or_else(|| Error::ReportFormat {
                    line: idx + 1,
                    content: line.to_string(),
                })?;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Render the report in its on-disk form
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.identifier);
            out.push_str(SEPARATOR);
            out.push_str(entry.status.as_str());
            out.push('\n');
        }
        out
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Status of the first line for `identifier`
    pub fn status_of(&self, identifier: &str) -> Option<Status> {
        self.entries
            .iter()
            .find(|e| e.identifier == identifier)
            .map(|e| e.status)
    }

    /// Set the status on every line for `identifier`, returning how many
    /// lines matched
    pub fn set_status(&mut self, identifier: &str, status: Status) -> usize {
        let mut matched = 0;
        for entry in self.entries.iter_mut().filter(|e| e.identifier == identifier) {
            entry.status = status;
            matched += 1;
        }
        matched
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in &self.entries {
            match entry.status {
                Status::Na => counts.na += 1,
                Status::Pass => counts.pass += 1,
                Status::Fail => counts.fail += 1,
            }
        }
        counts
    }

    /// Read and parse a report file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        Self::parse(&content)
    }

    /// Atomically replace the report file with this report
    ///
    /// The replacement keeps the permissions of the existing report. A new
    /// report gets whatever a plain create gives it under the current umask.
    pub fn write(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        if !path.exists() {
            File::create(path).map_err(|e| Error::file_write(path, e))?;
        }
        let permissions = fs::metadata(path)
            .map_err(|e| Error::file_write(path, e))?
            .permissions();

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::file_write(path, e))?;
        tmp.write_all(self.render().as_bytes())
            .and_then(|()| tmp.flush())
            .and_then(|()| tmp.as_file().set_permissions(permissions))
            .map_err(|e| Error::file_write(path, e))?;
        tmp.persist(path).map_err(|e| Error::file_write(path, e.error))?;

        tracing::debug!(path = %path.display(), entries = self.entries.len(), "Report written");
        Ok(())
    }

    /// Create the report for a run, replacing any previous one
    pub fn initialize(path: &Path, cases: &TestCases) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| Error::file_write(path, e))?;
            }
        }

        let report = Self::from_cases(cases);
        for (group, id) in cases.iter() {
            tracing::debug!(%group, identifier = id, "Expecting test case");
        }
        report.write(path)?;
        Ok(report)
    }
}

/// Rewrite the status of one test case in the report file
///
/// Fails if the report can't be read back, has no line for `identifier`,
/// or can't be replaced.
pub fn update_status(path: &Path, identifier: &str, status: Status) -> Result<()> {
    let mut report = Report::load(path).map_err(|e| Error::report_update(identifier, e))?;

    if report.set_status(identifier, status) == 0 {
        return Err(Error::report_update(identifier, "no matching line in report"));
    }

    report
        .write(path)
        .map_err(|e| Error::report_update(identifier, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cases(setup: &[&str], e2e: &[&str]) -> TestCases {
        TestCases {
            setup: setup.iter().map(|s| s.to_string()).collect(),
            e2e: e2e.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(Status::parse("NA"), Some(Status::Na));
        assert_eq!(Status::parse("PASS"), Some(Status::Pass));
        assert_eq!(Status::parse("FAIL"), Some(Status::Fail));
        assert_eq!(Status::parse("pass"), None);
        assert_eq!(Status::Fail.to_string(), "FAIL");
    }

    #[test]
    fn test_initialize_writes_na_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.out");
        let cases = cases(&["init-cluster", "create-sc"], &["create-volume", "delete-volume"]);

        Report::initialize(&path, &cases).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "init-cluster: NA\ncreate-sc: NA\ncreate-volume: NA\ndelete-volume: NA\n"
        );
    }

    #[test]
    fn test_initialize_truncates_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.out");
        fs::write(&path, "stale: PASS\nolder: FAIL\nmore: PASS\n").unwrap();

        Report::initialize(&path, &cases(&[], &["only"])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "only: NA\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrites_keep_report_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.out");
        fs::write(&path, "stale: PASS\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;

        Report::initialize(&path, &cases(&["init"], &["a"])).unwrap();
        assert_eq!(mode(&path), 0o644);

        update_status(&path, "a", Status::Pass).unwrap();
        assert_eq!(mode(&path), 0o644);
        assert_eq!(fs::read_to_string(&path).unwrap(), "init: NA\na: PASS\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_report_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.out");
        File::create(&plain).unwrap();
        let path = dir.path().join("e2e.out");

        Report::initialize(&path, &cases(&[], &["a"])).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[test]
    fn test_initialize_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("reports").join("e2e.out");

        Report::initialize(&path, &cases(&["a"], &[])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a: NA\n");
    }

    #[test]
    fn test_parse_splits_at_last_separator() {
        let report = Report::parse("suite: create volume: PASS\n\nplain: NA\n").unwrap();
        assert_eq!(report.entries().len(), 2);
        assert_eq!(report.entries()[0].identifier, "suite: create volume");
        assert_eq!(report.status_of("suite: create volume"), Some(Status::Pass));
        assert_eq!(report.status_of("plain"), Some(Status::Na));
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        let err = Report::parse("ok: NA\nno separator here\n").unwrap_err();
        match err {
            Error::ReportFormat { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "no separator here");
            }
            other => panic!("Expected ReportFormat, got {other:?}"),
        }

        assert!(Report::parse("case: MAYBE\n").is_err());
    }

    #[test]
    fn test_set_status_matches_exact_identifier() {
        let mut report = Report::parse("volume: NA\ncreate-volume: NA\nvolume: NA\n").unwrap();

        assert_eq!(report.set_status("volume", Status::Pass), 2);
        assert_eq!(report.status_of("create-volume"), Some(Status::Na));
        assert_eq!(report.set_status("missing", Status::Fail), 0);
        assert_eq!(report.counts(), StatusCounts { na: 1, pass: 2, fail: 0 });
    }

    #[test]
    fn test_update_status_rewrites_single_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.out");
        Report::initialize(&path, &cases(&["init"], &["a", "b"])).unwrap();

        update_status(&path, "a", Status::Fail).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "init: NA\na: FAIL\nb: NA\n"
        );
    }

    #[test]
    fn test_update_status_unknown_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.out");
        Report::initialize(&path, &cases(&["init"], &[])).unwrap();

        let err = update_status(&path, "other", Status::Pass).unwrap_err();
        assert!(matches!(err, Error::ReportUpdate { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "init: NA\n");
    }

    #[test]
    fn test_update_status_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let err = update_status(&dir.path().join("gone.out"), "init", Status::Pass).unwrap_err();
        assert!(matches!(err, Error::ReportUpdate { .. }));
    }
}
