//! Snapshot reader boundary.
//!
//! The core never talks to a tracker or a database. A [`SnapshotReader`]
//! hands it one complete, already-materialized batch of records per
//! invocation; readers are injected per call rather than held in process
//! state. [`JsonlReader`] is the file-backed implementation: one
//! JSON-encoded record per line.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Result, TreeError};
use crate::model::{FeatureLink, IssueRecord};
use crate::query::SnapshotFilter;
use crate::util;

/// Bulk-read access to issue records.
pub trait SnapshotReader {
    /// Read one complete batch of records matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot be read.
    fn read_issues(&self, filter: &SnapshotFilter) -> Result<Vec<IssueRecord>>;
}

/// File-backed snapshot reader over a JSONL file.
pub struct JsonlReader {
    path: PathBuf,
}

impl JsonlReader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotReader for JsonlReader {
    fn read_issues(&self, filter: &SnapshotFilter) -> Result<Vec<IssueRecord>> {
        let file = fs::File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TreeError::FileNotFound(self.path.clone())
            } else {
                TreeError::Io(e)
            }
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut record: IssueRecord =
                serde_json::from_str(trimmed).map_err(|e| TreeError::SnapshotParse {
                    line: line_num + 1,
                    reason: e.to_string(),
                })?;

            if record.project.is_empty() {
                record.project = util::project_of(&record.key).to_string();
            }

            if record_matches(&record, filter) {
                records.push(record);
            }
        }

        Ok(records)
    }
}

/// A key filter keeps records that point at the key through any of the
/// reference fields, raw and unresolved; precedence plays no part here.
fn record_matches(record: &IssueRecord, filter: &SnapshotFilter) -> bool {
    if let Some(ref project) = filter.project {
        if record.project != *project {
            return false;
        }
    }
    if let Some(ref key) = filter.key {
        let references = [
            record.parent_ref.as_deref(),
            record.feature_ref.as_ref().and_then(FeatureLink::key),
            record.epic_ref.as_deref(),
        ];
        if !references.iter().any(|r| *r == Some(key.as_str())) {
            return false;
        }
    }
    true
}

/// An in-memory batch of records plus derived metadata.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<IssueRecord>,
}

impl Snapshot {
    /// Wrap an already-materialized batch.
    #[must_use]
    pub fn from_records(records: Vec<IssueRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.project.is_empty() {
                    record.project = util::project_of(&record.key).to_string();
                }
                record
            })
            .collect();
        Self { records }
    }

    /// Pull a full unfiltered batch through a reader.
    ///
    /// # Errors
    ///
    /// Propagates reader failures.
    pub fn load(reader: &impl SnapshotReader) -> Result<Self> {
        Ok(Self {
            records: reader.read_issues(&SnapshotFilter::default())?,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[IssueRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent `updated` stamp across the batch, when any record has one.
    #[must_use]
    pub fn latest_update(&self) -> Option<DateTime<Utc>> {
        self.records.iter().filter_map(|r| r.updated).max()
    }
}

/// Write records out as JSONL, one record per line.
///
/// The inverse of [`JsonlReader`]; used to materialize fixtures and to
/// re-export a snapshot after external filtering.
///
/// # Errors
///
/// Returns `Io` on write failure.
pub fn save_jsonl(path: &Path, records: &[IssueRecord]) -> Result<()> {
    use std::io::Write;

    let mut file = fs::File::create(path)?;
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(file, "{json}")?;
    }
    file.flush()?;
    Ok(())
}
