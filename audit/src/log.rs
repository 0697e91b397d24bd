//! JSONL audit log files.
//!
//! Successes and failures live in separate files so operator reporting can
//! count either with a straight line count. Reads tolerate a torn or
//! garbage line (skipped, not fatal); writes append a full line at a time.

use crate::{AuditError, VerificationRecord};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const SUCCESS_FILE: &str = "verification_success.jsonl";
const FAILURE_FILE: &str = "verification_failed.jsonl";

/// Append-only audit log rooted at a directory.
pub struct AuditLog {
    success_path: PathBuf,
    failure_path: PathBuf,
}

impl AuditLog {
    /// Open (creating the directory if needed) an audit log under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AuditError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            success_path: dir.join(SUCCESS_FILE),
            failure_path: dir.join(FAILURE_FILE),
        })
    }

    /// Append a success record.
    pub fn append_success(&self, record: &VerificationRecord) -> Result<(), AuditError> {
        self.append(&self.success_path, record)
    }

    /// Append a failure record.
    pub fn append_failure(&self, record: &VerificationRecord) -> Result<(), AuditError> {
        tracing::info!(
            requester = record.requester_id,
            reason = record.reason.as_deref().unwrap_or("?"),
            "audit failure recorded"
        );
        self.append(&self.failure_path, record)
    }

    fn append(&self, path: &Path, record: &VerificationRecord) -> Result<(), AuditError> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Number of success records.
    pub fn count_success(&self) -> Result<usize, AuditError> {
        Ok(Self::read_records(&self.success_path)?.len())
    }

    /// Number of failure records.
    pub fn count_failure(&self) -> Result<usize, AuditError> {
        Ok(Self::read_records(&self.failure_path)?.len())
    }

    /// The most recent `limit` failure records, oldest of the tail first.
    pub fn recent_failures(&self, limit: usize) -> Result<Vec<VerificationRecord>, AuditError> {
        let mut records = Self::read_records(&self.failure_path)?;
        let tail_start = records.len().saturating_sub(limit);
        Ok(records.split_off(tail_start))
    }

    /// All parseable records in a file. A torn or garbage line is skipped,
    /// so counts and tails always agree on what a record is.
    fn read_records(path: &Path) -> Result<Vec<VerificationRecord>, AuditError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(std::fs::File::open(path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            if let Ok(record) = serde_json::from_str(&line?) {
                records.push(record);
            }
        }
        Ok(records)
    }
}
