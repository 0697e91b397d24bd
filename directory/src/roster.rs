//! Flat-file roster directory.
//!
//! One JSON object per line with `full_name`, `student_id`, `email`, and
//! `birthdate` fields. The whole roster is loaded into memory at startup
//! (rosters are small — a club membership list, not a census) and every
//! record is normalized on the way in so lookups never re-normalize.

use crate::{Directory, DirectoryError};
use gauth_types::MemberRecord;
use std::io::BufRead;
use std::path::Path;

/// In-memory roster loaded from a JSON Lines file.
pub struct FileDirectory {
    members: Vec<MemberRecord>,
}

impl FileDirectory {
    /// Load a roster from disk. Blank lines are skipped; a malformed line
    /// is an error (bad roster data should fail loudly at startup, not
    /// silently shrink the membership).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);

        let mut members = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let raw: MemberRecord = serde_json::from_str(&line)
                .map_err(|source| DirectoryError::Malformed { line: idx + 1, source })?;
            members.push(MemberRecord::normalized(
                &raw.full_name,
                &raw.student_id,
                &raw.email,
                &raw.birthdate,
            ));
        }

        tracing::info!(count = members.len(), "roster loaded");
        Ok(Self { members })
    }

    /// Build a directory from records already in memory (tests, fixtures).
    pub fn from_records(records: Vec<MemberRecord>) -> Self {
        let members = records
            .iter()
            .map(|r| MemberRecord::normalized(&r.full_name, &r.student_id, &r.email, &r.birthdate))
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Directory for FileDirectory {
    fn find(&self, identifier: &str) -> Result<Option<MemberRecord>, DirectoryError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        // Student id match (exact).
        if let Some(hit) = self.members.iter().find(|m| m.student_id == identifier) {
            return Ok(Some(hit.clone()));
        }

        // Email match (case-insensitive exact; stored emails are lowercased).
        let identifier_lower = identifier.to_lowercase();
        Ok(self
            .members
            .iter()
            .find(|m| m.email == identifier_lower)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn roster() -> FileDirectory {
        FileDirectory::from_records(vec![
            MemberRecord::normalized("Nguyen Van A", "SV001", "A@Example.com", "2004-01-01"),
            MemberRecord::normalized("Tran Thi B", "SV002", "b@example.com", "2003-12-31"),
        ])
    }

    #[test]
    fn finds_by_exact_student_id() {
        let hit = roster().find("SV001").unwrap().unwrap();
        assert_eq!(hit.full_name, "Nguyen Van A");
        assert_eq!(hit.email, "a@example.com");
    }

    #[test]
    fn student_id_match_is_case_sensitive() {
        assert!(roster().find("sv001").unwrap().is_none());
    }

    #[test]
    fn finds_by_email_case_insensitive() {
        let hit = roster().find("B@EXAMPLE.COM").unwrap().unwrap();
        assert_eq!(hit.student_id, "SV002");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let hit = roster().find("  SV001  ").unwrap().unwrap();
        assert_eq!(hit.student_id, "SV001");
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert!(roster().find("ZZZ999").unwrap().is_none());
        assert!(roster().find("").unwrap().is_none());
        assert!(roster().find("   ").unwrap().is_none());
    }

    #[test]
    fn loads_jsonl_roster_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"full_name":"Nguyen Van A","student_id":"SV001","email":"A@Example.com","birthdate":"2004-01-01"}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"full_name":"Tran Thi B","student_id":"SV002","email":"b@example.com","birthdate":""}}"#
        )
        .unwrap();

        let dir = FileDirectory::load(file.path()).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(
            dir.find("sv001@nowhere").unwrap(),
            None,
        );
        assert_eq!(
            dir.find("A@example.COM").unwrap().unwrap().student_id,
            "SV001"
        );
    }

    #[test]
    fn malformed_line_fails_with_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"full_name":"Nguyen Van A","student_id":"SV001","email":"a@example.com","birthdate":""}}"#
        )
        .unwrap();
        writeln!(file, "not json").unwrap();

        let err = FileDirectory::load(file.path())
            .err()
            .expect("loading a malformed roster should fail");
        match err {
            DirectoryError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }
}
