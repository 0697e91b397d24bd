//! Roster directory — maps free-text identifiers to member records.
//!
//! The directory is an external collaborator of the verification engine:
//! given a student id or an email, it returns at most one member. The
//! shipped implementation loads a flat JSON Lines roster into memory at
//! startup; the engine depends only on the [`Directory`] trait.

pub mod error;
pub mod roster;

pub use error::DirectoryError;
pub use roster::FileDirectory;

use gauth_types::MemberRecord;

/// Identifier resolution interface consumed by the engine.
///
/// Matching rules: exact on student id, case-insensitive exact on email.
/// No fuzzy matching.
pub trait Directory: Send + Sync {
    fn find(&self, identifier: &str) -> Result<Option<MemberRecord>, DirectoryError>;
}
