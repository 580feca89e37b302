//! # Nickname registry
//!
//! Durable mapping from identity to its current claim, and from nickname to
//! the identity holding it.
//!
//! ## Admission
//!
//! A claim is admitted when it validates, its nickname is free or already
//! held by the same identity, and no strictly newer claim is stored for the
//! identity. Equal timestamps overwrite, so re-submitting a claim is
//! idempotent. When several conditions fail, the reported error follows the
//! order invalid claim, nickname conflict, staleness, storage error.
//!
//! Both indexes are checked and written inside one critical section per
//! `put`: a single SQLite transaction for `SqliteRegistry`, one write lock for
//! `MemoryRegistry`.
//!
//! ```rust,no_run
//! use nickreg::{Claim, Registry, SqliteRegistry};
//!
//! # fn example(claim: Claim) -> Result<(), nickreg::RegistryError> {
//! let registry = SqliteRegistry::open("data/nicks.db")?;
//! registry.put(&claim)?;
//! let stored = registry.get(&claim.identity)?;
//! assert_eq!(stored.as_ref(), Some(&claim));
//! registry.close()?;
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRegistry;
pub use sqlite::SqliteRegistry;

use crate::types::claim::Claim;
use crate::types::error::RegistryError;

/// Operations the registry offers to its consumers
pub trait Registry: Send + Sync {
    /// Every stored claim. Order is unspecified.
    fn list(&self) -> Result<Vec<Claim>, RegistryError>;

    /// The claim stored for `identity`, or `None` if there is none.
    ///
    /// Fails with `InvalidIdentity` when `identity` is malformed.
    fn get(&self, identity: &[u8]) -> Result<Option<Claim>, RegistryError>;

    /// Validate and store a claim, replacing the identity's previous claim.
    fn put(&self, claim: &Claim) -> Result<(), RegistryError>;
}

/// Decide whether an already validated claim may replace the current state.
///
/// `nickname_holder` is the identity currently holding `claim.nickname`;
/// `previous` is the claim currently stored for `claim.identity`.
pub fn check_admission(
    claim: &Claim,
    nickname_holder: Option<&[u8]>,
    previous: Option<&Claim>,
) -> Result<(), RegistryError> {
    if let Some(holder) = nickname_holder {
        if holder != claim.identity.as_slice() {
            return Err(RegistryError::NicknameConflict);
        }
    }

    if let Some(previous) = previous {
        if previous.timestamp > claim.timestamp {
            return Err(RegistryError::StaleClaim);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    fn claim(identity: u8, nickname: &str, seconds: i64) -> Claim {
        Claim {
            identity: vec![identity; 32],
            nickname: nickname.to_string(),
            timestamp: at(seconds),
            public_key: Vec::new(),
            signature: Vec::new(),
        }
    }

    #[test]
    fn test_first_claim_is_admitted() {
        assert!(check_admission(&claim(1, "nick", 100), None, None).is_ok());
    }

    #[test]
    fn test_nickname_held_by_other_identity() {
        let result = check_admission(&claim(1, "nick", 100), Some(&[2u8; 32]), None);
        assert!(matches!(result, Err(RegistryError::NicknameConflict)));
    }

    #[test]
    fn test_nickname_held_by_same_identity() {
        let previous = claim(1, "nick", 100);
        let result = check_admission(&claim(1, "nick", 101), Some(&[1u8; 32]), Some(&previous));
        assert!(result.is_ok());
    }

    #[test]
    fn test_equal_timestamp_is_not_stale() {
        let previous = claim(1, "nick", 100);
        assert!(check_admission(&claim(1, "nick", 100), Some(&[1u8; 32]), Some(&previous)).is_ok());
    }

    #[test]
    fn test_older_timestamp_is_stale() {
        let previous = claim(1, "nick", 100);
        let result = check_admission(&claim(1, "other", 99), None, Some(&previous));
        assert!(matches!(result, Err(RegistryError::StaleClaim)));
    }

    #[test]
    fn test_conflict_reported_before_staleness() {
        let previous = claim(1, "nick", 100);
        let result = check_admission(&claim(1, "taken", 99), Some(&[2u8; 32]), Some(&previous));
        assert!(matches!(result, Err(RegistryError::NicknameConflict)));
    }
}
