use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::crypto::{SignatureVerifier, SphincsVerifier};
use crate::identity::validate_identity;
use crate::registry::{check_admission, Registry};
use crate::types::claim::Claim;
use crate::types::error::RegistryError;

/// In-memory registry
///
/// Volatile; all claims are lost when the process exits. Useful for tests
/// and development servers.
pub struct MemoryRegistry {
    indexes: RwLock<Indexes>,
    verifier: Arc<dyn SignatureVerifier>,
}

#[derive(Default)]
struct Indexes {
    claims: HashMap<Vec<u8>, Claim>,
    nicknames: HashMap<String, Vec<u8>>,
}

impl MemoryRegistry {
    /// Create an empty registry verifying claims with SPHINCS+
    pub fn new() -> Self {
        Self::with_verifier(Arc::new(SphincsVerifier::new()))
    }

    /// Create an empty registry verifying claims with `verifier`
    pub fn with_verifier(verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self {
            indexes: RwLock::new(Indexes::default()),
            verifier,
        }
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for MemoryRegistry {
    fn list(&self) -> Result<Vec<Claim>, RegistryError> {
        Ok(self.indexes.read().claims.values().cloned().collect())
    }

    fn get(&self, identity: &[u8]) -> Result<Option<Claim>, RegistryError> {
        if !validate_identity(identity) {
            return Err(RegistryError::InvalidIdentity);
        }
        Ok(self.indexes.read().claims.get(identity).cloned())
    }

    fn put(&self, claim: &Claim) -> Result<(), RegistryError> {
        claim.validate(self.verifier.as_ref())?;

        let mut indexes = self.indexes.write();

        let holder = indexes.nicknames.get(&claim.nickname).map(Vec::as_slice);
        let previous = indexes.claims.get(&claim.identity);
        if let Err(err) = check_admission(claim, holder, previous) {
            debug!("Rejected claim for nickname {}: {}", claim.nickname, err);
            return Err(err);
        }

        let released = previous
            .filter(|previous| previous.nickname != claim.nickname)
            .map(|previous| previous.nickname.clone());
        if let Some(old_nickname) = released {
            indexes.nicknames.remove(&old_nickname);
        }

        indexes
            .nicknames
            .insert(claim.nickname.clone(), claim.identity.clone());
        indexes.claims.insert(claim.identity.clone(), claim.clone());

        debug!("Stored claim for nickname {}", claim.nickname);
        Ok(())
    }
}
