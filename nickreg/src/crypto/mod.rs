// Signature verification capability
//
// Claim validation only needs to decode a public key and check a signature.
// Both are behind `SignatureVerifier` so the claim code carries no scheme of
// its own and tests can supply any verifier.

pub mod sphincs;

pub use sphincs::{sign_payload, SphincsVerifier};

use crate::types::error::CryptoError;

/// A signature scheme able to check claim signatures
pub trait SignatureVerifier: Send + Sync {
    /// Check that `public_key` decodes as a key of this scheme.
    fn check_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError>;

    /// Verify `signature` over `message` with `public_key`.
    ///
    /// Malformed keys or signatures verify as `false`.
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool;
}
