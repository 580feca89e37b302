// Nickreg Library Entry Point
//
// Signed nickname claims for peer-to-peer identities and the registry that
// admits them. A claim binds an identity (the hash of a public key) to a
// human-readable nickname at a point in time; the registry keeps the latest
// valid claim per identity and keeps nicknames globally unique.

pub mod crypto;
pub mod identity;
pub mod registry;
pub mod types;

#[cfg(test)]
mod test_support;

pub use crypto::{SignatureVerifier, SphincsVerifier};
pub use identity::Identity;
pub use registry::{MemoryRegistry, Registry, SqliteRegistry};
pub use types::claim::Claim;
pub use types::error::{ClaimError, CryptoError, NicknameError, RegistryError};
pub use types::nickname::validate_nickname;

/// Returns the version of the library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
