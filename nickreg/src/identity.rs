// identity.rs
//
// Identities are the BLAKE3 hash of a public key. The registry treats them as
// opaque byte strings that only need a length check and byte equality.

use std::fmt;

/// Length of an identity in bytes
pub const IDENTITY_LENGTH: usize = blake3::OUT_LEN;

/// Identity derived from a public key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity([u8; IDENTITY_LENGTH]);

impl Identity {
    /// Derive the identity of a public key.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        Identity(*blake3::hash(public_key).as_bytes())
    }

    /// Wrap raw identity bytes, returning `None` unless they are well formed.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; IDENTITY_LENGTH] = bytes.try_into().ok()?;
        Some(Identity(array))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compare against raw identity bytes.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        self.0.as_slice() == bytes
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_hex())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Check that raw bytes have the shape of an identity.
pub fn validate_identity(bytes: &[u8]) -> bool {
    Identity::from_slice(bytes).is_some()
}
