use thiserror::Error;

use crate::types::nickname::{MAX_NICKNAME_LENGTH, MIN_NICKNAME_LENGTH};

/// Reasons a nickname fails the syntax rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    /// Fewer than the minimum number of characters
    #[error("nickname needs to be at least {} characters long", MIN_NICKNAME_LENGTH)]
    TooShort,

    /// More than the maximum number of characters
    #[error("nickname needs to be at most {} characters long", MAX_NICKNAME_LENGTH)]
    TooLong,

    /// Starts with a non-letter or contains characters outside the allowed set
    #[error("nickname must start with a letter and contain only letters, digits, '_', '-', '[' or ']'")]
    InvalidCharacters,
}

/// Errors raised by a signature scheme
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The public key bytes do not decode as a key of the scheme
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The secret key bytes do not decode as a key of the scheme
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),
}

/// Reasons a claim is not valid
///
/// Each variant corresponds to one structural or cryptographic check, so
/// callers can branch on the kind without matching on message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("could not read the public key: {0}")]
    BadPublicKey(#[source] CryptoError),

    #[error("identity is invalid")]
    BadIdentity,

    #[error("identity does not match the public key")]
    IdentityMismatch,

    #[error("invalid nickname: {0}")]
    BadNickname(#[source] NicknameError),

    #[error("timestamp is not set")]
    BadTimestamp,

    #[error("could not validate the signature")]
    BadSignature,
}

/// Errors returned by registry operations
///
/// The first four variants are attributable to the caller and never change
/// stored state. Storage variants fail the operation but leave prior state
/// intact.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The submitted claim failed validation
    #[error("invalid claim: {0}")]
    InvalidClaim(#[from] ClaimError),

    /// Identity bytes passed directly to a lookup are malformed
    #[error("invalid identity")]
    InvalidIdentity,

    /// The nickname is held by a different identity
    #[error("nickname is already taken")]
    NicknameConflict,

    /// A claim with a later timestamp is already stored for this identity
    #[error("a newer claim is already stored for this identity")]
    StaleClaim,

    /// The underlying store could not be opened or initialized
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A storage transaction failed
    #[error("storage error: {0}")]
    Storage(String),
}

impl RegistryError {
    /// True for errors caused by the request rather than by the registry.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RegistryError::InvalidClaim(_)
                | RegistryError::InvalidIdentity
                | RegistryError::NicknameConflict
                | RegistryError::StaleClaim
        )
    }
}

impl From<rusqlite::Error> for RegistryError {
    fn from(err: rusqlite::Error) -> Self {
        RegistryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Storage(format!("claim encoding failed: {}", err))
    }
}
