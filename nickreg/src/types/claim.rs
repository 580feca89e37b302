// claim.rs
//
// A claim is a signed statement "identity X uses nickname N since time T".
// Validation depends only on the claim's own fields and a signature
// verifier, never on registry state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::SignatureVerifier;
use crate::identity::{validate_identity, Identity};
use crate::types::error::ClaimError;
use crate::types::nickname::validate_nickname;

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero instant some clients send
/// for an unset time.
const YEAR_ONE_UNIX_SECONDS: i64 = -62_135_596_800;

/// A signed nickname claim
///
/// The JSON form uses the keys `id`, `nick`, `time`, `publicKey` and
/// `signature`. The identity is hex encoded like in URL paths, the other
/// byte fields are base64 encoded and `time` is RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Identity making the claim, the hash of `public_key`
    #[serde(rename = "id", with = "hex_bytes", default)]
    pub identity: Vec<u8>,

    /// Claimed nickname
    #[serde(rename = "nick", default)]
    pub nickname: String,

    /// Time of the claim; later claims replace earlier ones
    #[serde(rename = "time", default)]
    pub timestamp: DateTime<Utc>,

    /// Public key the identity was derived from
    #[serde(rename = "publicKey", with = "base64_bytes", default)]
    pub public_key: Vec<u8>,

    /// Signature over `signing_payload()`
    #[serde(with = "base64_bytes", default)]
    pub signature: Vec<u8>,
}

impl Claim {
    /// Build an unsigned claim for `public_key`, deriving the identity from it.
    pub fn unsigned(public_key: Vec<u8>, nickname: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity: Identity::from_public_key(&public_key).as_bytes().to_vec(),
            nickname: nickname.into(),
            timestamp,
            public_key,
            signature: Vec::new(),
        }
    }

    /// Attach a signature
    pub fn with_signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }

    /// Bytes covered by the signature.
    ///
    /// Decimal Unix seconds of the timestamp, then the raw identity bytes,
    /// then the nickname bytes. Sub-second precision is not signed.
    pub fn signing_payload(&self) -> Vec<u8> {
        let seconds = self.timestamp.timestamp().to_string();
        let mut payload =
            Vec::with_capacity(seconds.len() + self.identity.len() + self.nickname.len());
        payload.extend_from_slice(seconds.as_bytes());
        payload.extend_from_slice(&self.identity);
        payload.extend_from_slice(self.nickname.as_bytes());
        payload
    }

    /// Check that the claim is well formed and authentic.
    pub fn validate(&self, verifier: &dyn SignatureVerifier) -> Result<(), ClaimError> {
        verifier
            .check_public_key(&self.public_key)
            .map_err(ClaimError::BadPublicKey)?;

        if !validate_identity(&self.identity) {
            return Err(ClaimError::BadIdentity);
        }
        if !Identity::from_public_key(&self.public_key).matches(&self.identity) {
            return Err(ClaimError::IdentityMismatch);
        }

        validate_nickname(&self.nickname).map_err(ClaimError::BadNickname)?;

        if is_unset_timestamp(&self.timestamp) {
            return Err(ClaimError::BadTimestamp);
        }

        if self.signature.is_empty()
            || !verifier.verify(&self.signing_payload(), &self.signature, &self.public_key)
        {
            return Err(ClaimError::BadSignature);
        }

        Ok(())
    }
}

/// True when `timestamp` is one of the values that stand for "not set".
pub fn is_unset_timestamp(timestamp: &DateTime<Utc>) -> bool {
    *timestamp == DateTime::<Utc>::default()
        || (timestamp.timestamp() == YEAR_ONE_UNIX_SECONDS && timestamp.timestamp_subsec_nanos() == 0)
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => hex::decode(encoded).map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    // null decodes to an empty byte string
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}
