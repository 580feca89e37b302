use pqcrypto_sphincsplus::sphincssha2256fsimple::{
    detached_sign, verify_detached_signature, DetachedSignature, PublicKey, SecretKey,
};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use sha3::{Digest, Sha3_512};

use crate::crypto::SignatureVerifier;
use crate::types::error::CryptoError;

/// SPHINCS+ verifier over SHA3-512 digests of the message
///
/// The message handed to SPHINCS+ is always the 64-byte SHA3-512 digest of
/// the signing payload, never the payload itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphincsVerifier;

impl SphincsVerifier {
    pub fn new() -> Self {
        SphincsVerifier
    }
}

impl SignatureVerifier for SphincsVerifier {
    fn check_public_key(&self, public_key: &[u8]) -> Result<(), CryptoError> {
        PublicKey::from_bytes(public_key)
            .map(|_| ())
            .map_err(|e| CryptoError::InvalidPublicKey(format!("{:?}", e)))
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        let Ok(pk) = PublicKey::from_bytes(public_key) else {
            return false;
        };
        let Ok(signature) = DetachedSignature::from_bytes(signature) else {
            return false;
        };

        verify_detached_signature(&signature, &signing_digest(message), &pk).is_ok()
    }
}

/// Sign a payload the way `SphincsVerifier` expects.
pub fn sign_payload(secret_key_bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let sk = SecretKey::from_bytes(secret_key_bytes)
        .map_err(|e| CryptoError::InvalidSecretKey(format!("{:?}", e)))?;

    let signature = detached_sign(&signing_digest(payload), &sk);
    Ok(signature.as_bytes().to_vec())
}

fn signing_digest(message: &[u8]) -> Vec<u8> {
    Sha3_512::digest(message).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcrypto_sphincsplus::sphincssha2256fsimple::keypair;

    #[test]
    fn test_sign_and_verify() {
        let (pk, sk) = keypair();
        let verifier = SphincsVerifier::new();
        let message = b"1700000000some-identityalice";

        let signature = sign_payload(sk.as_bytes(), message).expect("signing should succeed");

        assert!(verifier.verify(message, &signature, pk.as_bytes()));
        assert!(!verifier.verify(b"modified message", &signature, pk.as_bytes()));
    }

    #[test]
    fn test_malformed_inputs_do_not_verify() {
        let (pk, sk) = keypair();
        let verifier = SphincsVerifier::new();
        let message = b"message";
        let signature = sign_payload(sk.as_bytes(), message).expect("signing should succeed");

        assert!(!verifier.verify(message, &[], pk.as_bytes()));
        assert!(!verifier.verify(message, &signature[1..], pk.as_bytes()));
        assert!(!verifier.verify(message, &signature, &[]));
    }

    #[test]
    fn test_check_public_key() {
        let (pk, _) = keypair();
        let verifier = SphincsVerifier::new();

        assert!(verifier.check_public_key(pk.as_bytes()).is_ok());
        assert!(verifier.check_public_key(&[]).is_err());
        assert!(verifier.check_public_key(&pk.as_bytes()[1..]).is_err());
    }
}
