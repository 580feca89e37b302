// Shared fixtures for unit tests

use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use pqcrypto_sphincsplus::sphincssha2256fsimple::keypair;
use pqcrypto_traits::sign::{PublicKey as _, SecretKey as _};

use crate::crypto::sign_payload;
use crate::identity::Identity;
use crate::types::claim::Claim;

pub(crate) struct TestKey {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

impl TestKey {
    fn generate() -> Self {
        let (pk, sk) = keypair();
        Self {
            public_key: pk.as_bytes().to_vec(),
            secret_key: sk.as_bytes().to_vec(),
        }
    }

    pub fn identity(&self) -> Vec<u8> {
        Identity::from_public_key(&self.public_key).as_bytes().to_vec()
    }

    /// A correctly signed claim
    pub fn claim(&self, nickname: &str, timestamp: DateTime<Utc>) -> Claim {
        let mut claim = Claim::unsigned(self.public_key.clone(), nickname, timestamp);
        self.sign(&mut claim);
        claim
    }

    /// Re-sign a claim after its fields were changed
    pub fn sign(&self, claim: &mut Claim) {
        claim.signature = sign_payload(&self.secret_key, &claim.signing_payload())
            .expect("test key should sign");
    }
}

lazy_static! {
    pub(crate) static ref ALICE: TestKey = TestKey::generate();
    pub(crate) static ref BOB: TestKey = TestKey::generate();
}

pub(crate) fn at(unix_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(unix_seconds, 0).unwrap()
}
