// Fixtures shared by the registry integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use nickreg::crypto::sign_payload;
use nickreg::{Claim, Identity};
use pqcrypto_sphincsplus::sphincssha2256fsimple::keypair;
use pqcrypto_traits::sign::{PublicKey as _, SecretKey as _};

pub struct TestKey {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

impl TestKey {
    pub fn generate() -> Self {
        let (pk, sk) = keypair();
        Self {
            public_key: pk.as_bytes().to_vec(),
            secret_key: sk.as_bytes().to_vec(),
        }
    }

    pub fn identity(&self) -> Vec<u8> {
        Identity::from_public_key(&self.public_key).as_bytes().to_vec()
    }

    pub fn claim(&self, nickname: &str, timestamp: DateTime<Utc>) -> Claim {
        let unsigned = Claim::unsigned(self.public_key.clone(), nickname, timestamp);
        let signature = sign_payload(&self.secret_key, &unsigned.signing_payload())
            .expect("test key should sign");
        unsigned.with_signature(signature)
    }
}

lazy_static! {
    pub static ref ALICE: TestKey = TestKey::generate();
    pub static ref BOB: TestKey = TestKey::generate();
    pub static ref CAROL: TestKey = TestKey::generate();
}

pub fn at(unix_seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(unix_seconds, 0).unwrap()
}

/// 1990-01-01T01:01:01Z
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 1, 1, 1, 1, 1).unwrap()
}
