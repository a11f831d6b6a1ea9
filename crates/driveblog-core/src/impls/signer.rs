//! FixedSigner - 開発用の署名器
//!
//! Produces a deterministic, unverifiable tag instead of a wallet signature.
//! Good for the in-memory adapters and request-shape tests; a real network
//! rejects it.

use crate::domain::{InvalidKey, OwnerKey, StoreError};
use crate::ports::Signer;

#[derive(Debug, Clone)]
pub struct FixedSigner {
    owner: OwnerKey,
}

impl FixedSigner {
    pub fn new(owner: impl Into<String>) -> Result<Self, InvalidKey> {
        Ok(Self {
            owner: OwnerKey::new(owner)?,
        })
    }
}

impl Signer for FixedSigner {
    fn public_key(&self) -> OwnerKey {
        self.owner.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<String, StoreError> {
        Ok(format!("dev-{}-{:016x}", self.owner, fnv1a(message)))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}
