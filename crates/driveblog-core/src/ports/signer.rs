//! Signer port - wallet による書き込みリクエストの署名
//!
//! Key management and the wallet UI stay outside this crate; the only thing
//! the write path needs is a public key and a detached signature.

use crate::domain::{OwnerKey, StoreError};

/// Signer は wallet の署名能力を表す
pub trait Signer: Send + Sync {
    /// 署名者（owner）の公開鍵
    fn public_key(&self) -> OwnerKey;

    /// Sign `message`, returning the signature in the encoding the network expects.
    fn sign(&self, message: &[u8]) -> Result<String, StoreError>;
}
