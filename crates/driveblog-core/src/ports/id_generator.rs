//! IdGenerator port - storage account id の生成
//!
//! The real network derives account ids from on-chain keys. Directories that
//! have to mint ids themselves (in-memory, local fixtures) go through this
//! trait so tests can pin the clock.

use crate::domain::StorageAccountId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は storage account id を発行
pub trait IdGenerator: Send + Sync {
    /// 新しい一意な account id
    fn generate_account_id(&self) -> StorageAccountId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    /// 新しい UlidGenerator を作成
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_account_id(&self) -> StorageAccountId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        // ULID text is Crockford base32, always a valid key
        match StorageAccountId::new(ulid.to_string()) {
            Ok(id) => id,
            Err(_) => unreachable!("ulid text is a valid storage account id"),
        }
    }
}
