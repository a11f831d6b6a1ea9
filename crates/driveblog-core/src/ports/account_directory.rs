//! AccountDirectory port - storage account の検索と作成
//!
//! Payment and on-chain provisioning are the directory's business; callers
//! only see the resulting [`StorageAccount`].

use async_trait::async_trait;

use crate::domain::{AccountIdentifier, StorageAccount, StorageSize, StoreError};
use crate::session::StorageSession;

/// AccountDirectory は (owner, identifier) から storage account を引く
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Account named `identifier` owned by the session's signer, if any.
    async fn find(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
    ) -> Result<Option<StorageAccount>, StoreError>;

    /// Fails with `StoreError::AccountExists` when the owner already has one by that name.
    async fn create(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
        size: StorageSize,
    ) -> Result<StorageAccount, StoreError>;
}
