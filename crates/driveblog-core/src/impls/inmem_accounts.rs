//! InMemoryAccountDirectory - 開発用の storage account 一覧
//!
//! Accounts are keyed by (owner, identifier); ids are minted by an
//! [`IdGenerator`] since there is no chain to derive them from.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{AccountIdentifier, OwnerKey, StorageAccount, StorageSize, StoreError};
use crate::ports::{AccountDirectory, IdGenerator, SystemClock, UlidGenerator};
use crate::session::StorageSession;

pub struct InMemoryAccountDirectory {
    accounts: Mutex<HashMap<(OwnerKey, AccountIdentifier), StorageAccount>>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryAccountDirectory {
    /// ULID で id を発行する InMemoryAccountDirectory を作成
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UlidGenerator::new(SystemClock)))
    }

    /// id の発行方法を指定して作成
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            ids,
        }
    }

    /// Register an account that already exists elsewhere (fixtures, known ids).
    pub async fn insert(&self, account: StorageAccount) {
        self.accounts
            .lock()
            .await
            .insert((account.owner.clone(), account.identifier.clone()), account);
    }
}

impl Default for InMemoryAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
    ) -> Result<Option<StorageAccount>, StoreError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .get(&(session.owner(), identifier.clone()))
            .cloned())
    }

    async fn create(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
        size: StorageSize,
    ) -> Result<StorageAccount, StoreError> {
        let mut accounts = self.accounts.lock().await;
        let key = (session.owner(), identifier.clone());
        if accounts.contains_key(&key) {
            return Err(StoreError::AccountExists(identifier.clone()));
        }
        let account = StorageAccount {
            id: self.ids.generate_account_id(),
            identifier: identifier.clone(),
            owner: key.0.clone(),
            size,
        };
        accounts.insert(key, account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::FixedSigner;
    use crate::session::Endpoint;
    use std::sync::Arc;

    fn session(owner: &str) -> StorageSession {
        StorageSession::new(Arc::new(FixedSigner::new(owner).unwrap()), Endpoint::default())
    }

    #[tokio::test]
    async fn create_then_find() {
        let dir = InMemoryAccountDirectory::new();
        let id = AccountIdentifier::new("blog");
        let size: StorageSize = "10MB".parse().unwrap();

        assert_eq!(dir.find(&session("alice"), &id).await.unwrap(), None);

        let created = dir.create(&session("alice"), &id, size).await.unwrap();
        assert_eq!(created.owner.as_str(), "alice");
        assert_eq!(created.size, size);

        let found = dir.find(&session("alice"), &id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn accounts_belong_to_their_owner() {
        let dir = InMemoryAccountDirectory::new();
        let id = AccountIdentifier::new("blog");
        let size: StorageSize = "10MB".parse().unwrap();

        dir.create(&session("alice"), &id, size).await.unwrap();
        assert_eq!(dir.find(&session("bob"), &id).await.unwrap(), None);

        let bobs = dir.create(&session("bob"), &id, size).await.unwrap();
        assert_eq!(bobs.owner.as_str(), "bob");
    }

    #[tokio::test]
    async fn duplicate_identifier_is_refused() {
        let dir = InMemoryAccountDirectory::new();
        let id = AccountIdentifier::new("blog");
        let size: StorageSize = "10MB".parse().unwrap();

        dir.create(&session("alice"), &id, size).await.unwrap();
        let err = dir.create(&session("alice"), &id, size).await.unwrap_err();
        assert!(matches!(err, StoreError::AccountExists(i) if i == id));
    }
}
