//! InMemoryContentStore - 開発用・テスト用の content store
//!
//! Mirrors the network's upload/edit semantics (create-only / replace-only)
//! and keeps a call log plus one-shot failure injection so tests can assert
//! ordering and partial-write behaviour.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::domain::{FileName, StorageAccountId, StoreError};
use crate::ports::{ContentStore, FileBody};
use crate::session::{Endpoint, StorageSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Exists,
    Upload,
    Edit,
}

/// A file as held by the store; `version` counts writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub body: FileBody,
    pub version: u64,
}

#[derive(Default)]
struct StoreState {
    files: HashMap<(StorageAccountId, FileName), StoredFile>,
    failures: Vec<(StoreOp, FileName)>,
    calls: Vec<(StoreOp, FileName)>,
}

impl StoreState {
    fn record(&mut self, op: StoreOp, file: &FileName) -> Result<(), StoreError> {
        self.calls.push((op, file.clone()));
        if let Some(pos) = self
            .failures
            .iter()
            .position(|(o, f)| *o == op && f == file)
        {
            self.failures.remove(pos);
            return Err(StoreError::Transport(format!(
                "injected {op:?} failure for {file}"
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryContentStore {
    state: Mutex<StoreState>,
}

impl InMemoryContentStore {
    /// 空の InMemoryContentStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a file in place without going through upload/edit (fixtures).
    pub async fn insert(&self, account: &StorageAccountId, file: &FileName, body: FileBody) {
        let mut state = self.state.lock().await;
        let version = state
            .files
            .get(&(account.clone(), file.clone()))
            .map_or(1, |f| f.version + 1);
        state
            .files
            .insert((account.clone(), file.clone()), StoredFile { body, version });
    }

    /// 保存されているファイル（テストの検証用）
    pub async fn file(&self, account: &StorageAccountId, file: &FileName) -> Option<StoredFile> {
        let state = self.state.lock().await;
        state.files.get(&(account.clone(), file.clone())).cloned()
    }

    /// Names of all files in `account`, sorted.
    pub async fn file_names(&self, account: &StorageAccountId) -> Vec<FileName> {
        let state = self.state.lock().await;
        let mut names: Vec<FileName> = state
            .files
            .keys()
            .filter(|(a, _)| a == account)
            .map(|(_, f)| f.clone())
            .collect();
        names.sort();
        names
    }

    /// Make the next `op` on `file` fail with a transport error.
    pub async fn fail_next(&self, op: StoreOp, file: &FileName) {
        self.state.lock().await.failures.push((op, file.clone()));
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<(StoreOp, FileName)> {
        self.state.lock().await.calls.clone()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn get(
        &self,
        _endpoint: &Endpoint,
        account: &StorageAccountId,
        file: &FileName,
    ) -> Result<Option<Bytes>, StoreError> {
        let mut state = self.state.lock().await;
        state.record(StoreOp::Get, file)?;
        Ok(state
            .files
            .get(&(account.clone(), file.clone()))
            .map(|f| f.body.bytes.clone()))
    }

    async fn exists(
        &self,
        _endpoint: &Endpoint,
        account: &StorageAccountId,
        file: &FileName,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        state.record(StoreOp::Exists, file)?;
        Ok(state.files.contains_key(&(account.clone(), file.clone())))
    }

    async fn upload(
        &self,
        _session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.record(StoreOp::Upload, file)?;
        let key = (account.clone(), file.clone());
        if state.files.contains_key(&key) {
            return Err(StoreError::AlreadyExists(file.clone()));
        }
        state.files.insert(key, StoredFile { body, version: 1 });
        Ok(())
    }

    async fn edit(
        &self,
        _session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.record(StoreOp::Edit, file)?;
        match state.files.get_mut(&(account.clone(), file.clone())) {
            Some(stored) => {
                stored.body = body;
                stored.version += 1;
                Ok(())
            }
            None => Err(StoreError::Missing(file.clone())),
        }
    }
}
