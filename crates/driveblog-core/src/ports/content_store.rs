//! ContentStore port - content-addressed file host
//!
//! Files are addressed by (storage account, file name). Reads only need the
//! public endpoint; writes need a full [`StorageSession`] so they can be signed.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{FileName, StorageAccountId, StoreError};
use crate::session::{Endpoint, StorageSession};

/// Body and content type of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBody {
    pub bytes: Bytes,
    pub content_type: String,
}

impl FileBody {
    /// `application/json` の本文を作成
    pub fn json(bytes: Bytes) -> Self {
        Self {
            bytes,
            content_type: "application/json".to_string(),
        }
    }
}

/// # 設計原則
/// - `get` の 404 は `Ok(None)`（エラーではない）
/// - `upload` は新規作成のみ（既存なら失敗）
/// - `edit` は置き換えのみ（存在しなければ失敗）
/// - 条件付き書き込み（ETag など）はない
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Latest content of the file, `None` when it does not exist.
    async fn get(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
        file: &FileName,
    ) -> Result<Option<Bytes>, StoreError>;

    /// Existence probe without downloading the body.
    async fn exists(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
        file: &FileName,
    ) -> Result<bool, StoreError>;

    /// Create a new file.
    async fn upload(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError>;

    /// Replace an existing file.
    async fn edit(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        file: &FileName,
        body: FileBody,
    ) -> Result<(), StoreError>;
}
