//! IndexAccessor - `index.json` の読み書き
//!
//! # 読み込み
//! - 404 → 空のカタログ（エラーではない）
//! - 壊れた JSON → 空のカタログ + warning
//! - それ以外の失敗 → エラー
//!
//! # 書き込み
//! 前回の読み込みでファイルが見つかれば edit、なければ upload。
//! 失敗したらもう一方を試す。

use std::sync::Arc;

use crate::codec::{self, DecodeWarning};
use crate::domain::{BlogError, FileName, IndexDocument, MutationStage, StorageAccountId, StoreError};
use crate::ports::{ContentStore, FileBody};
use crate::session::{Endpoint, StorageSession};

/// Result of one read of `index.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSnapshot {
    pub document: IndexDocument,
    /// Whether the file was present; decides edit vs upload on write-back.
    pub existed: bool,
    pub warnings: Vec<DecodeWarning>,
}

impl IndexSnapshot {
    fn absent() -> Self {
        Self {
            document: IndexDocument::empty(),
            existed: false,
            warnings: Vec::new(),
        }
    }
}

/// IndexAccessor は `index.json` を読み書きする
#[derive(Clone)]
pub struct IndexAccessor {
    store: Arc<dyn ContentStore>,
}

impl IndexAccessor {
    /// 新しい IndexAccessor を作成
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// `index.json` を読む。無い・壊れている場合は空のカタログ
    pub async fn read(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
    ) -> Result<IndexSnapshot, BlogError> {
        let file = FileName::index();
        let bytes = self
            .store
            .get(endpoint, account, &file)
            .await
            .map_err(|e| BlogError::store(MutationStage::ReadingIndex, e))?;

        let Some(bytes) = bytes else {
            tracing::debug!(%account, "index.json does not exist yet");
            return Ok(IndexSnapshot::absent());
        };

        let decoded = codec::decode_index(&bytes);
        for warning in &decoded.warnings {
            tracing::warn!(%account, %warning, "index.json decoded with fallback");
        }
        Ok(IndexSnapshot {
            document: decoded.value,
            existed: true,
            warnings: decoded.warnings,
        })
    }

    /// `index.json` を書く。`existed` なら edit、そうでなければ upload
    ///
    /// 失敗したらもう一方を試し、それも失敗したら最初のエラーを返す。
    pub async fn write(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        document: &IndexDocument,
        existed: bool,
    ) -> Result<(), BlogError> {
        let file = FileName::index();
        let body = FileBody::json(codec::encode("index.json", document)?);

        let first = if existed {
            self.store.edit(session, account, &file, body.clone()).await
        } else {
            self.store.upload(session, account, &file, body.clone()).await
        };
        let Err(first_err) = first else {
            return Ok(());
        };

        tracing::warn!(
            %account,
            error = %first_err,
            existed,
            "index.json write failed, retrying with the other write call"
        );
        let second = if existed {
            self.store.upload(session, account, &file, body).await
        } else {
            self.store.edit(session, account, &file, body).await
        };
        // 呼び出し側には最初の失敗を返す
        second.map_err(|e: StoreError| {
            tracing::warn!(%account, error = %e, "index.json fallback write failed");
            BlogError::store(MutationStage::WritingIndex, first_err)
        })
    }
}
