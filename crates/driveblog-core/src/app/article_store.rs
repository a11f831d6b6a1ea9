//! ArticleStore - 記事本文と asset の書き込み・読み込み

use std::sync::Arc;

use crate::codec;
use crate::domain::{
    ArticleDocument, AssetUpload, BlogError, FileName, MutationStage, StorageAccountId,
    StoreError,
};
use crate::ports::{ContentStore, FileBody};
use crate::session::{Endpoint, StorageSession};

/// ArticleStore は記事本文と asset を扱う
#[derive(Clone)]
pub struct ArticleStore {
    store: Arc<dyn ContentStore>,
}

impl ArticleStore {
    /// 新しい ArticleStore を作成
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Upload `<title>.json`. Always a create: an existing file makes this fail.
    pub async fn write_article(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        document: &ArticleDocument,
    ) -> Result<FileName, BlogError> {
        let file = FileName::for_article(&document.title).map_err(BlogError::InvalidTitle)?;
        let body = FileBody::json(codec::encode("article", document)?);
        self.store
            .upload(session, account, &file, body)
            .await
            .map_err(|e| BlogError::store(MutationStage::WritingArticle, e))?;
        tracing::debug!(%account, %file, "article written");
        Ok(file)
    }

    /// Write an asset under `file`, editing it in place when it already exists.
    pub async fn write_asset(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        file: FileName,
        upload: &AssetUpload,
    ) -> Result<FileName, BlogError> {
        let stage = |e: StoreError| BlogError::store(MutationStage::WritingAsset, e);
        let body = FileBody {
            bytes: upload.bytes.clone(),
            content_type: upload.content_type.clone(),
        };

        let exists = self
            .store
            .exists(&session.endpoint, account, &file)
            .await
            .map_err(stage)?;
        if exists {
            tracing::debug!(%account, %file, "asset exists, replacing");
            self.store.edit(session, account, &file, body).await.map_err(stage)?;
        } else {
            tracing::debug!(%account, %file, "asset is new, uploading");
            self.store.upload(session, account, &file, body).await.map_err(stage)?;
        }
        Ok(file)
    }

    /// Fetch an article by title; `None` when there is no such file.
    pub async fn read_article(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
        title: &str,
    ) -> Result<Option<ArticleDocument>, BlogError> {
        let file = FileName::for_article(title).map_err(BlogError::InvalidTitle)?;
        let bytes = self
            .store
            .get(endpoint, account, &file)
            .await
            .map_err(|e| BlogError::store(MutationStage::ReadingArticle, e))?;
        bytes.map(|b| codec::decode(&file, &b)).transpose()
    }
}
