//! CatalogMutator - `index.json` の read-modify-write
//!
//! # フロー（1 操作あたり）
//! 1. storage account を解決
//! 2. index.json を読む（無い・壊れている → 空のカタログ）
//! 3. メモリ上で変更
//! 4. asset / 記事本文を書く
//! 5. index.json を書き戻す
//!
//! Writes happen in that order, so a failed article write leaves the remote
//! index untouched. A failed index write after step 4 is reported as
//! `PartialWrite` and nothing is rolled back.

use std::sync::Arc;

use crate::app::article_store::ArticleStore;
use crate::app::index_accessor::{IndexAccessor, IndexSnapshot};
use crate::config::ConcurrencyMode;
use crate::domain::{
    AccountIdentifier, ArticleDraft, ArticleSummary, BlogError, BlogSettings, FileName,
    IndexDocument, MutationStage, ProfileUpdate, StorageAccount, StorageAccountId,
};
use crate::ports::{AccountDirectory, Clock, ContentStore};
use crate::session::StorageSession;

/// CatalogMutator は blog への変更を 1 回の read-modify-write として適用
pub struct CatalogMutator {
    accounts: Arc<dyn AccountDirectory>,
    index: IndexAccessor,
    articles: ArticleStore,
    clock: Arc<dyn Clock>,
    concurrency: ConcurrencyMode,
}

impl CatalogMutator {
    /// 新しい CatalogMutator を作成
    pub fn new(
        store: Arc<dyn ContentStore>,
        accounts: Arc<dyn AccountDirectory>,
        clock: Arc<dyn Clock>,
        concurrency: ConcurrencyMode,
    ) -> Self {
        Self {
            accounts,
            index: IndexAccessor::new(store.clone()),
            articles: ArticleStore::new(store),
            clock,
            concurrency,
        }
    }

    /// Publish a new article and put its summary at the head of the catalog.
    pub async fn apply_article(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
        mut draft: ArticleDraft,
    ) -> Result<ArticleSummary, BlogError> {
        let account = self.resolve(session, identifier).await?;
        let article_file = FileName::for_article(&draft.title).map_err(BlogError::InvalidTitle)?;
        let snapshot = self.read(session, &account.id).await?;

        tracing::debug!(account = %account.id, stage = %MutationStage::Mutating);
        if snapshot.document.contains_title(&draft.title) {
            return Err(BlogError::DuplicateTitle(draft.title));
        }

        let thumbnail = match draft.thumbnail.take() {
            Some(upload) => {
                let name = FileName::for_thumbnail(&draft.title, &upload.source_name)?;
                tracing::debug!(account = %account.id, stage = %MutationStage::WritingAsset, file = %name);
                let name = self
                    .articles
                    .write_asset(session, &account.id, name, &upload)
                    .await?;
                Some(name.to_string())
            }
            None => None,
        };

        let article = draft.into_document(thumbnail, self.clock.now());
        let summary = article.summary();
        let mut document = snapshot.document.clone();
        document.push_front(summary.clone());

        tracing::debug!(account = %account.id, stage = %MutationStage::WritingArticle, file = %article_file);
        self.articles
            .write_article(session, &account.id, &article)
            .await?;

        if let Err(source) = self.commit(session, &account.id, &snapshot, document).await {
            tracing::warn!(
                account = %account.id,
                file = %article_file,
                error = %source,
                "article written but not cataloged"
            );
            return Err(BlogError::PartialWrite {
                file: article_file,
                source: Box::new(source),
            });
        }

        tracing::info!(account = %account.id, title = %summary.title, "article published");
        Ok(summary)
    }

    /// Replace the blog settings.
    pub async fn apply_settings(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
        settings: BlogSettings,
    ) -> Result<IndexDocument, BlogError> {
        let account = self.resolve(session, identifier).await?;
        let snapshot = self.read(session, &account.id).await?;

        tracing::debug!(account = %account.id, stage = %MutationStage::Mutating);
        let mut document = snapshot.document.clone();
        document.settings = settings;

        let document = self.commit(session, &account.id, &snapshot, document).await?;
        tracing::info!(account = %account.id, revision = document.revision, "settings saved");
        Ok(document)
    }

    /// Settings form: names, plus a new author icon when one was picked.
    ///
    /// Without a new icon the current `authorIconFileName` is kept.
    pub async fn save_profile(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
        update: ProfileUpdate,
    ) -> Result<IndexDocument, BlogError> {
        let account = self.resolve(session, identifier).await?;
        let snapshot = self.read(session, &account.id).await?;

        tracing::debug!(account = %account.id, stage = %MutationStage::Mutating);
        let mut document = snapshot.document.clone();
        document.settings.blog_name = update.blog_name;
        document.settings.author_name = update.author_name;

        if let Some(icon) = update.icon {
            let name = FileName::for_author_icon(&icon.source_name)?;
            tracing::debug!(account = %account.id, stage = %MutationStage::WritingAsset, file = %name);
            let name = self
                .articles
                .write_asset(session, &account.id, name, &icon)
                .await?;
            document.settings.author_icon_file_name = name.to_string();
        }

        let document = self.commit(session, &account.id, &snapshot, document).await?;
        tracing::info!(account = %account.id, revision = document.revision, "profile saved");
        Ok(document)
    }

    async fn resolve(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
    ) -> Result<StorageAccount, BlogError> {
        tracing::debug!(%identifier, stage = %MutationStage::ResolvingAccount);
        self.accounts
            .find(session, identifier)
            .await
            .map_err(BlogError::Accounts)?
            .ok_or_else(|| BlogError::AccountNotFound(identifier.clone()))
    }

    async fn read(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
    ) -> Result<IndexSnapshot, BlogError> {
        tracing::debug!(%account, stage = %MutationStage::ReadingIndex);
        self.index.read(&session.endpoint, account).await
    }

    /// Write `document` back as the successor of `snapshot`.
    async fn commit(
        &self,
        session: &StorageSession,
        account: &StorageAccountId,
        snapshot: &IndexSnapshot,
        mut document: IndexDocument,
    ) -> Result<IndexDocument, BlogError> {
        if self.concurrency == ConcurrencyMode::Revisioned {
            let current = self.index.read(&session.endpoint, account).await?;
            if current.existed != snapshot.existed
                || current.document.revision != snapshot.document.revision
            {
                return Err(BlogError::Conflict {
                    expected: snapshot.document.revision,
                    found: current.document.revision,
                });
            }
        }

        // remote の revision は u64::MAX でありうる
        document.revision = snapshot
            .document
            .revision
            .checked_add(1)
            .ok_or(BlogError::RevisionExhausted(snapshot.document.revision))?;
        tracing::debug!(%account, stage = %MutationStage::WritingIndex, revision = document.revision);
        self.index
            .write(session, account, &document, snapshot.existed)
            .await?;
        Ok(document)
    }
}
