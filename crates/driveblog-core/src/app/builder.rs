//! BlogBuilder - ports と設定のワイヤリング
//!
//! # 使用例
//! ```ignore
//! let blog = BlogBuilder::new()
//!     .store(Arc::new(InMemoryContentStore::new()))
//!     .accounts(Arc::new(InMemoryAccountDirectory::new()))
//!     .config(BlogConfig::load_or_default("driveblog.toml"))
//!     .build()?;
//! ```
//!
//! # Fail-fast 設計
//! - store / accounts が無ければ `BuildError::Missing`
//! - 設定値（endpoint, size）は build() 時に検証

use std::sync::Arc;

use crate::app::article_store::ArticleStore;
use crate::app::catalog::CatalogMutator;
use crate::app::index_accessor::{IndexAccessor, IndexSnapshot};
use crate::config::{BlogConfig, ConfigError};
use crate::domain::{
    AccountIdentifier, ArticleDocument, ArticleDraft, ArticleSummary, BlogError, BlogSettings,
    IndexDocument, ProfileUpdate, StorageAccount, StorageAccountId, StorageSize,
};
use crate::ports::{AccountDirectory, Clock, ContentStore, SystemClock};
use crate::session::{Endpoint, StorageSession};

/// BuildError は Blog 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing {0}; call BlogBuilder::{0}() before build()")]
    Missing(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// BlogBuilder は ports と設定から Blog を構築
#[derive(Default)]
pub struct BlogBuilder {
    store: Option<Arc<dyn ContentStore>>,
    accounts: Option<Arc<dyn AccountDirectory>>,
    clock: Option<Arc<dyn Clock>>,
    config: Option<BlogConfig>,
}

impl BlogBuilder {
    /// 新しい BlogBuilder を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ContentStore を設定（必須）
    pub fn store(mut self, store: Arc<dyn ContentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// AccountDirectory を設定（必須）
    pub fn accounts(mut self, accounts: Arc<dyn AccountDirectory>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    /// Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Defaults to `BlogConfig::default()`.
    pub fn config(mut self, config: BlogConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Blog を構築
    ///
    /// # 検証
    /// - store / accounts が設定されているか
    /// - endpoint と default_size が解釈できるか
    pub fn build(self) -> Result<Blog, BuildError> {
        let store = self.store.ok_or(BuildError::Missing("store"))?;
        let accounts = self.accounts.ok_or(BuildError::Missing("accounts"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let config = self.config.unwrap_or_default();

        let endpoint = config.endpoint()?;
        let default_size = config.storage_size()?;
        tracing::debug!(
            identifier = %config.storage.identifier,
            concurrency = ?config.catalog.concurrency,
            "blog wired"
        );

        Ok(Blog {
            mutator: CatalogMutator::new(
                store.clone(),
                accounts.clone(),
                clock,
                config.catalog.concurrency,
            ),
            index: IndexAccessor::new(store.clone()),
            articles: ArticleStore::new(store),
            accounts,
            identifier: config.identifier(),
            default_size,
            endpoint,
        })
    }
}

/// 書き手・読み手の両方が使う唯一の入口
///
/// Writes go to the storage account named by `[storage] identifier`.
pub struct Blog {
    mutator: CatalogMutator,
    index: IndexAccessor,
    articles: ArticleStore,
    accounts: Arc<dyn AccountDirectory>,
    identifier: AccountIdentifier,
    default_size: StorageSize,
    endpoint: Endpoint,
}

impl Blog {
    /// 書き込み先の storage account identifier
    pub fn identifier(&self) -> &AccountIdentifier {
        &self.identifier
    }

    /// account 作成時に要求するサイズ
    pub fn default_size(&self) -> StorageSize {
        self.default_size
    }

    /// Endpoint from the config, for building sessions and reader calls.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// 下層の CatalogMutator（identifier を明示したい場合）
    pub fn mutator(&self) -> &CatalogMutator {
        &self.mutator
    }

    /// storage account を作成
    pub async fn create_storage(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
        size: StorageSize,
    ) -> Result<StorageAccount, BlogError> {
        let account = self
            .accounts
            .create(session, identifier, size)
            .await
            .map_err(BlogError::Accounts)?;
        tracing::info!(account = %account.id, %identifier, size = %size, "storage account created");
        Ok(account)
    }

    /// storage account を探す。無ければ `None`
    pub async fn find_storage(
        &self,
        session: &StorageSession,
        identifier: &AccountIdentifier,
    ) -> Result<Option<StorageAccount>, BlogError> {
        self.accounts
            .find(session, identifier)
            .await
            .map_err(BlogError::Accounts)
    }

    /// 記事を公開し、カタログの先頭に追加
    pub async fn publish_article(
        &self,
        session: &StorageSession,
        draft: ArticleDraft,
    ) -> Result<ArticleSummary, BlogError> {
        self.mutator
            .apply_article(session, &self.identifier, draft)
            .await
    }

    /// blog の設定を置き換える
    pub async fn save_settings(
        &self,
        session: &StorageSession,
        settings: BlogSettings,
    ) -> Result<IndexDocument, BlogError> {
        self.mutator
            .apply_settings(session, &self.identifier, settings)
            .await
    }

    /// 設定フォームの保存（名前と、あれば新しい author icon）
    pub async fn save_profile(
        &self,
        session: &StorageSession,
        update: ProfileUpdate,
    ) -> Result<IndexDocument, BlogError> {
        self.mutator
            .save_profile(session, &self.identifier, update)
            .await
    }

    /// Reader side: the whole catalog of a blog. Needs no wallet.
    pub async fn catalog(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
    ) -> Result<IndexSnapshot, BlogError> {
        self.index.read(endpoint, account).await
    }

    /// 記事を 1 件読む。無ければ `None`
    pub async fn article(
        &self,
        endpoint: &Endpoint,
        account: &StorageAccountId,
        title: &str,
    ) -> Result<Option<ArticleDocument>, BlogError> {
        self.articles.read_article(endpoint, account, title).await
    }
}
