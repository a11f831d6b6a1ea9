//! driveblog-core
//!
//! A blog whose catalog lives as `index.json` on a content-addressed
//! storage network, next to one `<title>.json` per article.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, files, index, article, account, state, errors）
//! - **ports**: 抽象化レイヤー（ContentStore, AccountDirectory, Signer, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（Blog, CatalogMutator, IndexAccessor, ArticleStore）
//! - **impls**: 実装（HTTP adapter と開発用の in-memory adapter）
//! - **codec**: JSON の encode / 寛容な decode
//! - **config**: TOML 設定
//! - **session**: endpoint と署名者

pub mod app;
pub mod codec;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod session;

pub use app::{Blog, BlogBuilder, BuildError};
pub use config::{BlogConfig, ConcurrencyMode, ConfigError};
pub use domain::{BlogError, ErrorKind};
pub use session::{Endpoint, StorageSession};
