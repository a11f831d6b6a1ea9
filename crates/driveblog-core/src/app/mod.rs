//! App - アプリケーション層
//!
//! ports を組み合わせて blog の操作を実装します。
//!
//! # 主要コンポーネント
//! - **BlogBuilder / Blog**: ワイヤリングと唯一の入口
//! - **CatalogMutator**: `index.json` の read-modify-write
//! - **IndexAccessor**: `index.json` の読み書き
//! - **ArticleStore**: 記事本文と asset

pub mod article_store;
pub mod builder;
pub mod catalog;
pub mod index_accessor;

pub use self::article_store::ArticleStore;
pub use self::builder::{Blog, BlogBuilder, BuildError};
pub use self::catalog::CatalogMutator;
pub use self::index_accessor::{IndexAccessor, IndexSnapshot};
