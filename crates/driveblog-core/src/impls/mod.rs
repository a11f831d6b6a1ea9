//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpContentStore**: 本番用（reqwest）
//! - **InMemoryContentStore**: 開発用・テスト用
//! - **InMemoryAccountDirectory**: 開発用の account 一覧
//! - **FixedSigner**: 開発用の署名器

pub mod http_store;
pub mod inmem_accounts;
pub mod inmem_store;
pub mod signer;

pub use self::http_store::HttpContentStore;
pub use self::inmem_accounts::InMemoryAccountDirectory;
pub use self::inmem_store::{InMemoryContentStore, StoreOp, StoredFile};
pub use self::signer::FixedSigner;
