//! Domain model (ids, file names, index document, articles, errors).

pub mod account;
pub mod article;
pub mod errors;
pub mod files;
pub mod ids;
pub mod index;
pub mod state;

pub use self::account::{InvalidStorageSize, StorageAccount, StorageSize};
pub use self::article::{ArticleDocument, ArticleDraft, AssetUpload, ProfileUpdate};
pub use self::errors::{BlogError, ErrorKind, StoreError};
pub use self::files::{FileName, InvalidFileName};
pub use self::ids::{AccountIdentifier, InvalidKey, OwnerKey, StorageAccountId};
pub use self::index::{ArticleSummary, BlogSettings, IndexDocument};
pub use self::state::MutationStage;
