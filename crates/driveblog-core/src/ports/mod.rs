//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」。外部システム（storage network,
//! wallet, account provisioning, 時刻）へのインターフェースを定義し、
//! 実装の詳細は `impls` に置きます。

pub mod account_directory;
pub mod clock;
pub mod content_store;
pub mod id_generator;
pub mod signer;

pub use self::account_directory::AccountDirectory;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::content_store::{ContentStore, FileBody};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::signer::Signer;
