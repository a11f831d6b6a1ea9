//! Storage session - 明示的に渡される接続コンテキスト
//!
//! Every storage-touching call takes the session (or just its endpoint for
//! reads) as a parameter. Nothing is read from ambient state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{FileName, OwnerKey, StorageAccountId, StoreError};
use crate::ports::Signer;

/// 既定の読み込み endpoint
pub const DEFAULT_READ_ENDPOINT: &str = "https://shdw-drive.genesysgo.net/";
/// 既定の書き込み endpoint
pub const DEFAULT_WRITE_ENDPOINT: &str = "https://shadow-storage.genesysgo.net/";

/// Base URLs of the storage network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// `GET/HEAD <read>/<account>/<file>`
    pub read: Url,
    /// `POST <write>/upload`, `POST <write>/edit`
    pub write: Url,
}

impl Endpoint {
    /// 読み込み・書き込みの base URL から作成
    pub fn new(read: Url, write: Url) -> Self {
        Self { read, write }
    }

    /// 文字列の URL を検証して作成
    pub fn parse(read: &str, write: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            read: Url::parse(read)?,
            write: Url::parse(write)?,
        })
    }

    /// Retrieval URL of a file, optionally with the `c=<millis>` cache-buster.
    pub fn file_url(
        &self,
        account: &StorageAccountId,
        file: &FileName,
        cache_buster: Option<i64>,
    ) -> Result<Url, StoreError> {
        let mut url = self.read.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.read.to_string()))?
            .pop_if_empty()
            .push(account.as_str())
            .push(file.as_str());
        url.set_query(None);
        if let Some(c) = cache_buster {
            url.query_pairs_mut().append_pair("c", &c.to_string());
        }
        Ok(url)
    }

    /// URL of a write action (`upload`, `edit`).
    pub fn action_url(&self, action: &str) -> Result<Url, StoreError> {
        let mut url = self.write.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.write.to_string()))?
            .pop_if_empty()
            .push(action);
        Ok(url)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        match Self::parse(DEFAULT_READ_ENDPOINT, DEFAULT_WRITE_ENDPOINT) {
            Ok(endpoint) => endpoint,
            Err(e) => unreachable!("default endpoints are valid urls: {e}"),
        }
    }
}

/// Wallet handle plus endpoint, passed by value into every write.
#[derive(Clone)]
pub struct StorageSession {
    pub signer: Arc<dyn Signer>,
    pub endpoint: Endpoint,
}

impl StorageSession {
    /// 新しい StorageSession を作成
    pub fn new(signer: Arc<dyn Signer>, endpoint: Endpoint) -> Self {
        Self { signer, endpoint }
    }

    /// 署名者の公開鍵（account の owner）
    pub fn owner(&self) -> OwnerKey {
        self.signer.public_key()
    }
}

impl fmt::Debug for StorageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSession")
            .field("owner", &self.owner())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn account() -> StorageAccountId {
        StorageAccountId::new("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").unwrap()
    }

    #[rstest]
    #[case::trailing_slash("https://host.example/")]
    #[case::no_trailing_slash("https://host.example")]
    fn file_url_appends_account_and_file(#[case] base: &str) {
        let endpoint = Endpoint::parse(base, base).unwrap();
        let url = endpoint
            .file_url(&account(), &FileName::index(), None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://host.example/9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin/index.json"
        );
    }

    #[test]
    fn file_url_carries_cache_buster() {
        let endpoint = Endpoint::default();
        let url = endpoint
            .file_url(&account(), &FileName::index(), Some(1704110400000))
            .unwrap();
        assert_eq!(url.query(), Some("c=1704110400000"));
    }

    #[test]
    fn file_names_are_percent_encoded() {
        let endpoint = Endpoint::default();
        let file = FileName::for_article("My first post?").unwrap();
        let url = endpoint.file_url(&account(), &file, None).unwrap();
        assert!(url.path().ends_with("/My%20first%20post%3F.json"));
        assert_eq!(url.query(), None);
    }

    #[test]
    fn action_url_under_nested_base() {
        let endpoint = Endpoint::parse("https://read.example/", "https://write.example/v2/").unwrap();
        assert_eq!(
            endpoint.action_url("upload").unwrap().as_str(),
            "https://write.example/v2/upload"
        );
    }
}
