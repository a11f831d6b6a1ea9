//! Strongly-typed public keys and identifiers.
//!
//! Account ids and wallet keys are both opaque text on the wire, so they
//! share one generic `Key<T>` and a zero-sized marker keeps them apart at
//! compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Marker for the different key kinds.
pub trait KeyMarker: Send + Sync + 'static {
    /// Human readable kind used in error messages ("storage account", "owner").
    fn kind() -> &'static str;
}

/// Public key of some on-network entity.
///
/// # 例
/// ```ignore
/// let account: StorageAccountId = Key::new("9xQe...")?;
/// let owner: OwnerKey = Key::new("Gh7s...")?;
/// // account と owner は異なる型なので、混同できない
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key<T: KeyMarker> {
    value: String,
    _marker: PhantomData<T>,
}

/// Rejected key text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} key {value:?}")]
pub struct InvalidKey {
    pub kind: &'static str,
    pub value: String,
}

impl<T: KeyMarker> Key<T> {
    /// Keys end up as URL path segments, so blanks, slashes and whitespace are refused.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidKey> {
        let value = value.into();
        let valid = !value.is_empty()
            && !value
                .chars()
                .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control());
        if !valid {
            return Err(InvalidKey {
                kind: T::kind(),
                value,
            });
        }
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T: KeyMarker> Serialize for Key<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T: KeyMarker> Deserialize<'de> for Key<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl<T: KeyMarker> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Storage account のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Account {}

impl KeyMarker for Account {
    fn kind() -> &'static str {
        "storage account"
    }
}

/// Wallet owner のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Owner {}

impl KeyMarker for Owner {
    fn kind() -> &'static str {
        "owner"
    }
}

/// Public identifier of a storage account (first path segment of every file URL).
pub type StorageAccountId = Key<Account>;

/// Public key of the wallet that owns storage accounts.
pub type OwnerKey = Key<Owner>;

/// Human-chosen label of a storage account ("driveblog").
///
/// Unlike [`StorageAccountId`] this never appears in a URL, it is only the
/// lookup key inside an owner's account list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn keys_are_distinct_types() {
        let account = StorageAccountId::new("acct1").unwrap();
        let owner = OwnerKey::new("acct1").unwrap();

        assert_eq!(account.as_str(), owner.as_str());
        // let _: OwnerKey = account; // <- does not compile
    }

    #[rstest]
    #[case::empty("")]
    #[case::slash("a/b")]
    #[case::backslash("a\\b")]
    #[case::space("a b")]
    #[case::newline("a\nb")]
    fn invalid_keys_are_rejected(#[case] value: &str) {
        let err = StorageAccountId::new(value).unwrap_err();
        assert_eq!(err.kind, "storage account");
        assert_eq!(err.value, value);
    }

    #[test]
    fn keys_serialize_as_plain_strings() {
        let account = StorageAccountId::new("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").unwrap();

        let serialized = serde_json::to_string(&account).unwrap();
        assert_eq!(serialized, "\"9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin\"");

        let deserialized: StorageAccountId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, account);

        assert!(serde_json::from_str::<StorageAccountId>("\"a/b\"").is_err());
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;
        assert_eq!(size_of::<StorageAccountId>(), size_of::<String>());
    }
}
