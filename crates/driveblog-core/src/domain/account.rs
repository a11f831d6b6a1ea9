//! Storage accounts and their requested size.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{AccountIdentifier, OwnerKey, StorageAccountId};

/// A provisioned allocation on the storage network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageAccount {
    pub id: StorageAccountId,
    pub identifier: AccountIdentifier,
    pub owner: OwnerKey,
    pub size: StorageSize,
}

/// Reserved capacity, written as `10MB`, `1GB`, ... (1024 based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageSize {
    bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid storage size {0:?}, expected e.g. 10MB or 1GB")]
pub struct InvalidStorageSize(pub String);

impl StorageSize {
    const UNITS: [(&'static str, u64); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl FromStr for StorageSize {
    type Err = InvalidStorageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        for (unit, factor) in Self::UNITS {
            if let Some(number) = upper.strip_suffix(unit) {
                let amount: u64 = number
                    .trim()
                    .parse()
                    .map_err(|_| InvalidStorageSize(s.to_string()))?;
                let bytes = amount
                    .checked_mul(factor)
                    .filter(|b| *b > 0)
                    .ok_or_else(|| InvalidStorageSize(s.to_string()))?;
                return Ok(Self { bytes });
            }
        }
        Err(InvalidStorageSize(s.to_string()))
    }
}

impl fmt::Display for StorageSize {
    /// Largest unit that divides the size exactly; the network API takes this form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, factor) in Self::UNITS {
            if self.bytes % factor == 0 {
                return write!(f, "{}{}", self.bytes / factor, unit);
            }
        }
        write!(f, "{}B", self.bytes)
    }
}

impl Serialize for StorageSize {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StorageSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ten_mb("10MB", 10 << 20)]
    #[case::hundred_mb("100MB", 100 << 20)]
    #[case::one_gb("1GB", 1 << 30)]
    #[case::lowercase("512kb", 512 << 10)]
    #[case::spaced(" 2 MB ", 2 << 20)]
    fn parses_sizes(#[case] text: &str, #[case] bytes: u64) {
        assert_eq!(text.parse::<StorageSize>().unwrap().bytes(), bytes);
    }

    #[rstest]
    #[case::no_unit("10")]
    #[case::zero("0MB")]
    #[case::negative("-1MB")]
    #[case::unknown_unit("1TB")]
    #[case::empty("")]
    fn rejects_bad_sizes(#[case] text: &str) {
        assert!(text.parse::<StorageSize>().is_err());
    }

    #[test]
    fn displays_in_largest_exact_unit() {
        assert_eq!(StorageSize::from_bytes(1 << 30).to_string(), "1GB");
        assert_eq!(StorageSize::from_bytes(1536 << 10).to_string(), "1536KB");
        assert_eq!(StorageSize::from_bytes(100).to_string(), "100B");
    }
}
