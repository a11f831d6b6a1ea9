//! Errors - エラー型と分類
//!
//! - `StoreError`: adapter level (HTTP, in-memory, account directory)
//! - `BlogError`: operation level, what `Blog` returns
//!
//! 404 is never an error: absent files come back as `None`.

use thiserror::Error;

use super::files::{FileName, InvalidFileName};
use super::ids::AccountIdentifier;
use super::state::MutationStage;

/// ErrorKind は呼び出し側向けの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The storage account (or a required file) does not exist.
    NotFound,
    /// The input was refused before anything was written.
    Invalid,
    /// Another session changed `index.json` in between.
    Conflict,
    /// Network, store or signing failure.
    Transport,
    /// Some files were written, the catalog was not updated.
    PartialWrite,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file {0} already exists")]
    AlreadyExists(FileName),

    #[error("file {0} does not exist")]
    Missing(FileName),

    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("cannot build file url: {0}")]
    InvalidUrl(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("storage account '{0}' already exists")]
    AccountExists(AccountIdentifier),
}

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("storage account '{0}' not found")]
    AccountNotFound(AccountIdentifier),

    #[error("invalid article title: {0}")]
    InvalidTitle(#[source] InvalidFileName),

    #[error(transparent)]
    InvalidFileName(#[from] InvalidFileName),

    #[error("an article titled {0:?} already exists")]
    DuplicateTitle(String),

    #[error("index.json changed concurrently (read revision {expected}, now {found})")]
    Conflict { expected: u64, found: u64 },

    #[error("{stage} failed")]
    Store {
        stage: MutationStage,
        #[source]
        source: StoreError,
    },

    #[error("index.json revision {0} cannot be advanced")]
    RevisionExhausted(u64),

    #[error("storage account directory failed")]
    Accounts(#[source] StoreError),

    #[error("{file} was written but index.json was not updated")]
    PartialWrite {
        file: FileName,
        #[source]
        source: Box<BlogError>,
    },

    #[error("failed to encode {what}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file} is not a valid document")]
    Decode {
        file: FileName,
        #[source]
        source: serde_json::Error,
    },
}

impl BlogError {
    /// store の失敗を、止まった段階つきで包む
    pub fn store(stage: MutationStage, source: StoreError) -> Self {
        BlogError::Store { stage, source }
    }

    /// 呼び出し側向けの分類
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::AccountNotFound(_) => ErrorKind::NotFound,
            BlogError::InvalidTitle(_)
            | BlogError::InvalidFileName(_)
            | BlogError::DuplicateTitle(_)
            | BlogError::RevisionExhausted(_)
            | BlogError::Encode { .. }
            | BlogError::Decode { .. } => ErrorKind::Invalid,
            BlogError::Conflict { .. } => ErrorKind::Conflict,
            BlogError::Store { .. } | BlogError::Accounts(_) => ErrorKind::Transport,
            BlogError::PartialWrite { .. } => ErrorKind::PartialWrite,
        }
    }

    /// Conflict, either directly or as the cause of a partial write.
    pub fn is_conflict(&self) -> bool {
        match self {
            BlogError::Conflict { .. } => true,
            BlogError::PartialWrite { source, .. } => source.is_conflict(),
            _ => false,
        }
    }

    /// Stage the operation stopped at, when a store call failed.
    pub fn stage(&self) -> Option<MutationStage> {
        match self {
            BlogError::Store { stage, .. } => Some(*stage),
            BlogError::PartialWrite { .. } | BlogError::Conflict { .. } => {
                Some(MutationStage::WritingIndex)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn partial_write_exposes_its_cause() {
        let err = BlogError::PartialWrite {
            file: FileName::new("Hello.json").unwrap(),
            source: Box::new(BlogError::Conflict {
                expected: 1,
                found: 2,
            }),
        };

        assert_eq!(err.kind(), ErrorKind::PartialWrite);
        assert!(err.is_conflict());
        assert_eq!(err.stage(), Some(MutationStage::WritingIndex));
        assert!(err.to_string().contains("Hello.json"));
        assert!(err.source().unwrap().to_string().contains("revision 1"));
    }

    #[test]
    fn store_errors_carry_their_stage() {
        let err = BlogError::store(
            MutationStage::WritingArticle,
            StoreError::Transport("connection reset".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.stage(), Some(MutationStage::WritingArticle));
        assert_eq!(err.to_string(), "writing article failed");
    }
}
