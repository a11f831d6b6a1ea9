//! Codec - JSON bytes と document の相互変換
//!
//! `decode_index` never fails: anything it cannot read becomes the empty
//! catalog, and the reason is handed back as a [`DecodeWarning`] instead of
//! being swallowed.

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use crate::domain::{ArticleSummary, BlogError, FileName, IndexDocument};

/// Decoded value plus whatever had to be papered over to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub warnings: Vec<DecodeWarning>,
}

impl<T> Decoded<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    fn fallback(value: T, warning: DecodeWarning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Body is not JSON at all.
    MalformedJson(String),
    /// JSON, but not shaped like an index document.
    SchemaMismatch(String),
    /// Top-level array written by early clients; read as the article list.
    LegacyArticleArray,
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::MalformedJson(e) => write!(f, "malformed JSON, using empty index: {e}"),
            DecodeWarning::SchemaMismatch(e) => {
                write!(f, "unexpected index layout, using empty index: {e}")
            }
            DecodeWarning::LegacyArticleArray => {
                f.write_str("index is a bare article array, reading it as the article list")
            }
        }
    }
}

/// Decode `index.json`, falling back to the empty document.
pub fn decode_index(bytes: &[u8]) -> Decoded<IndexDocument> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            return Decoded::fallback(
                IndexDocument::empty(),
                DecodeWarning::MalformedJson(e.to_string()),
            );
        }
    };

    match value {
        Value::Object(_) => match serde_json::from_value::<IndexDocument>(value) {
            Ok(doc) => Decoded::clean(doc),
            Err(e) => Decoded::fallback(
                IndexDocument::empty(),
                DecodeWarning::SchemaMismatch(e.to_string()),
            ),
        },
        Value::Array(_) => match serde_json::from_value::<Vec<ArticleSummary>>(value) {
            Ok(articles) => Decoded::fallback(
                IndexDocument {
                    articles,
                    ..IndexDocument::empty()
                },
                DecodeWarning::LegacyArticleArray,
            ),
            Err(e) => Decoded::fallback(
                IndexDocument::empty(),
                DecodeWarning::SchemaMismatch(e.to_string()),
            ),
        },
        other => Decoded::fallback(
            IndexDocument::empty(),
            DecodeWarning::SchemaMismatch(format!("expected an object, found {}", kind(&other))),
        ),
    }
}

/// Strict decode for documents that have no sensible default (articles).
pub fn decode<T: DeserializeOwned>(file: &FileName, bytes: &[u8]) -> Result<T, BlogError> {
    serde_json::from_slice(bytes).map_err(|source| BlogError::Decode {
        file: file.clone(),
        source,
    })
}

pub fn encode<T: Serialize>(what: &'static str, value: &T) -> Result<Bytes, BlogError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|source| BlogError::Encode { what, source })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
