//! Index document (`index.json`) - the catalog of one storage account.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Blog-wide settings edited from the settings form.
///
/// Empty text means "not set". `authorIcon` is the key older clients wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogSettings {
    pub blog_name: String,
    pub author_name: String,
    #[serde(alias = "authorIcon")]
    pub author_icon_file_name: String,
}

impl BlogSettings {
    pub fn new(
        blog_name: impl Into<String>,
        author_name: impl Into<String>,
        author_icon_file_name: impl Into<String>,
    ) -> Self {
        Self {
            blog_name: blog_name.into(),
            author_name: author_name.into(),
            author_icon_file_name: author_icon_file_name.into(),
        }
    }

    pub fn author_icon(&self) -> Option<&str> {
        non_empty(&self.author_icon_file_name)
    }
}

/// One entry of the catalog. `title` doubles as the article file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub title: String,
    #[serde(alias = "date")]
    pub published_at: DateTime<Utc>,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_file_name: String,
}

impl ArticleSummary {
    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(&self.thumbnail_file_name)
    }
}

/// The whole `index.json`.
///
/// Written back as a unit on every mutation. Keys this crate does not know
/// about are kept in `extra` so a read-modify-write does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: BlogSettings,

    /// Newest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<ArticleSummary>,

    /// Bumped on every write; absent in documents written by older clients.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub revision: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndexDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Put `summary` at the head of the catalog.
    pub fn push_front(&mut self, summary: ArticleSummary) {
        self.articles.insert(0, summary);
    }

    pub fn find(&self, title: &str) -> Option<&ArticleSummary> {
        self.articles.iter().find(|a| a.title == title)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.find(title).is_some()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
