//! Article documents and the inputs used to create them.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::index::ArticleSummary;

/// Full body of one article, stored as `<title>.json`.
///
/// `content` is rich text and may carry raw markup; it is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDocument {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub paragraph: String,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_file_name: String,
    pub created_at: DateTime<Utc>,
}

impl ArticleDocument {
    /// Catalog entry pointing at this document.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            title: self.title.clone(),
            published_at: self.created_at,
            thumbnail_file_name: self.thumbnail_file_name.clone(),
        }
    }
}

/// A binary file picked by the user (thumbnail, author icon).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    /// Name of the file as picked; only its extension is kept.
    pub source_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl AssetUpload {
    pub fn new(
        source_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// What the author submits from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub paragraph: String,
    pub thumbnail: Option<AssetUpload>,
}

impl ArticleDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        paragraph: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            paragraph: paragraph.into(),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: AssetUpload) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    /// Freeze the draft into the stored document.
    pub fn into_document(
        self,
        thumbnail_file_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> ArticleDocument {
        ArticleDocument {
            title: self.title,
            content: self.content,
            paragraph: self.paragraph,
            thumbnail_file_name: thumbnail_file_name.unwrap_or_default(),
            created_at,
        }
    }
}

/// Settings form input: names plus an optional new author icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub blog_name: String,
    pub author_name: String,
    pub icon: Option<AssetUpload>,
}
