//! File names inside a storage account.
//!
//! # レイアウト
//! - `index.json`: catalog (settings + article summaries)
//! - `<title>.json`: article document
//! - `<title>-thumbnail.<ext>`: article thumbnail
//! - `authorIcon.<ext>`: author icon

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name of a file stored in a storage account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileName(String);

/// Rejected file name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid file name {name:?}: {reason}")]
pub struct InvalidFileName {
    pub name: String,
    pub reason: &'static str,
}

impl FileName {
    pub const INDEX: &'static str = "index.json";

    pub fn new(name: impl Into<String>) -> Result<Self, InvalidFileName> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("empty")
        } else if name.contains('/') || name.contains('\\') {
            Some("contains a path separator")
        } else if name.chars().any(char::is_control) {
            Some("contains a control character")
        } else if name == "." || name == ".." {
            Some("reserved path segment")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(InvalidFileName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// `index.json`
    pub fn index() -> Self {
        Self(Self::INDEX.to_string())
    }

    /// `<title>.json`; a title that would collide with the index is refused.
    pub fn for_article(title: &str) -> Result<Self, InvalidFileName> {
        if title.trim().is_empty() {
            return Err(InvalidFileName {
                name: title.to_string(),
                reason: "title is blank",
            });
        }
        let name = Self::new(format!("{title}.json"))?;
        if name.is_index() {
            return Err(InvalidFileName {
                name: name.0,
                reason: "collides with the catalog file",
            });
        }
        Ok(name)
    }

    /// `<title>-thumbnail.<ext>`, extension taken from the uploaded file's name.
    pub fn for_thumbnail(title: &str, source_name: &str) -> Result<Self, InvalidFileName> {
        Self::new(with_extension(&format!("{title}-thumbnail"), source_name))
    }

    /// `authorIcon.<ext>`
    pub fn for_author_icon(source_name: &str) -> Result<Self, InvalidFileName> {
        Self::new(with_extension("authorIcon", source_name))
    }

    pub fn is_index(&self) -> bool {
        self.0 == Self::INDEX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extension of `source_name` (text after the last dot), if it has one.
pub fn extension_of(source_name: &str) -> Option<&str> {
    match source_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

fn with_extension(stem: &str, source_name: &str) -> String {
    match extension_of(source_name) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for FileName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FileName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::new(name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Hello", "Hello.json")]
    #[case::spaces("My first post", "My first post.json")]
    #[case::unicode("はじめまして", "はじめまして.json")]
    #[case::dotted("v1.2 released", "v1.2 released.json")]
    fn article_file_names(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(FileName::for_article(title).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case::blank("")]
    #[case::whitespace("   ")]
    #[case::separator("a/b")]
    #[case::index("index")]
    fn bad_titles_are_rejected(#[case] title: &str) {
        assert!(FileName::for_article(title).is_err());
    }

    #[rstest]
    #[case::png("cat.png", "Hello-thumbnail.png")]
    #[case::double("archive.tar.gz", "Hello-thumbnail.gz")]
    #[case::no_extension("cat", "Hello-thumbnail")]
    #[case::trailing_dot("cat.", "Hello-thumbnail")]
    fn thumbnail_names_follow_source_extension(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(
            FileName::for_thumbnail("Hello", source).unwrap().as_str(),
            expected
        );
    }

    #[test]
    fn author_icon_name() {
        assert_eq!(
            FileName::for_author_icon("me.jpeg").unwrap().as_str(),
            "authorIcon.jpeg"
        );
    }

    #[test]
    fn index_name_is_recognised() {
        assert!(FileName::index().is_index());
        assert!(FileName::new("index.json").unwrap().is_index());
        assert!(!FileName::new("Hello.json").unwrap().is_index());
    }
}
