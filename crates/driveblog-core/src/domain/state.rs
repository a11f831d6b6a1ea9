//! State - 1 回の mutation の進行段階
//!
//! # 状態遷移
//! `ResolvingAccount → ReadingIndex → Mutating → WritingAsset → WritingArticle → WritingIndex`
//!
//! 途中の段階は永続化されない。WritingArticle の後で失敗すると、
//! カタログに載らない記事ファイルが残る（回復処理はない）。

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationStage {
    ResolvingAccount,
    ReadingIndex,
    Mutating,
    WritingAsset,
    WritingArticle,
    WritingIndex,
    /// Reader side, not part of a mutation.
    ReadingArticle,
}

impl fmt::Display for MutationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationStage::ResolvingAccount => "resolving account",
            MutationStage::ReadingIndex => "reading index",
            MutationStage::Mutating => "mutating index",
            MutationStage::WritingAsset => "writing asset",
            MutationStage::WritingArticle => "writing article",
            MutationStage::WritingIndex => "writing index",
            MutationStage::ReadingArticle => "reading article",
        };
        f.write_str(name)
    }
}
