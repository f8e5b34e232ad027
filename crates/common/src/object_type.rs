//! Kinds of objects that carry revisions and timelines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Object kind, as exposed in timeline responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A question.
    Question,
    /// An answer to a question.
    Answer,
    /// A tag.
    Tag,
    /// A comment on a question or answer.
    Comment,
}

impl ObjectType {
    /// Wire name of the object type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Tag => "tag",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
