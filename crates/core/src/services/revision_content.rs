//! Decoding of stored revision content.

use qanda_common::ObjectType;
use serde::Deserialize;
use thiserror::Error;

use super::{activity::ObjectTimelineDetail, resolvers::ObjectInfo};

/// Reasons a revision cannot be turned into a timeline detail.
#[derive(Debug, Error)]
pub enum RevisionDecodeError {
    /// Revisions are never stored for this kind of object.
    #[error("unsupported object type: {0}")]
    UnsupportedObjectType(ObjectType),

    /// Content is not valid JSON for the object type.
    #[error("malformed revision content: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Tag reference inside a question revision.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RevisionTag {
    /// Tag slug name.
    pub slug_name: String,
}

/// Question snapshot, with the tags attached at the time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestionRevision {
    /// Question title.
    pub title: String,
    /// Markdown source.
    pub original_text: String,
    /// Attached tags.
    pub tags: Vec<RevisionTag>,
}

/// Answer snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnswerRevision {
    /// Markdown source.
    pub original_text: String,
}

/// Tag snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagRevision {
    /// Tag slug name.
    pub slug_name: String,
    /// Markdown source of the tag description.
    pub original_text: String,
}

/// Revision content, keyed by the kind of object it snapshots.
#[derive(Debug, Clone)]
pub enum RevisionContent {
    /// Question with its tags.
    Question(QuestionRevision),
    /// Answer body.
    Answer(AnswerRevision),
    /// Tag description.
    Tag(TagRevision),
}

impl RevisionContent {
    /// Decode the JSON content of a revision of an object of `object_type`.
    pub fn decode(object_type: ObjectType, content: &str) -> Result<Self, RevisionDecodeError> {
        Ok(match object_type {
            ObjectType::Question => Self::Question(serde_json::from_str(content)?),
            ObjectType::Answer => Self::Answer(serde_json::from_str(content)?),
            ObjectType::Tag => Self::Tag(serde_json::from_str(content)?),
            ObjectType::Comment => {
                return Err(RevisionDecodeError::UnsupportedObjectType(object_type));
            }
        })
    }

    /// Render for diff display.
    ///
    /// Answers carry no title of their own and show the question title from
    /// `object_info`.
    #[must_use]
    pub fn into_detail(self, object_info: &ObjectInfo) -> ObjectTimelineDetail {
        match self {
            Self::Question(q) => ObjectTimelineDetail {
                title: q.title,
                tags: q.tags.into_iter().map(|t| t.slug_name).collect(),
                original_text: q.original_text,
            },
            Self::Answer(a) => ObjectTimelineDetail {
                title: object_info.title.clone(),
                tags: Vec::new(),
                original_text: a.original_text,
            },
            Self::Tag(t) => ObjectTimelineDetail {
                title: t.slug_name,
                tags: Vec::new(),
                original_text: t.original_text,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(object_type: ObjectType) -> ObjectInfo {
        ObjectInfo {
            title: "How do lifetimes work?".to_string(),
            object_type,
            question_id: Some("q1".to_string()),
            answer_id: None,
        }
    }

    #[test]
    fn test_question_revision_collects_tag_slugs() {
        let content = r#"{
            "title": "How do lifetimes work?",
            "original_text": "body",
            "tags": [{"slug_name": "rust", "display_name": "Rust"}, {"slug_name": "borrowck"}]
        }"#;

        let detail = RevisionContent::decode(ObjectType::Question, content)
            .unwrap()
            .into_detail(&info(ObjectType::Question));

        assert_eq!(detail.title, "How do lifetimes work?");
        assert_eq!(detail.tags, vec!["rust", "borrowck"]);
        assert_eq!(detail.original_text, "body");
    }

    #[test]
    fn test_answer_revision_uses_question_title() {
        let detail = RevisionContent::decode(ObjectType::Answer, r#"{"original_text":"use 'a"}"#)
            .unwrap()
            .into_detail(&info(ObjectType::Answer));

        assert_eq!(detail.title, "How do lifetimes work?");
        assert!(detail.tags.is_empty());
        assert_eq!(detail.original_text, "use 'a");
    }

    #[test]
    fn test_tag_revision_uses_slug_as_title() {
        let detail = RevisionContent::decode(
            ObjectType::Tag,
            r#"{"slug_name":"rust","original_text":"A language"}"#,
        )
        .unwrap()
        .into_detail(&info(ObjectType::Tag));

        assert_eq!(detail.title, "rust");
        assert_eq!(detail.original_text, "A language");
    }

    #[test]
    fn test_comment_is_unsupported() {
        let err = RevisionContent::decode(ObjectType::Comment, "{}").unwrap_err();
        assert!(matches!(
            err,
            RevisionDecodeError::UnsupportedObjectType(ObjectType::Comment)
        ));
    }

    #[test]
    fn test_malformed_content() {
        let err = RevisionContent::decode(ObjectType::Question, "not json").unwrap_err();
        assert!(matches!(err, RevisionDecodeError::Malformed(_)));
    }
}
