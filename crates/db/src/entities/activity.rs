//! Activity entity.

use qanda_common::ObjectType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user action on a question, answer, tag or comment.
///
/// Rows are append-only; only `cancelled`/`cancelled_at` change after insert.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User who performed the action
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Object acted on (a comment, vote target, ...)
    pub object_id: String,

    /// Question, answer or tag whose timeline this row belongs to
    #[sea_orm(indexed)]
    pub original_object_id: String,

    /// Activity kind code
    pub activity_type: i32,

    #[sea_orm(nullable)]
    pub revision_id: Option<String>,

    #[sea_orm(default_value = false)]
    pub cancelled: bool,

    #[sea_orm(nullable)]
    pub cancelled_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::revision::Entity",
        from = "Column::RevisionId",
        to = "super::revision::Column::Id"
    )]
    Revision,
}

impl Related<super::revision::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Revision.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded activity kind, `None` for codes this build does not know.
    #[must_use]
    pub fn kind(&self) -> Option<ActivityKind> {
        ActivityKind::from_code(self.activity_type)
    }
}

/// Every activity kind stored in `activity.activity_type`.
///
/// `vote_up`/`vote_down` record the voter's action, `voted_up`/`voted_down`
/// the matching event on the receiving side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// `question.asked` (1).
    QuestionAsked,
    /// `question.closed` (2).
    QuestionClosed,
    /// `question.reopened` (3).
    QuestionReopened,
    /// `question.answered` (4).
    QuestionAnswered,
    /// `question.commented` (5).
    QuestionCommented,
    /// `question.accept` (6).
    QuestionAccept,
    /// `question.vote_up` (7).
    QuestionVoteUp,
    /// `question.voted_up` (8).
    QuestionVotedUp,
    /// `question.vote_down` (9).
    QuestionVoteDown,
    /// `question.voted_down` (10).
    QuestionVotedDown,
    /// `question.edited` (11).
    QuestionEdited,
    /// `question.rollback` (12).
    QuestionRollback,
    /// `question.deleted` (13).
    QuestionDeleted,
    /// `question.undeleted` (14).
    QuestionUndeleted,
    /// `answer.answered` (21).
    AnswerAnswered,
    /// `answer.commented` (22).
    AnswerCommented,
    /// `answer.accept` (23).
    AnswerAccept,
    /// `answer.accepted` (24).
    AnswerAccepted,
    /// `answer.vote_up` (25).
    AnswerVoteUp,
    /// `answer.voted_up` (26).
    AnswerVotedUp,
    /// `answer.vote_down` (27).
    AnswerVoteDown,
    /// `answer.voted_down` (28).
    AnswerVotedDown,
    /// `answer.edited` (29).
    AnswerEdited,
    /// `answer.rollback` (30).
    AnswerRollback,
    /// `answer.deleted` (31).
    AnswerDeleted,
    /// `answer.undeleted` (32).
    AnswerUndeleted,
    /// `tag.created` (41).
    TagCreated,
    /// `tag.edited` (42).
    TagEdited,
    /// `tag.rollback` (43).
    TagRollback,
    /// `tag.deleted` (44).
    TagDeleted,
    /// `tag.undeleted` (45).
    TagUndeleted,
    /// `comment.created` (51).
    CommentCreated,
    /// `comment.edited` (52).
    CommentEdited,
    /// `comment.deleted` (53).
    CommentDeleted,
}

impl ActivityKind {
    /// All kinds, in code order.
    pub const ALL: [Self; 34] = [
        Self::QuestionAsked,
        Self::QuestionClosed,
        Self::QuestionReopened,
        Self::QuestionAnswered,
        Self::QuestionCommented,
        Self::QuestionAccept,
        Self::QuestionVoteUp,
        Self::QuestionVotedUp,
        Self::QuestionVoteDown,
        Self::QuestionVotedDown,
        Self::QuestionEdited,
        Self::QuestionRollback,
        Self::QuestionDeleted,
        Self::QuestionUndeleted,
        Self::AnswerAnswered,
        Self::AnswerCommented,
        Self::AnswerAccept,
        Self::AnswerAccepted,
        Self::AnswerVoteUp,
        Self::AnswerVotedUp,
        Self::AnswerVoteDown,
        Self::AnswerVotedDown,
        Self::AnswerEdited,
        Self::AnswerRollback,
        Self::AnswerDeleted,
        Self::AnswerUndeleted,
        Self::TagCreated,
        Self::TagEdited,
        Self::TagRollback,
        Self::TagDeleted,
        Self::TagUndeleted,
        Self::CommentCreated,
        Self::CommentEdited,
        Self::CommentDeleted,
    ];

    /// `(code, object type, activity label)` for this kind.
    const fn definition(self) -> (i32, ObjectType, &'static str) {
        use ObjectType::{Answer, Comment, Question, Tag};
        match self {
            Self::QuestionAsked => (1, Question, "asked"),
            Self::QuestionClosed => (2, Question, "closed"),
            Self::QuestionReopened => (3, Question, "reopened"),
            Self::QuestionAnswered => (4, Question, "answered"),
            Self::QuestionCommented => (5, Question, "commented"),
            Self::QuestionAccept => (6, Question, "accept"),
            Self::QuestionVoteUp => (7, Question, "vote_up"),
            Self::QuestionVotedUp => (8, Question, "voted_up"),
            Self::QuestionVoteDown => (9, Question, "vote_down"),
            Self::QuestionVotedDown => (10, Question, "voted_down"),
            Self::QuestionEdited => (11, Question, "edited"),
            Self::QuestionRollback => (12, Question, "rollback"),
            Self::QuestionDeleted => (13, Question, "deleted"),
            Self::QuestionUndeleted => (14, Question, "undeleted"),
            Self::AnswerAnswered => (21, Answer, "answered"),
            Self::AnswerCommented => (22, Answer, "commented"),
            Self::AnswerAccept => (23, Answer, "accept"),
            Self::AnswerAccepted => (24, Answer, "accepted"),
            Self::AnswerVoteUp => (25, Answer, "vote_up"),
            Self::AnswerVotedUp => (26, Answer, "voted_up"),
            Self::AnswerVoteDown => (27, Answer, "vote_down"),
            Self::AnswerVotedDown => (28, Answer, "voted_down"),
            Self::AnswerEdited => (29, Answer, "edited"),
            Self::AnswerRollback => (30, Answer, "rollback"),
            Self::AnswerDeleted => (31, Answer, "deleted"),
            Self::AnswerUndeleted => (32, Answer, "undeleted"),
            Self::TagCreated => (41, Tag, "created"),
            Self::TagEdited => (42, Tag, "edited"),
            Self::TagRollback => (43, Tag, "rollback"),
            Self::TagDeleted => (44, Tag, "deleted"),
            Self::TagUndeleted => (45, Tag, "undeleted"),
            Self::CommentCreated => (51, Comment, "created"),
            Self::CommentEdited => (52, Comment, "edited"),
            Self::CommentDeleted => (53, Comment, "deleted"),
        }
    }

    /// Decode a stored code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Stored code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.definition().0
    }

    /// Type of the object the activity acts on.
    #[must_use]
    pub const fn object_type(self) -> ObjectType {
        self.definition().1
    }

    /// Raw activity label, e.g. `vote_up`.
    #[must_use]
    pub const fn activity_type(self) -> &'static str {
        self.definition().2
    }

    /// Label shown on timelines; `None` hides the activity.
    #[must_use]
    pub fn display_label(self) -> Option<&'static str> {
        match self.activity_type() {
            "voted_up" | "voted_down" | "accepted" => None,
            "vote_up" => Some("upvote"),
            "vote_down" => Some("downvote"),
            label => Some(label),
        }
    }

    /// The voter-side vote kinds, hidden unless votes are requested.
    #[must_use]
    pub fn is_vote(self) -> bool {
        matches!(self.activity_type(), "vote_up" | "vote_down")
    }

    /// Codes of every voter-side vote kind.
    #[must_use]
    pub fn vote_codes() -> Vec<i32> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.is_vote())
            .map(Self::code)
            .collect()
    }
}
