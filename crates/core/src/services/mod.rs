//! Services.

pub mod activity;
pub mod resolvers;
pub mod revision_content;
pub mod tag;

pub use activity::{
    ActivityService, ActivityTimelineItem, GetObjectTimelineDetailInput, GetObjectTimelineInput,
    ObjectTimeline, ObjectTimelineDetail, ObjectTimelineDiff,
};
pub use resolvers::{
    CommentInfo, CommentResolver, ObjectInfo, ObjectInfoResolver, RevisionStore,
    SiteConfigReader, StaticSiteConfig, UserBasicInfo, UserProfileResolver,
};
pub use revision_content::{RevisionContent, RevisionDecodeError};
pub use tag::{GetTagPageInput, SearchTagsInput, TagPage, TagService};
