//! Data models for fileview

mod attachment;
mod filter;
mod sort;

pub use attachment::{
    AttachmentId, AttachmentRecord, DisplayAttachment, DocIcon, RecordId, VersionId,
};
pub use filter::{Conditions, EmptyFilterPolicy, Filter, FilterSet, SizeBucket};
pub use sort::{SortDirection, SortField, SortSpec};
