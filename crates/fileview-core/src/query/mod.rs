//! Query service boundary.
//!
//! The gallery never talks to storage directly; it issues one of three
//! requests against a [`QueryService`] and applies whatever comes back.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::models::{AttachmentId, AttachmentRecord, Conditions, RecordId, SortSpec};
use crate::Result;

mod memory;

pub use memory::{Fixture, InMemoryQueryService};

/// First page request issued on mount and on every sort or filter change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialQuery {
    pub parent_id: RecordId,
    pub conditions: Conditions,
    pub page_size: usize,
    pub sort: SortSpec,
}

/// Follow-up page request issued by "load more".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedQuery {
    pub parent_id: RecordId,
    pub conditions: Conditions,
    pub page_size: usize,
    pub offset: usize,
    pub sort: SortSpec,
}

/// First page plus the authoritative total and the media host for thumbnails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialPage {
    pub records: Vec<AttachmentRecord>,
    pub total_count: usize,
    pub media_base_url: String,
}

/// Trait for attachment query operations
pub trait QueryService {
    /// Fetch the first page and the total number of matching attachments
    fn initial_fetch(
        &self,
        query: &InitialQuery,
    ) -> impl Future<Output = Result<InitialPage>> + Send;

    /// Fetch specific attachments, typically just uploaded
    fn fetch_by_ids(
        &self,
        parent_id: &RecordId,
        ids: &[AttachmentId],
    ) -> impl Future<Output = Result<Vec<AttachmentRecord>>> + Send;

    /// Fetch the page starting at `query.offset`
    fn paged_fetch(
        &self,
        query: &PagedQuery,
    ) -> impl Future<Output = Result<Vec<AttachmentRecord>>> + Send;
}
