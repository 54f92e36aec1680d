//! Navigation boundary: hand-off to the preview page and the related list.

use serde::Serialize;

use crate::models::{AttachmentId, RecordId};

/// Relationship listing every document attached to the parent record.
pub const ATTACHMENTS_RELATIONSHIP: &str = "AttachedContentDocuments";

/// Where the gallery asks the host to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationTarget {
    /// Preview page with next/previous browsing over `record_ids`.
    FilePreview {
        selected_record_id: AttachmentId,
        /// Comma-joined roster of the visible attachments.
        record_ids: String,
    },
    /// Full attachments related list of the parent record.
    RelatedList {
        record_id: RecordId,
        object_api_name: String,
        relationship_api_name: String,
    },
}

/// Performs navigation on behalf of the gallery.
pub trait Navigator {
    fn navigate(&mut self, target: NavigationTarget);
}

/// Navigator that records targets instead of navigating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    targets: Vec<NavigationTarget>,
}

impl RecordingNavigator {
    pub fn targets(&self) -> &[NavigationTarget] {
        &self.targets
    }

    pub fn last(&self) -> Option<&NavigationTarget> {
        self.targets.last()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target: NavigationTarget) {
        tracing::debug!(?target, "Navigation requested");
        self.targets.push(target);
    }
}
