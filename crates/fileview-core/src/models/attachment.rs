//! Attachment models

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Identifier of an attachment as issued by the query service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(String);

impl AttachmentId {
    /// Wrap a service-issued identifier, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(Error::InvalidInput(
                "Attachment id cannot be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Mint a fresh, time-sortable identifier (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AttachmentId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of the latest published version of an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the parent record the attachments belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a parent record identifier, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(Error::InvalidInput(
                "Parent record id cannot be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attachment metadata as returned by the query service.
///
/// Never mutated by the gallery; derived display fields live on
/// [`DisplayAttachment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Unique attachment identifier.
    pub id: AttachmentId,
    /// Document title.
    pub title: String,
    /// Creation timestamp (Unix ms).
    pub created_at: i64,
    /// Content size in bytes, when the service reports it.
    #[serde(default)]
    pub size_bytes: Option<u64>,
    /// File type code such as `PDF` or `PNG`.
    #[serde(default)]
    pub file_type: Option<String>,
    /// Latest published version, used for thumbnail renditions.
    pub latest_version_id: VersionId,
}

impl AttachmentRecord {
    /// Create a record with the given identity and content fields.
    #[must_use]
    pub fn new(
        id: AttachmentId,
        title: impl Into<String>,
        size_bytes: u64,
        file_type: impl Into<String>,
        latest_version_id: VersionId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            created_at: crate::util::unix_timestamp_millis_now(),
            size_bytes: Some(size_bytes),
            file_type: Some(file_type.into()),
            latest_version_id,
        }
    }
}

/// Glyph name used to render a document icon, e.g. `doctype:pdf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocIcon(&'static str);

impl DocIcon {
    /// Glyph for raster images.
    pub const IMAGE: Self = Self("image");
    /// Fallback glyph for unknown or missing file types.
    pub const ATTACHMENT: Self = Self("attachment");

    pub(crate) const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// Glyph name without the `doctype:` namespace.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DocIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doctype:{}", self.0)
    }
}

impl Serialize for DocIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An attachment enriched with the attributes the gallery renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayAttachment {
    #[serde(flatten)]
    pub record: AttachmentRecord,
    pub icon: DocIcon,
    pub formatted_size: String,
    pub thumbnail_url: String,
}

impl DisplayAttachment {
    #[must_use]
    pub const fn id(&self) -> &AttachmentId {
        &self.record.id
    }
}
