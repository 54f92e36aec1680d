//! Display attribute derivation for gallery items.
//!
//! Turns a raw [`AttachmentRecord`] into a [`DisplayAttachment`] carrying the
//! icon glyph, human-readable size and thumbnail URL the gallery renders.
//! Derivation is pure: the same record and settings always produce the same
//! attributes, and malformed records degrade to defaults instead of failing.

use crate::models::{AttachmentRecord, DisplayAttachment, DocIcon, VersionId};

/// Default number of decimals kept in formatted sizes.
pub const DEFAULT_SIZE_PRECISION: usize = 2;

/// Default thumbnail rendition requested from the media host.
pub const DEFAULT_THUMBNAIL_RENDITION: &str = "THUMB120BY90";

const SIZE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

const IMAGE_FILE_TYPES: [&str; 3] = ["png", "jpg", "gif"];

const SUPPORTED_ICON_TYPES: [&str; 41] = [
    "ai",
    "attachment",
    "audio",
    "box_notes",
    "csv",
    "eps",
    "excel",
    "exe",
    "flash",
    "folder",
    "gdoc",
    "gdocs",
    "gform",
    "gpres",
    "gsheet",
    "html",
    "image",
    "keynote",
    "library_folder",
    "link",
    "mp4",
    "overlay",
    "pack",
    "pages",
    "pdf",
    "ppt",
    "psd",
    "quip_doc",
    "quip_sheet",
    "quip_slide",
    "rtf",
    "slide",
    "stypi",
    "txt",
    "unknown",
    "video",
    "visio",
    "webex",
    "word",
    "xml",
    "zip",
];

/// Computes display attributes for records entering the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeriver {
    media_base_url: String,
    rendition: String,
    precision: usize,
}

impl AttributeDeriver {
    pub fn new(
        media_base_url: impl Into<String>,
        rendition: impl Into<String>,
        precision: usize,
    ) -> Self {
        Self {
            media_base_url: media_base_url.into().trim_end_matches('/').to_string(),
            rendition: rendition.into(),
            precision,
        }
    }

    /// Base URL of the media host thumbnails are served from.
    pub fn media_base_url(&self) -> &str {
        &self.media_base_url
    }

    /// Point thumbnails at a different media host.
    pub fn set_media_base_url(&mut self, media_base_url: &str) {
        self.media_base_url = media_base_url.trim_end_matches('/').to_string();
    }

    /// Enrich a record with its icon, formatted size and thumbnail URL.
    pub fn derive(&self, record: AttachmentRecord) -> DisplayAttachment {
        let icon = icon_for_file_type(record.file_type.as_deref());
        let formatted_size = format_bytes(record.size_bytes.unwrap_or(0), self.precision);
        let thumbnail_url = thumbnail_url(
            &self.media_base_url,
            &self.rendition,
            &record.latest_version_id,
        );

        DisplayAttachment {
            record,
            icon,
            formatted_size,
            thumbnail_url,
        }
    }

    pub fn derive_all(&self, records: Vec<AttachmentRecord>) -> Vec<DisplayAttachment> {
        records
            .into_iter()
            .map(|record| self.derive(record))
            .collect()
    }
}

/// Rendition download URL for a document version.
pub fn thumbnail_url(media_base_url: &str, rendition: &str, version_id: &VersionId) -> String {
    format!(
        "{}/sfc/servlet.shepherd/version/renditionDownload?rendition={rendition}&versionId={version_id}",
        media_base_url.trim_end_matches('/')
    )
}

/// Pick the document glyph for a file type code.
pub fn icon_for_file_type(file_type: Option<&str>) -> DocIcon {
    let Some(file_type) = file_type.map(|value| value.trim().to_ascii_lowercase()) else {
        return DocIcon::ATTACHMENT;
    };

    if IMAGE_FILE_TYPES.contains(&file_type.as_str()) {
        return DocIcon::IMAGE;
    }

    SUPPORTED_ICON_TYPES
        .into_iter()
        .find(|supported| *supported == file_type)
        .map_or(DocIcon::ATTACHMENT, DocIcon::named)
}

/// Index into the base-1024 unit table, i.e. `floor(log1024(bytes))`.
///
/// Computed on the bit length so exact powers of 1024 never round down.
pub const fn unit_index(bytes: u64) -> usize {
    if bytes == 0 {
        return 0;
    }
    ((u64::BITS - 1 - bytes.leading_zeros()) / 10) as usize
}

/// Human-readable size such as `1.5 KB`, with trailing zeros removed.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64, precision: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let index = unit_index(bytes);
    let divisor = (1u64 << (10 * index)) as f64;
    let value = format!("{:.precision$}", bytes as f64 / divisor);
    let value = if value.contains('.') {
        value.trim_end_matches('0').trim_end_matches('.')
    } else {
        value.as_str()
    };

    format!("{value} {}", SIZE_UNITS[index])
}
