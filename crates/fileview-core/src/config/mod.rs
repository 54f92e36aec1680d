//! Gallery configuration.
//!
//! Provides `GalleryConfig`, the knobs a host page sets on the gallery: page
//! size, title label, thumbnail rendition, default sort and the behaviour
//! when every size filter is switched off.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::display::{DEFAULT_SIZE_PRECISION, DEFAULT_THUMBNAIL_RENDITION};
use crate::error::{Error, Result};
use crate::models::{EmptyFilterPolicy, SortSpec};
use crate::state::{DEFAULT_MORE_THRESHOLD, DEFAULT_TITLE_LABEL};
use crate::util::non_blank;

/// Records requested per page when the host does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 3;

const DEFAULT_PARENT_OBJECT: &str = "Case";
const MAX_SIZE_PRECISION: usize = 10;

/// Host-provided gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Records fetched per page.
    pub page_size: usize,
    /// Total above which the "more" affordance shows after a fresh load.
    pub more_threshold: usize,
    /// Decimals kept in formatted sizes.
    pub size_precision: usize,
    /// Rendition requested for thumbnails.
    pub thumbnail_rendition: String,
    /// Title label, rendered as `{label} ({count})`.
    pub title_label: String,
    /// Object type of the parent record, used for the related list link.
    pub parent_object_api_name: String,
    /// Sort applied on mount.
    pub default_sort: SortSpec,
    /// What an empty filter selection means.
    pub empty_filter_policy: EmptyFilterPolicy,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            more_threshold: DEFAULT_MORE_THRESHOLD,
            size_precision: DEFAULT_SIZE_PRECISION,
            thumbnail_rendition: DEFAULT_THUMBNAIL_RENDITION.to_string(),
            title_label: DEFAULT_TITLE_LABEL.to_string(),
            parent_object_api_name: DEFAULT_PARENT_OBJECT.to_string(),
            default_sort: SortSpec::default(),
            empty_filter_policy: EmptyFilterPolicy::default(),
        }
    }
}

impl GalleryConfig {
    /// Parse and validate a JSON config payload.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)?;
        config.validated()
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No gallery config file, using defaults");
            return Ok(Self::default());
        }

        let payload = std::fs::read_to_string(path)?;
        Self::from_json_str(&payload)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges and normalize text fields.
    pub fn validated(self) -> Result<Self> {
        if self.page_size == 0 {
            return Err(Error::InvalidInput(
                "page_size must be greater than zero".to_string(),
            ));
        }
        if self.size_precision > MAX_SIZE_PRECISION {
            return Err(Error::InvalidInput(format!(
                "size_precision must be at most {MAX_SIZE_PRECISION}"
            )));
        }

        let thumbnail_rendition =
            normalize_required(self.thumbnail_rendition, "thumbnail_rendition")?;
        let title_label = normalize_required(self.title_label, "title_label")?;
        let parent_object_api_name =
            normalize_required(self.parent_object_api_name, "parent_object_api_name")?;

        Ok(Self {
            thumbnail_rendition,
            title_label,
            parent_object_api_name,
            ..self
        })
    }
}

fn normalize_required(raw: String, field: &str) -> Result<String> {
    non_blank(&raw)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("config field '{field}' is required")))
}
