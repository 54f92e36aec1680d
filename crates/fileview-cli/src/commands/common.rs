use std::env;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fileview_core::models::{AttachmentId, DisplayAttachment, Filter};
use fileview_core::navigation::RecordingNavigator;
use fileview_core::notify::RecordingNotifier;
use fileview_core::query::{Fixture, InMemoryQueryService};
use fileview_core::util::non_blank;
use fileview_core::{Applied, GalleryConfig, GalleryController};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const FIXTURE_ENV_VAR: &str = "FILEVIEW_FIXTURE";

pub type CliGallery =
    GalleryController<InMemoryQueryService, RecordingNotifier, RecordingNavigator>;

#[derive(Debug, Serialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub size: String,
    pub thumbnail_url: String,
    pub created_at: i64,
    pub created_at_iso: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub title: String,
    pub total_count: usize,
    pub offset: usize,
    pub more_available: bool,
    pub sort_field: String,
    pub sort_direction: String,
    pub sort_icon: String,
    pub active_filters: Vec<String>,
    pub filters: Vec<Filter>,
    pub items: Vec<GalleryItem>,
}

/// One file handed to the simulated upload widget.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UploadSpec {
    pub title: String,
    pub size_bytes: u64,
    pub file_type: String,
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("fileview").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve user config directory".to_string()))
}

pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

pub fn resolve_fixture_path(
    explicit: Option<PathBuf>,
    env_value: Option<String>,
) -> Result<PathBuf, CliError> {
    explicit
        .or_else(|| env_value.as_deref().and_then(non_blank).map(PathBuf::from))
        .ok_or(CliError::MissingFixture)
}

pub fn fixture_path_from_env(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    resolve_fixture_path(explicit, env::var(FIXTURE_ENV_VAR).ok())
}

/// Build a gallery over the fixture and load its first page.
pub async fn open_gallery(fixture_path: &Path, config_path: &Path) -> Result<CliGallery, CliError> {
    let fixture = Fixture::load_from_path(fixture_path)?;
    let config = GalleryConfig::load_from_path(config_path)?;
    tracing::debug!(
        fixture = %fixture_path.display(),
        records = fixture.records.len(),
        "Loaded attachment fixture"
    );

    let parent_id = fixture.parent_id.clone();
    let service = InMemoryQueryService::from_fixture(fixture);
    let mut gallery = GalleryController::new(
        parent_id,
        config,
        service,
        RecordingNotifier::default(),
        RecordingNavigator::default(),
    )?;

    ensure_applied(gallery.mount().await)?;
    Ok(gallery)
}

pub async fn load_more_rounds(gallery: &mut CliGallery, rounds: usize) -> Result<(), CliError> {
    for _ in 0..rounds {
        if !gallery.state().more_available() {
            break;
        }
        ensure_applied(gallery.load_more().await)?;
    }
    Ok(())
}

pub fn load_uploads(path: &Path) -> Result<Vec<UploadSpec>, CliError> {
    let payload = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&payload)?)
}

/// Store the uploads in the fixture service, returning their new ids.
pub async fn store_uploads(gallery: &CliGallery, uploads: Vec<UploadSpec>) -> Vec<AttachmentId> {
    let mut ids = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let id = gallery
            .query_service()
            .upload(upload.title, upload.size_bytes, upload.file_type)
            .await;
        ids.push(id);
    }
    ids
}

pub const fn ensure_applied(applied: Applied) -> Result<(), CliError> {
    match applied {
        Applied::Failed => Err(CliError::FetchFailed),
        Applied::Committed | Applied::Stale | Applied::Skipped => Ok(()),
    }
}

pub fn gallery_view(gallery: &CliGallery) -> GalleryView {
    let state = gallery.state();
    let sort = gallery.sort();

    GalleryView {
        title: state.title(),
        total_count: state.total_count(),
        offset: state.offset(),
        more_available: state.more_available(),
        sort_field: sort.field.to_string(),
        sort_direction: sort.direction.as_query().to_string(),
        sort_icon: sort.direction.icon().to_string(),
        active_filters: gallery
            .filters()
            .active_ids()
            .iter()
            .map(ToString::to_string)
            .collect(),
        filters: gallery.filters().filters().copied().collect(),
        items: state.items().iter().map(gallery_item).collect(),
    }
}

pub fn gallery_item(item: &DisplayAttachment) -> GalleryItem {
    GalleryItem {
        id: item.id().to_string(),
        title: item.record.title.clone(),
        icon: item.icon.to_string(),
        size: item.formatted_size.clone(),
        thumbnail_url: item.thumbnail_url.clone(),
        created_at: item.record.created_at,
        created_at_iso: format_timestamp(item.record.created_at),
    }
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |datetime| datetime.format("%Y-%m-%d %H:%M").to_string(),
    )
}

pub fn format_gallery_lines(view: &GalleryView) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.items.len() + 3);
    lines.push(format!(
        "{}  sorted by {} {}",
        view.title, view.sort_field, view.sort_direction
    ));
    lines.push(
        view.filters
            .iter()
            .map(|filter| {
                let mark = if filter.active { 'x' } else { ' ' };
                format!("[{mark}] {}", filter.label)
            })
            .collect::<Vec<_>>()
            .join("  "),
    );

    for item in &view.items {
        lines.push(format!(
            "{}  {:<20} {:>10}  {}  {}",
            item.id, item.icon, item.size, item.created_at_iso, item.title
        ));
    }

    if view.more_available {
        lines.push(format!(
            "... {} of {} shown, more available",
            view.offset, view.total_count
        ));
    }
    lines
}
