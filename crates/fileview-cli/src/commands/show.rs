use std::path::Path;

use fileview_core::models::{SizeBucket, SortField};

use crate::cli::{FilterArg, SortArg};
use crate::commands::common::{
    ensure_applied, format_gallery_lines, gallery_view, load_more_rounds, load_uploads,
    open_gallery, store_uploads, GalleryView,
};
use crate::error::CliError;

pub struct ShowOptions<'a> {
    pub sorts: &'a [SortArg],
    pub toggles: &'a [FilterArg],
    pub more: usize,
    pub upload: Option<&'a Path>,
}

pub async fn run_show(
    options: ShowOptions<'_>,
    as_json: bool,
    fixture_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let view = build_show_view(options, fixture_path, config_path).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in format_gallery_lines(&view) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Replay sorts, filter toggles, load-more rounds and uploads, in that order.
pub async fn build_show_view(
    options: ShowOptions<'_>,
    fixture_path: &Path,
    config_path: &Path,
) -> Result<GalleryView, CliError> {
    let mut gallery = open_gallery(fixture_path, config_path).await?;

    for sort in options.sorts {
        ensure_applied(gallery.select_sort(SortField::from(*sort)).await)?;
    }
    for toggle in options.toggles {
        ensure_applied(gallery.toggle_filter(SizeBucket::from(*toggle)).await)?;
    }

    load_more_rounds(&mut gallery, options.more).await?;

    if let Some(path) = options.upload {
        let uploads = load_uploads(path)?;
        let ids = store_uploads(&gallery, uploads).await;
        ensure_applied(gallery.upload_finished(ids).await)?;
    }

    Ok(gallery_view(&gallery))
}
