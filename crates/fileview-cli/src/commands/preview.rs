use std::path::Path;

use fileview_core::navigation::NavigationTarget;
use fileview_core::AttachmentId;

use crate::commands::common::{load_more_rounds, open_gallery};
use crate::error::CliError;

pub async fn run_preview(
    id: &str,
    more: usize,
    fixture_path: &Path,
    config_path: &Path,
) -> Result<(), CliError> {
    let target = preview_target(id, more, fixture_path, config_path).await?;
    println!("{}", serde_json::to_string_pretty(&target)?);
    Ok(())
}

pub async fn run_related_list(fixture_path: &Path, config_path: &Path) -> Result<(), CliError> {
    let mut gallery = open_gallery(fixture_path, config_path).await?;
    gallery.open_related_list();

    if let Some(target) = gallery.navigator().last() {
        println!("{}", serde_json::to_string_pretty(target)?);
    }
    Ok(())
}

pub async fn preview_target(
    id: &str,
    more: usize,
    fixture_path: &Path,
    config_path: &Path,
) -> Result<NavigationTarget, CliError> {
    let id: AttachmentId = id.parse()?;
    let mut gallery = open_gallery(fixture_path, config_path).await?;
    load_more_rounds(&mut gallery, more).await?;

    Ok(gallery.open_preview(&id)?)
}
