use std::path::{Path, PathBuf};

use fileview_core::navigation::NavigationTarget;
use fileview_core::{AttachmentId, GalleryConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::{CompletionShell, FilterArg, SortArg};
use crate::commands::common::{
    format_gallery_lines, format_timestamp, gallery_view, load_uploads, open_gallery,
    resolve_config_path, resolve_fixture_path, GalleryView, UploadSpec,
};
use crate::commands::completions::render_completions;
use crate::commands::config::run_config_init;
use crate::commands::preview::preview_target;
use crate::commands::show::{build_show_view, ShowOptions};
use crate::error::CliError;

const FIXTURE: &str = r#"{
  "parent_id": "case-001",
  "media_base_url": "https://files.example.com/",
  "records": [
    { "id": "doc1", "title": "Alpha", "created_at": 1000, "size_bytes": 200000, "file_type": "PDF", "latest_version_id": "ver1" },
    { "id": "doc2", "title": "Bravo", "created_at": 2000, "size_bytes": 50000, "file_type": "PNG", "latest_version_id": "ver2" },
    { "id": "doc3", "title": "Charlie", "created_at": 3000, "size_bytes": 5000, "file_type": "TXT", "latest_version_id": "ver3" },
    { "id": "doc4", "title": "Delta", "created_at": 4000, "size_bytes": 150000, "file_type": "JPG", "latest_version_id": "ver4" },
    { "id": "doc5", "title": "Echo", "created_at": 5000, "size_bytes": 1024, "file_type": "CSV", "latest_version_id": "ver5" }
  ]
}"#;

struct Workspace {
    _dir: TempDir,
    fixture: PathBuf,
    config: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let fixture = dir.path().join("fixture.json");
    std::fs::write(&fixture, FIXTURE).unwrap();
    let config = dir.path().join("fileview").join("config.json");
    Workspace {
        _dir: dir,
        fixture,
        config,
    }
}

fn options<'a>(sorts: &'a [SortArg], toggles: &'a [FilterArg], more: usize) -> ShowOptions<'a> {
    ShowOptions {
        sorts,
        toggles,
        more,
        upload: None,
    }
}

fn ids_of(view: &GalleryView) -> Vec<&str> {
    view.items.iter().map(|item| item.id.as_str()).collect()
}

#[tokio::test(flavor = "current_thread")]
async fn show_renders_first_page_newest_first() {
    let ws = workspace();
    let view = build_show_view(options(&[], &[], 0), &ws.fixture, &ws.config)
        .await
        .unwrap();

    assert_eq!(ids_of(&view), vec!["doc5", "doc4", "doc3"]);
    assert_eq!(view.title, "Files (3+)");
    assert_eq!(view.total_count, 5);
    assert_eq!(view.offset, 3);
    assert!(view.more_available);
    assert_eq!(view.sort_field, "created_date");
    assert_eq!(view.sort_direction, "DESC");
    assert_eq!(view.active_filters, vec!["gt100KB", "lt100KBgt10KB", "lt10KB"]);

    let first = &view.items[0];
    assert_eq!(first.icon, "doctype:csv");
    assert_eq!(first.size, "1 KB");
    assert_eq!(
        first.thumbnail_url,
        "https://files.example.com/sfc/servlet.shepherd/version/renditionDownload?rendition=THUMB120BY90&versionId=ver5"
    );
    assert_eq!(view.items[1].icon, "doctype:image");
    assert_eq!(view.items[1].size, "146.48 KB");
}

#[tokio::test(flavor = "current_thread")]
async fn show_load_more_appends_until_exhausted() {
    let ws = workspace();
    let view = build_show_view(options(&[], &[], 4), &ws.fixture, &ws.config)
        .await
        .unwrap();

    assert_eq!(ids_of(&view), vec!["doc5", "doc4", "doc3", "doc2", "doc1"]);
    assert_eq!(view.offset, 5);
    assert!(!view.more_available);
    assert_eq!(view.title, "Files (3+)");
}

#[tokio::test(flavor = "current_thread")]
async fn show_toggle_removes_bucket_and_refetches() {
    let ws = workspace();
    let view = build_show_view(options(&[], &[FilterArg::Large], 0), &ws.fixture, &ws.config)
        .await
        .unwrap();

    assert_eq!(ids_of(&view), vec!["doc5", "doc3", "doc2"]);
    assert_eq!(view.active_filters, vec!["lt100KBgt10KB", "lt10KB"]);
    assert!(!view.filters[0].active);
    assert_eq!(view.filters[0].label, ">= 100 KB");
    assert_eq!(view.title, "Files (3)");
    assert!(!view.more_available);
}

#[tokio::test(flavor = "current_thread")]
async fn show_repeated_sort_flips_direction() {
    let ws = workspace();

    let once = build_show_view(options(&[SortArg::Title], &[], 0), &ws.fixture, &ws.config)
        .await
        .unwrap();
    assert_eq!(ids_of(&once), vec!["doc5", "doc4", "doc3"]);
    assert_eq!(once.sort_direction, "DESC");

    let twice = build_show_view(
        options(&[SortArg::Title, SortArg::Title], &[], 0),
        &ws.fixture,
        &ws.config,
    )
    .await
    .unwrap();
    assert_eq!(ids_of(&twice), vec!["doc1", "doc2", "doc3"]);
    assert_eq!(twice.sort_field, "title");
    assert_eq!(twice.sort_direction, "ASC");
    assert_eq!(twice.sort_icon, "utility:arrowup");
}

#[tokio::test(flavor = "current_thread")]
async fn show_upload_prepends_new_attachment() {
    let ws = workspace();
    let upload_path = ws.fixture.with_file_name("uploads.json");
    std::fs::write(
        &upload_path,
        r#"[{ "title": "Foxtrot", "size_bytes": 2048, "file_type": "PNG" }]"#,
    )
    .unwrap();

    let show = ShowOptions {
        upload: Some(upload_path.as_path()),
        ..options(&[], &[], 0)
    };
    let view = build_show_view(show, &ws.fixture, &ws.config).await.unwrap();

    assert_eq!(view.items.len(), 4);
    assert_eq!(view.items[0].title, "Foxtrot");
    assert_eq!(view.items[0].icon, "doctype:image");
    assert_eq!(view.items[0].size, "2 KB");
    assert_eq!(view.total_count, 6);
    assert_eq!(view.offset, 3);
    assert_eq!(ids_of(&view)[1..].to_vec(), vec!["doc5", "doc4", "doc3"]);
}

#[test]
fn load_uploads_rejects_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uploads.json");

    std::fs::write(
        &path,
        r#"[{ "title": "a", "size_bytes": 1, "file_type": "PDF" }]"#,
    )
    .unwrap();
    assert_eq!(
        load_uploads(&path).unwrap(),
        vec![UploadSpec {
            title: "a".to_string(),
            size_bytes: 1,
            file_type: "PDF".to_string(),
        }]
    );

    std::fs::write(
        &path,
        r#"[{ "title": "a", "size_bytes": 1, "file_type": "PDF", "owner": "x" }]"#,
    )
    .unwrap();
    assert!(matches!(
        load_uploads(&path),
        Err(CliError::Serialization(_))
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn preview_carries_visible_roster() {
    let ws = workspace();
    let target = preview_target("doc4", 0, &ws.fixture, &ws.config)
        .await
        .unwrap();

    assert_eq!(
        target,
        NavigationTarget::FilePreview {
            selected_record_id: AttachmentId::new("doc4").unwrap(),
            record_ids: "doc5,doc4,doc3".to_string(),
        }
    );
    assert_eq!(
        serde_json::to_value(&target).unwrap(),
        serde_json::json!({
            "type": "file_preview",
            "selected_record_id": "doc4",
            "record_ids": "doc5,doc4,doc3",
        })
    );
}

#[tokio::test(flavor = "current_thread")]
async fn preview_requires_loaded_attachment() {
    let ws = workspace();

    let missing = preview_target("doc1", 0, &ws.fixture, &ws.config).await;
    assert!(matches!(
        missing,
        Err(CliError::Core(fileview_core::Error::NotFound(_)))
    ));

    let target = preview_target("doc1", 1, &ws.fixture, &ws.config)
        .await
        .unwrap();
    let NavigationTarget::FilePreview { record_ids, .. } = target else {
        panic!("expected a preview target");
    };
    assert_eq!(record_ids, "doc5,doc4,doc3,doc2,doc1");
}

#[tokio::test(flavor = "current_thread")]
async fn related_list_targets_parent_attachments() {
    let ws = workspace();
    let mut gallery = open_gallery(&ws.fixture, &ws.config).await.unwrap();
    gallery.open_related_list();

    assert_eq!(
        serde_json::to_value(gallery.navigator().last().unwrap()).unwrap(),
        serde_json::json!({
            "type": "related_list",
            "record_id": "case-001",
            "object_api_name": "Case",
            "relationship_api_name": "AttachedContentDocuments",
        })
    );
}

#[tokio::test(flavor = "current_thread")]
async fn gallery_honors_config_file() {
    let ws = workspace();
    let config = GalleryConfig {
        page_size: 2,
        title_label: "Attachments".to_string(),
        ..GalleryConfig::default()
    };
    config.save_to_path(&ws.config).unwrap();

    let gallery = open_gallery(&ws.fixture, &ws.config).await.unwrap();
    let view = gallery_view(&gallery);

    assert_eq!(ids_of(&view), vec!["doc5", "doc4"]);
    assert_eq!(view.title, "Attachments (2+)");
}

#[tokio::test(flavor = "current_thread")]
async fn open_gallery_reports_missing_fixture() {
    let ws = workspace();
    let missing = ws.fixture.with_file_name("absent.json");

    assert!(matches!(
        open_gallery(&missing, &ws.config).await,
        Err(CliError::Core(fileview_core::Error::Io(_)))
    ));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let ws = workspace();

    run_config_init(&ws.config, false).unwrap();
    assert_eq!(
        GalleryConfig::load_from_path(&ws.config).unwrap(),
        GalleryConfig::default()
    );

    assert!(matches!(
        run_config_init(&ws.config, false),
        Err(CliError::Config(_))
    ));
    run_config_init(&ws.config, true).unwrap();
}

#[test]
fn resolve_fixture_path_prefers_flag_over_env() {
    assert_eq!(
        resolve_fixture_path(
            Some(PathBuf::from("flag.json")),
            Some("env.json".to_string())
        )
        .unwrap(),
        PathBuf::from("flag.json")
    );
    assert_eq!(
        resolve_fixture_path(None, Some("  env.json ".to_string())).unwrap(),
        PathBuf::from("env.json")
    );
    assert!(matches!(
        resolve_fixture_path(None, Some("   ".to_string())),
        Err(CliError::MissingFixture)
    ));
    assert!(matches!(
        resolve_fixture_path(None, None),
        Err(CliError::MissingFixture)
    ));
}

#[test]
fn format_timestamp_renders_utc_minutes() {
    assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13");
}

#[tokio::test(flavor = "current_thread")]
async fn gallery_lines_include_title_and_more_hint() {
    let ws = workspace();
    let view = build_show_view(options(&[], &[], 0), &ws.fixture, &ws.config)
        .await
        .unwrap();
    let lines = format_gallery_lines(&view);

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Files (3+)  sorted by created_date DESC");
    assert_eq!(
        lines[1],
        "[x] >= 100 KB  [x] < 100 KB and > 10 KB  [x] <= 10 KB"
    );
    assert!(lines[2].starts_with("doc5  doctype:csv"));
    assert!(lines[2].ends_with("Echo"));
    assert_eq!(lines[5], "... 3 of 5 shown, more available");
}

#[test]
fn completions_mention_binary_name() {
    for shell in [
        CompletionShell::Bash,
        CompletionShell::Zsh,
        CompletionShell::Fish,
        CompletionShell::PowerShell,
    ] {
        let script = String::from_utf8(render_completions(shell)).unwrap();
        assert!(script.contains("fileview"), "{shell:?}");
    }
}

#[test]
fn resolve_config_path_prefers_explicit_path() {
    let path = resolve_config_path(Some(PathBuf::from("x.json"))).unwrap();
    assert_eq!(path, Path::new("x.json"));
}
