//! Integration tests for ReleaseSession change handling
//!
//! These tests verify that the session:
//! - Parses the pak list only when the pak-list path changes
//! - Resolves relative pak-list paths against its base directory
//! - Emits change events to subscribers

use camino::Utf8PathBuf;
use hotpatch_release::{ReleaseChange, ReleaseConfig, ReleaseField, ReleaseSession};
use std::fs;
use tempfile::TempDir;
use tokio::time::{Duration, timeout};

fn create_content_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    fs::write(
        dir.join("PakList.txt"),
        concat!(
            "\"D:/Cooked/A.uasset\" \"../../../Proj/Content/A.uasset\"\n",
            "\"D:/Cooked/A.uexp\" \"../../../Proj/Content/A.uexp\"\n",
            "\"D:/Extra/one.txt\" \"../../../Proj/Extra/one.txt\"\n",
        ),
    )
    .unwrap();
    (temp_dir, dir)
}

#[test]
fn test_relative_pak_list_path_is_parsed() {
    let (_temp_dir, dir) = create_content_dir();
    let mut session = ReleaseSession::new(dir.clone());

    let changes = session.set_pak_list_path("PakList.txt");

    assert_eq!(
        changes,
        vec![
            ReleaseChange::FieldChanged {
                field: ReleaseField::PakListPath
            },
            ReleaseChange::PakListParsed {
                path: dir.join("PakList.txt"),
                assets: 1,
                extern_files: 1,
                dropped: 1,
            },
        ]
    );
    assert_eq!(session.config().explicit_assets.len(), 1);
    assert_eq!(session.config().extern_files.len(), 1);
}

#[test]
fn test_missing_pak_list_changes_nothing() {
    let (_temp_dir, dir) = create_content_dir();
    let mut session = ReleaseSession::new(dir);

    let changes = session.set_pak_list_path("Missing.txt");

    assert_eq!(changes.len(), 1);
    assert!(session.config().explicit_assets.is_empty());
    assert!(session.config().extern_files.is_empty());
}

#[test]
fn test_reparse_appends_again() {
    let (_temp_dir, dir) = create_content_dir();
    let mut session = ReleaseSession::new(dir.clone());

    session.set_pak_list_path(dir.join("PakList.txt"));
    session.on_field_changed(ReleaseField::PakListPath);

    assert_eq!(session.config().explicit_assets.len(), 2);
    assert_eq!(session.config().extern_files.len(), 2);
}

#[test]
fn test_reload_replaces_config() {
    let mut session = ReleaseSession::new("/proj");
    let mut loaded = ReleaseConfig::new("3.0.0");
    loaded.add_include_filter("/Game/Loaded");

    session.reload(loaded.clone());

    assert_eq!(session.config(), &loaded);
}

#[tokio::test]
async fn test_subscribers_receive_parse_event() {
    let (_temp_dir, dir) = create_content_dir();
    let mut session = ReleaseSession::new(dir);
    let mut rx = session.subscribe();

    session.set_pak_list_path("PakList.txt");

    let first = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert!(
        matches!(
            first,
            ReleaseChange::FieldChanged {
                field: ReleaseField::PakListPath
            }
        ),
        "Expected FieldChanged event, got: {:?}",
        first
    );

    let second = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert!(
        matches!(second, ReleaseChange::PakListParsed { assets: 1, .. }),
        "Expected PakListParsed event, got: {:?}",
        second
    );
}

#[tokio::test]
async fn test_reset_event() {
    let mut session = ReleaseSession::new("/proj");
    let mut rx = session.subscribe();

    session.reset();

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert_eq!(event, ReleaseChange::Reset);
}
