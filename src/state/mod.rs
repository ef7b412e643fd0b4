// Release session module
//
// This module provides the ReleaseSession which owns the ReleaseConfig for one
// editing session and emits change events to whoever is listening.

use crate::models::{ReleaseConfig, ReleaseField};
use crate::services::paklist;
use camino::{Utf8Path, Utf8PathBuf};
use tokio::sync::broadcast;

/// Change events emitted when the session's config is modified
#[derive(Clone, Debug, PartialEq)]
pub enum ReleaseChange {
    /// A field was edited
    FieldChanged { field: ReleaseField },

    /// A pak list was parsed into the config
    PakListParsed {
        path: Utf8PathBuf,
        assets: usize,
        extern_files: usize,
        dropped: usize,
    },

    /// Config was restored to defaults
    Reset,

    /// Config was replaced wholesale
    Reloaded,
}

/// Owner of the release config for one editing session.
///
/// The session is the only writer of its [`ReleaseConfig`]. Field edits are
/// reported through [`on_field_changed`](Self::on_field_changed), which parses
/// the pak list when the pak-list path changes. Relative pak-list paths are
/// resolved against `base_dir`.
///
/// # Usage
///
/// ```ignore
/// let mut session = ReleaseSession::new("D:/Proj/Content");
/// let mut rx = session.subscribe();
/// session.set_pak_list_path("PakList.txt");
/// ```
pub struct ReleaseSession {
    config: ReleaseConfig,
    base_dir: Utf8PathBuf,
    change_tx: broadcast::Sender<ReleaseChange>,
}

impl ReleaseSession {
    /// Create a session with a default config
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self::with_config(base_dir, ReleaseConfig::default())
    }

    /// Create a session around an existing config
    pub fn with_config(base_dir: impl Into<Utf8PathBuf>, config: ReleaseConfig) -> Self {
        let (change_tx, _) = broadcast::channel(100);
        Self {
            config,
            base_dir: base_dir.into(),
            change_tx,
        }
    }

    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    /// Mutable access for direct edits; callers report them via `on_field_changed`
    pub fn config_mut(&mut self) -> &mut ReleaseConfig {
        &mut self.config
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<ReleaseChange> {
        self.change_tx.subscribe()
    }

    /// Resolve a pak-list path against the session base directory
    pub fn resolve_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// React to an edit of `field`.
    ///
    /// Only [`ReleaseField::PakListPath`] has a side effect: the pak list it
    /// names is parsed and appended to the config.
    pub fn on_field_changed(&mut self, field: ReleaseField) -> Vec<ReleaseChange> {
        let mut changes = vec![ReleaseChange::FieldChanged { field }];

        if field == ReleaseField::PakListPath {
            if let Some(path) = self.config.pak_list_path.clone() {
                let resolved = self.resolve_path(&path);
                let report = paklist::parse_with_report(&mut self.config, &resolved);

                if report.file_found {
                    changes.push(ReleaseChange::PakListParsed {
                        path: resolved,
                        assets: report.assets,
                        extern_files: report.extern_files,
                        dropped: report.dropped,
                    });
                }
            }
        }

        self.emit(&changes);
        changes
    }

    /// Set the pak-list path and dispatch the change
    pub fn set_pak_list_path(&mut self, path: impl Into<Utf8PathBuf>) -> Vec<ReleaseChange> {
        self.config.pak_list_path = Some(path.into());
        self.on_field_changed(ReleaseField::PakListPath)
    }

    pub fn set_version_id(&mut self, version_id: impl Into<String>) -> Vec<ReleaseChange> {
        self.config.version_id = version_id.into();
        self.on_field_changed(ReleaseField::VersionId)
    }

    /// Restore the config to defaults
    pub fn reset(&mut self) {
        self.config = ReleaseConfig::default();
        tracing::info!("Release config reset");
        self.emit(&[ReleaseChange::Reset]);
    }

    /// Replace the config, e.g. after loading it from disk
    pub fn reload(&mut self, config: ReleaseConfig) {
        self.config = config;
        tracing::info!("Release config reloaded: version={}", self.config.version_id);
        self.emit(&[ReleaseChange::Reloaded]);
    }

    fn emit(&self, changes: &[ReleaseChange]) {
        for change in changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.change_tx.send(change.clone());
        }
    }
}
