// HotPatch Release - release configuration for hot patch exports
//
// This is the library crate containing the release config model, the pak-list
// parser and the session that ties field edits to parsing.
// The binary crate (main.rs) provides a command-line front end.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use models::{
    AssetRef, DependencyKind, ExternDirRef, ExternFileRef, PakEntry, ReleaseConfig, ReleaseField,
};
pub use state::{ReleaseChange, ReleaseSession};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
