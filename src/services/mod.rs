//! Services module - business logic behind release configs.
//!
//! The services are framework-agnostic: they take a [`ReleaseConfig`](crate::models::ReleaseConfig)
//! and paths explicitly and have no dependency on any editor or UI layer.
//!
//! # Components
//!
//! - [`paklist`]: parses a pak-list manifest into explicit assets and extern files
//! - [`extern_files`]: expands extern directories ([`DirectoryScanner`]) and hashes files

pub mod extern_files;
pub mod paklist;

pub use extern_files::{DirectoryScanner, HashError, WalkDirScanner, hash_file};
pub use paklist::{
    EntryKind, PakListReport, classify, parse, parse_with_report, split_entry, try_split_entry,
};
