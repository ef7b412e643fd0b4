//! Extern file collaborators: directory expansion and content hashing.
//!
//! Extern directories are expanded lazily, at query time, into one
//! [`ExternFileRef`] per regular file found beneath them. Hashes are only
//! computed when a caller asks for them.

use crate::models::{ExternDirRef, ExternFileRef};
use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while hashing an extern file
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Compute the lowercase hex SHA-256 of a file, streaming its contents.
pub fn hash_file(path: &Utf8Path) -> Result<String, HashError> {
    let file = File::open(path).map_err(|source| HashError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Expands an extern directory into the files it contains.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryScanner {
    fn scan(&self, directory: &ExternDirRef) -> Vec<ExternFileRef>;
}

/// Recursive filesystem scanner backed by `walkdir`.
///
/// Files are visited in file-name order and mounted at
/// `<mount_point>/<path relative to the directory>`. Entries that cannot be read,
/// and paths that are not valid UTF-8, are logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirScanner;

impl DirectoryScanner for WalkDirScanner {
    fn scan(&self, directory: &ExternDirRef) -> Vec<ExternFileRef> {
        let root = &directory.directory_path;
        if !root.is_dir() {
            tracing::warn!("Extern directory not found: {}", root);
            return Vec::new();
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", root, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                tracing::warn!("Skipping non UTF-8 path under {}", root);
                continue;
            };

            let relative = path
                .strip_prefix(root)
                .map(|p| p.as_str().replace('\\', "/"))
                .unwrap_or_else(|_| path.file_name().unwrap_or_default().to_string());

            let mount_path = join_mount_path(&directory.mount_point, &relative);
            files.push(ExternFileRef::new(path, mount_path));
        }

        tracing::debug!("Expanded {} into {} extern files", root, files.len());
        files
    }
}

fn join_mount_path(mount_point: &str, relative: &str) -> String {
    let mount_point = mount_point.trim_end_matches(['/', '\\']);
    if mount_point.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", mount_point, relative)
    }
}
