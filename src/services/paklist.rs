//! Pak-list manifest parsing.
//!
//! A pak list has one entry per line, two double-quoted tokens separated by a
//! single space:
//!
//! ```text
//! "D:/Proj/Saved/Cooked/WindowsNoEditor/Proj/Content/Maps/Level.uasset" "../../../Proj/Content/Maps/Level.uasset"
//! "D:/Proj/Extra/readme.txt" "../../../Proj/Extra/readme.txt"
//! ```
//!
//! Lines naming a `.uasset` become [`AssetRef`]s in `explicit_assets`. Lines
//! naming another asset content extension (`.ubulk`, `.uexp`, `.umap`) are
//! dropped: they go to neither collection. Everything else becomes an
//! [`ExternFileRef`] in `extern_files`.
//!
//! Parsing is permissive. Malformed lines are never rejected, a missing file is
//! a no-op, and [`parse`] always reports success.
//!
//! # Examples
//!
//! ```ignore
//! use hotpatch_release::ReleaseConfig;
//! use hotpatch_release::services::paklist;
//! use camino::Utf8Path;
//!
//! let mut config = ReleaseConfig::new("1.0.1");
//! paklist::parse(&mut config, Utf8Path::new("D:/Proj/PakList.txt"));
//! ```

use crate::models::{AssetRef, ExternFileRef, PakEntry, ReleaseConfig};
use camino::Utf8Path;
use std::fs;

/// Token delimiter: closing quote, space, opening quote
const DELIMITER: &str = "\" \"";

const UTF8_BOM: char = '\u{feff}';

/// Extensions that mark a line as engine asset content
pub const ASSET_EXTENSIONS: [&str; 4] = [".uasset", ".ubulk", ".uexp", ".umap"];

/// How a manifest line is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `.uasset` line, appended to `explicit_assets`
    Asset,
    /// Other asset content extension, appended nowhere
    DroppedAsset,
    /// Anything else, appended to `extern_files`
    ExternFile,
}

/// Per-pass counts from [`parse_with_report`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PakListReport {
    pub file_found: bool,
    pub assets: usize,
    pub extern_files: usize,
    pub dropped: usize,
    /// Lines without the `" "` delimiter (still routed)
    pub missing_delimiter: usize,
}

impl PakListReport {
    pub fn total_routed(&self) -> usize {
        self.assets + self.extern_files
    }
}

/// Split one manifest line into its left and right tokens.
///
/// The split point is the first `" "` in the line. The left token loses its
/// leading quote and the right token its trailing quote. Without a delimiter
/// the whole line (outer quotes removed) is the left token and the right token
/// is empty.
pub fn split_entry(line: &str) -> PakEntry {
    try_split_entry(line).unwrap_or_else(|| whole_line_entry(line))
}

/// Split on the first `" "`, or `None` when the line has no delimiter.
pub fn try_split_entry(line: &str) -> Option<PakEntry> {
    let idx = line.find(DELIMITER)?;
    let left = &line[..idx];
    let right = &line[idx + DELIMITER.len()..];
    Some(PakEntry::new(
        left.strip_prefix('"').unwrap_or(left),
        right.strip_suffix('"').unwrap_or(right),
    ))
}

fn whole_line_entry(line: &str) -> PakEntry {
    let whole = line.strip_prefix('"').unwrap_or(line);
    let whole = whole.strip_suffix('"').unwrap_or(whole);
    PakEntry::new(whole, "")
}

/// Route a manifest line by the extensions it contains.
pub fn classify(line: &str) -> EntryKind {
    if !ASSET_EXTENSIONS.iter().any(|ext| line.contains(ext)) {
        return EntryKind::ExternFile;
    }

    if line.contains(".uasset") {
        EntryKind::Asset
    } else {
        EntryKind::DroppedAsset
    }
}

/// Parse a pak list into `config`, always reporting success.
pub fn parse(config: &mut ReleaseConfig, manifest_path: &Utf8Path) -> bool {
    parse_with_report(config, manifest_path);
    true
}

/// Parse a pak list into `config` and return what was appended.
///
/// A missing file leaves `config` untouched. An existing file that cannot be
/// read is logged and also leaves `config` untouched.
pub fn parse_with_report(config: &mut ReleaseConfig, manifest_path: &Utf8Path) -> PakListReport {
    let mut report = PakListReport::default();

    if !manifest_path.is_file() {
        tracing::debug!("Pak list not found, nothing to parse: {}", manifest_path);
        return report;
    }
    report.file_found = true;

    let contents = match fs::read_to_string(manifest_path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read pak list {}: {}", manifest_path, e);
            return report;
        }
    };

    // Pak lists written by the editor may start with a UTF-8 byte order mark
    let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(&contents);

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let entry = try_split_entry(line).unwrap_or_else(|| {
            report.missing_delimiter += 1;
            whole_line_entry(line)
        });

        match classify(line) {
            EntryKind::Asset => {
                tracing::debug!("Asset entry: left={}, right={}", entry.left, entry.right);
                config.add_explicit_asset(AssetRef::from_pak_entry(&entry));
                report.assets += 1;
            }
            EntryKind::DroppedAsset => {
                tracing::debug!("Skipping non-uasset content line: {}", line);
                report.dropped += 1;
            }
            EntryKind::ExternFile => {
                tracing::debug!("Extern entry: left={}, right={}", entry.left, entry.right);
                config.add_extern_file(ExternFileRef::from_pak_entry(&entry));
                report.extern_files += 1;
            }
        }
    }

    tracing::info!(
        "Parsed pak list {}: {} assets, {} extern files, {} dropped",
        manifest_path,
        report.assets,
        report.extern_files,
        report.dropped
    );

    report
}
