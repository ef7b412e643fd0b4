use crate::services::extern_files::{DirectoryScanner, WalkDirScanner};
use camino::Utf8PathBuf;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::asset::{AssetRef, DependencyKind, default_dependency_kinds};
use super::extern_file::{ExternDirRef, ExternFileRef};

/// Settings describing what goes into one release export.
///
/// A session owns exactly one of these and mutates it in place, either from
/// field edits or from parsing a pak list (see [`crate::services::paklist`]).
/// Every field has a default, so partial YAML files load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub version_id: String,

    pub use_external_pak_list: bool,
    /// Only meaningful when `use_external_pak_list` is set
    pub pak_list_path: Option<Utf8PathBuf>,

    pub include_filters: IndexSet<String>,
    pub exclude_filters: IndexSet<String>,

    pub analyze_filter_dependencies: bool,
    pub include_startup_packages: bool,
    pub include_only_referenced_assets: bool,
    pub dependency_kinds: IndexSet<DependencyKind>,

    pub explicit_assets: Vec<AssetRef>,
    pub extern_files: Vec<ExternFileRef>,
    pub extern_directories: Vec<ExternDirRef>,

    pub save_path: Utf8PathBuf,
    pub save_release_config: bool,
    pub save_asset_related_info: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            version_id: String::new(),
            use_external_pak_list: false,
            pak_list_path: None,
            include_filters: IndexSet::new(),
            exclude_filters: IndexSet::new(),
            analyze_filter_dependencies: true,
            include_startup_packages: true,
            include_only_referenced_assets: false,
            dependency_kinds: default_dependency_kinds(),
            explicit_assets: Vec::new(),
            extern_files: Vec::new(),
            extern_directories: Vec::new(),
            save_path: Utf8PathBuf::new(),
            save_release_config: false,
            save_asset_related_info: false,
        }
    }
}

/// Identifies a [`ReleaseConfig`] field in change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseField {
    VersionId,
    UseExternalPakList,
    PakListPath,
    IncludeFilters,
    ExcludeFilters,
    AnalyzeFilterDependencies,
    IncludeStartupPackages,
    IncludeOnlyReferencedAssets,
    DependencyKinds,
    ExplicitAssets,
    ExternFiles,
    ExternDirectories,
    SavePath,
    SaveReleaseConfig,
    SaveAssetRelatedInfo,
}

impl ReleaseConfig {
    pub fn new(version_id: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            ..Self::default()
        }
    }

    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    /// Add an include filter; returns false if it was already present
    pub fn add_include_filter(&mut self, path: impl Into<String>) -> bool {
        self.include_filters.insert(path.into())
    }

    /// Add an exclude filter; returns false if it was already present
    pub fn add_exclude_filter(&mut self, path: impl Into<String>) -> bool {
        self.exclude_filters.insert(path.into())
    }

    /// Non-empty include filter paths in first-seen order
    pub fn asset_include_filter_paths(&self) -> Vec<String> {
        unique_non_empty(&self.include_filters)
    }

    /// Non-empty exclude filter paths in first-seen order
    pub fn asset_exclude_filter_paths(&self) -> Vec<String> {
        unique_non_empty(&self.exclude_filters)
    }

    pub fn add_explicit_asset(&mut self, asset: AssetRef) {
        self.explicit_assets.push(asset);
    }

    pub fn add_extern_file(&mut self, file: ExternFileRef) {
        self.extern_files.push(file);
    }

    pub fn add_extern_directory(&mut self, directory: ExternDirRef) {
        self.extern_directories.push(directory);
    }

    /// All extern files, with extern directories expanded from disk.
    pub fn all_extern_files(&self, compute_hash: bool) -> Vec<ExternFileRef> {
        self.all_extern_files_with(&WalkDirScanner, compute_hash)
    }

    /// All extern files, expanding directories through `scanner`.
    ///
    /// Directory contents come first, followed by explicit extern files whose
    /// path was not already produced by a directory.
    pub fn all_extern_files_with<S>(&self, scanner: &S, compute_hash: bool) -> Vec<ExternFileRef>
    where
        S: DirectoryScanner + ?Sized,
    {
        let mut all: IndexSet<ExternFileRef> = self
            .extern_directories
            .iter()
            .flat_map(|dir| scanner.scan(dir))
            .collect();

        for file in &self.extern_files {
            if !all.contains(file) {
                all.insert(file.clone());
            }
        }

        let mut files: Vec<ExternFileRef> = all.into_iter().collect();

        if compute_hash {
            for file in &mut files {
                if let Err(e) = file.generate_file_hash() {
                    tracing::warn!("Could not hash extern file: {}", e);
                }
            }
        }

        files
    }

    /// Assemble the export object graph with engine-style keys.
    pub fn serialize_to_json(&self) -> Value {
        let assets: Vec<Value> = self
            .explicit_assets
            .iter()
            .map(|asset| {
                json!({
                    "Asset": asset.soft_object_path(),
                    "bAnalysisAssetDependencies": asset.analyze_dependencies,
                    "AssetRegistryDependencyTypes": dependency_names(&asset.dependency_kinds),
                })
            })
            .collect();

        let extern_files: Vec<Value> = self
            .extern_files
            .iter()
            .map(|file| {
                json!({
                    "FilePath": file.file_path,
                    "MountPath": file.mount_path,
                    "FileHash": file.file_hash.clone().unwrap_or_default(),
                })
            })
            .collect();

        let extern_directories: Vec<Value> = self
            .extern_directories
            .iter()
            .map(|dir| {
                json!({
                    "DirectoryPath": dir.directory_path,
                    "MountPoint": dir.mount_point,
                })
            })
            .collect();

        json!({
            "VersionId": self.version_id,
            "ByPakList": self.use_external_pak_list,
            "PakListFile": self.pak_list_path.as_ref().map(|p| p.as_str()).unwrap_or_default(),
            "AssetIncludeFilters": self.asset_include_filter_paths(),
            "AssetIgnoreFilters": self.asset_exclude_filter_paths(),
            "bAnalysisFilterDependencies": self.analyze_filter_dependencies,
            "bIncludeStartupPackages": self.include_startup_packages,
            "AssetRegistryDependencyTypes": dependency_names(&self.dependency_kinds),
            "bIncludeHasRefAssetsOnly": self.include_only_referenced_assets,
            "IncludeSpecifyAssets": assets,
            "AddExternFileToPak": extern_files,
            "AddExternDirectoryToPak": extern_directories,
            "bSaveAssetRelatedInfo": self.save_asset_related_info,
            "bSaveReleaseConfig": self.save_release_config,
            "SavePath": self.save_path,
        })
    }

    pub fn serialize_to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.serialize_to_json())
    }
}

fn unique_non_empty(paths: &IndexSet<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_empty() && !result.contains(path) {
            result.push(path.clone());
        }
    }
    result
}

fn dependency_names(kinds: &IndexSet<DependencyKind>) -> Vec<&'static str> {
    kinds.iter().map(DependencyKind::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::extern_files::MockDirectoryScanner;

    #[test]
    fn test_release_config_defaults() {
        let config = ReleaseConfig::default();
        assert!(config.analyze_filter_dependencies);
        assert!(config.include_startup_packages);
        assert!(!config.include_only_referenced_assets);
        assert!(!config.use_external_pak_list);
        assert_eq!(
            config.dependency_kinds.iter().copied().collect::<Vec<_>>(),
            vec![DependencyKind::Packages]
        );
    }

    #[test]
    fn test_filter_paths_dedup_and_skip_empty() {
        let mut config = ReleaseConfig::new("1.0.0");
        for path in ["/Game/A", "", "/Game/A", "/Game/B"] {
            config.add_include_filter(path);
        }
        assert!(config.add_exclude_filter(""));
        assert!(!config.add_exclude_filter(""));

        assert_eq!(config.asset_include_filter_paths(), vec!["/Game/A", "/Game/B"]);
        assert!(config.asset_exclude_filter_paths().is_empty());
    }

    #[test]
    fn test_all_extern_files_prefers_directory_entry() {
        let mut config = ReleaseConfig::new("1.0.0");
        config.add_extern_directory(ExternDirRef::new("C:/Extra", "../../../Proj/Extra"));
        config.add_extern_file(ExternFileRef::new("C:/Extra/a.txt", "explicit/a.txt"));
        config.add_extern_file(ExternFileRef::new("C:/Other/b.txt", "explicit/b.txt"));

        let mut scanner = MockDirectoryScanner::new();
        scanner.expect_scan().times(1).returning(|_| {
            vec![ExternFileRef::new("C:/Extra/a.txt", "../../../Proj/Extra/a.txt")]
        });

        let files = config.all_extern_files_with(&scanner, false);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].mount_path, "../../../Proj/Extra/a.txt");
        assert_eq!(files[1].file_path, "C:/Other/b.txt");
    }

    #[test]
    fn test_all_extern_files_without_directories_skips_scanner() {
        let mut config = ReleaseConfig::new("1.0.0");
        config.add_extern_file(ExternFileRef::new("C:/Other/b.txt", "b.txt"));
        config.add_extern_file(ExternFileRef::new("C:/Other/b.txt", "again/b.txt"));

        let mut scanner = MockDirectoryScanner::new();
        scanner.expect_scan().never();

        let files = config.all_extern_files_with(&scanner, false);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mount_path, "b.txt");
    }

    #[test]
    fn test_serialize_to_json_keys() {
        let mut config = ReleaseConfig::new("1.0.1");
        config.add_include_filter("/Game/Maps");
        config.add_explicit_asset(AssetRef::new("/Game/Maps/Level", "Level"));
        config.add_extern_file(ExternFileRef::new("C:/a.txt", "../../../Proj/a.txt"));

        let json = config.serialize_to_json();

        assert_eq!(json["VersionId"], "1.0.1");
        assert_eq!(json["ByPakList"], false);
        assert_eq!(json["AssetIncludeFilters"][0], "/Game/Maps");
        assert_eq!(json["AssetRegistryDependencyTypes"][0], "Packages");
        assert_eq!(json["IncludeSpecifyAssets"][0]["Asset"], "/Game/Maps/Level.Level");
        assert_eq!(json["AddExternFileToPak"][0]["FilePath"], "C:/a.txt");
        assert_eq!(json["AddExternFileToPak"][0]["FileHash"], "");
    }
}
