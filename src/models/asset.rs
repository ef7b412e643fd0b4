use camino::Utf8Path;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One manifest line split into its two quote-stripped tokens.
///
/// In a pak list the left token is the on-disk (cooked) file and the right token
/// is the path the file is mounted at inside the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PakEntry {
    pub left: String,
    pub right: String,
}

impl PakEntry {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Asset registry dependency categories followed when analysing assets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    None,
    Soft,
    Hard,
    SearchableName,
    SoftManage,
    HardManage,
    Packages,
    All,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Soft => "Soft",
            Self::Hard => "Hard",
            Self::SearchableName => "SearchableName",
            Self::SoftManage => "SoftManage",
            Self::HardManage => "HardManage",
            Self::Packages => "Packages",
            Self::All => "All",
        }
    }

    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "None" => Some(Self::None),
            "Soft" => Some(Self::Soft),
            "Hard" => Some(Self::Hard),
            "SearchableName" => Some(Self::SearchableName),
            "SoftManage" => Some(Self::SoftManage),
            "HardManage" => Some(Self::HardManage),
            "Packages" => Some(Self::Packages),
            "All" => Some(Self::All),
            _ => None,
        }
    }
}

/// The dependency set a fresh release config or asset starts with.
pub fn default_dependency_kinds() -> IndexSet<DependencyKind> {
    IndexSet::from([DependencyKind::Packages])
}

fn default_true() -> bool {
    true
}

/// A reference to an engine content asset to include in a release.
///
/// `package_path` is the long package name (`/Game/Maps/Level`) and `object_name`
/// the asset inside it (`Level`). Assets parsed from a pak list also remember the
/// cooked file and mount path they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub package_path: String,
    pub object_name: String,

    #[serde(default)]
    pub cooked_path: String,

    #[serde(default)]
    pub mount_path: String,

    #[serde(default = "default_true")]
    pub analyze_dependencies: bool,

    #[serde(default = "default_dependency_kinds")]
    pub dependency_kinds: IndexSet<DependencyKind>,
}

impl AssetRef {
    pub fn new(package_path: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            package_path: package_path.into(),
            object_name: object_name.into(),
            cooked_path: String::new(),
            mount_path: String::new(),
            analyze_dependencies: true,
            dependency_kinds: default_dependency_kinds(),
        }
    }

    /// Build an asset reference from a split pak-list line.
    ///
    /// The package path is derived from the mount path (right token), falling back
    /// to the cooked path when the line had no mount path.
    pub fn from_pak_entry(entry: &PakEntry) -> Self {
        let source = if entry.right.is_empty() {
            entry.left.as_str()
        } else {
            entry.right.as_str()
        };

        let package_path = mount_path_to_package(source);
        let object_name = package_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            package_path,
            object_name,
            cooked_path: entry.left.clone(),
            mount_path: entry.right.clone(),
            analyze_dependencies: true,
            dependency_kinds: default_dependency_kinds(),
        }
    }

    /// Soft object path form, e.g. `/Game/Maps/Level.Level`.
    pub fn soft_object_path(&self) -> String {
        if self.object_name.is_empty() {
            self.package_path.clone()
        } else {
            format!("{}.{}", self.package_path, self.object_name)
        }
    }
}

/// Map an archive mount path onto a long package name.
///
/// `../../../Proj/Content/Maps/Level.uasset` -> `/Game/Maps/Level`
/// `../../../Engine/Content/Basic/Cube.uasset` -> `/Engine/Basic/Cube`
/// `../../../Proj/Plugins/Foo/Content/Bar.uasset` -> `/Foo/Bar`
fn mount_path_to_package(mount_path: &str) -> String {
    let normalized = mount_path.replace('\\', "/");
    let without_ext = strip_extension(&normalized);

    let segments: Vec<&str> = without_ext
        .split('/')
        .filter(|s| !s.is_empty() && *s != "..")
        .collect();

    let Some(content_idx) = segments.iter().rposition(|s| *s == "Content") else {
        if without_ext.starts_with('/') {
            return without_ext;
        }
        return format!("/{}", segments.join("/"));
    };

    let root = if content_idx >= 2 && segments[content_idx - 2] == "Plugins" {
        segments[content_idx - 1]
    } else if content_idx >= 1 && segments[content_idx - 1] == "Engine" {
        "Engine"
    } else {
        "Game"
    };

    let rest = &segments[content_idx + 1..];
    if rest.is_empty() {
        format!("/{}", root)
    } else {
        format!("/{}/{}", root, rest.join("/"))
    }
}

/// Drop trailing separators and the file extension.
fn strip_extension(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    Utf8Path::new(trimmed).with_extension("").into_string()
}
