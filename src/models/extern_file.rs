use crate::services::extern_files::{HashError, hash_file};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::asset::PakEntry;

/// A non-asset file packaged verbatim into the release archive.
///
/// Two references are the same file when their `file_path` matches; the mount
/// path and hash do not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternFileRef {
    pub file_path: Utf8PathBuf,

    #[serde(default)]
    pub mount_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
}

impl ExternFileRef {
    pub fn new(file_path: impl Into<Utf8PathBuf>, mount_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            mount_path: mount_path.into(),
            file_hash: None,
        }
    }

    pub fn from_pak_entry(entry: &PakEntry) -> Self {
        Self::new(entry.left.as_str(), entry.right.as_str())
    }

    /// Compute and store the SHA-256 of the file contents.
    pub fn generate_file_hash(&mut self) -> Result<&str, HashError> {
        let hash = hash_file(&self.file_path)?;
        let stored = self.file_hash.insert(hash);
        Ok(stored.as_str())
    }
}

impl PartialEq for ExternFileRef {
    fn eq(&self, other: &Self) -> bool {
        self.file_path == other.file_path
    }
}

impl Eq for ExternFileRef {}

impl Hash for ExternFileRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_path.hash(state);
    }
}

/// A directory whose files are expanded into extern files when queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternDirRef {
    pub directory_path: Utf8PathBuf,

    #[serde(default)]
    pub mount_point: String,
}

impl ExternDirRef {
    pub fn new(directory_path: impl Into<Utf8PathBuf>, mount_point: impl Into<String>) -> Self {
        Self {
            directory_path: directory_path.into(),
            mount_point: mount_point.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_equality_ignores_mount_and_hash() {
        let a = ExternFileRef::new("C:/Data/readme.txt", "../../../Proj/readme.txt");
        let mut b = ExternFileRef::new("C:/Data/readme.txt", "../../../Other/readme.txt");
        b.file_hash = Some("abc".to_string());

        assert_eq!(a, b);
        assert_ne!(a, ExternFileRef::new("C:/Data/other.txt", ""));
    }

    #[test]
    fn test_generate_file_hash() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "abc").unwrap();

        let path = Utf8PathBuf::from_path_buf(temp_file.path().to_path_buf()).unwrap();
        let mut file = ExternFileRef::new(path, "x/abc.txt");
        let hash = file.generate_file_hash().unwrap().to_string();

        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(file.file_hash.as_deref(), Some(hash.as_str()));
    }

    #[test]
    fn test_generate_file_hash_missing_file() {
        let mut file = ExternFileRef::new("/definitely/not/here.bin", "");
        assert!(file.generate_file_hash().is_err());
        assert!(file.file_hash.is_none());
    }
}
