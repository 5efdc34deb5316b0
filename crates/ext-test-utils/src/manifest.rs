//! [`TestManifest`]: a manifest set file in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A manifest set written to a temporary directory that lives as long as
/// the value.
///
/// ```rust,no_run
/// use ext_test_utils::TestManifest;
///
/// let manifest = TestManifest::toml("[[extension]]\nname = \"a\"\nversion = \"1.0.0\"\n");
/// assert!(manifest.path().exists());
/// ```
pub struct TestManifest {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestManifest {
    /// Write `content` as `extensions.toml`.
    pub fn toml(content: &str) -> Self {
        Self::with_file_name("extensions.toml", content)
    }

    /// Write `content` as `extensions.yaml`.
    pub fn yaml(content: &str) -> Self {
        Self::with_file_name("extensions.yaml", content)
    }

    /// Write `content` to `file_name`; the extension picks the format.
    pub fn with_file_name(file_name: &str, content: &str) -> Self {
        let temp_dir = TempDir::new().expect("TestManifest: failed to create temp dir");
        let path = temp_dir.path().join(file_name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestManifest: failed to write {}: {e}", path.display()));
        Self { temp_dir, path }
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temporary directory holding the manifest.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
