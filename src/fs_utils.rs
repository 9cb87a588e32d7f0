use crate::error::{EmbedError, Result};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Capability to fetch the text content of a named asset.
///
/// Generation only talks to assets through this trait, so the transform can be
/// driven from the filesystem or from in-memory content alike.
pub trait AssetSource {
    /// Returns the full text content of `file`.
    ///
    /// # Errors
    ///
    /// - `EmbedError::FileNotFound` if the asset doesn't exist.
    /// - `EmbedError::FileAccess` if it exists but can't be read as text.
    fn read(&self, file: &str) -> Result<String>;

    /// Size of the asset in bytes, or `None` when it is not available.
    fn size(&self, file: &str) -> Option<u64>;
}

/// Reads assets from disk, relative to a base directory
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    base_dir: PathBuf,
}

impl FsAssetSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path an asset name resolves to
    #[must_use]
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }
}

impl Default for FsAssetSource {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl AssetSource for FsAssetSource {
    fn read(&self, file: &str) -> Result<String> {
        read_file_contents(&self.resolve(file))
    }

    fn size(&self, file: &str) -> Option<u64> {
        fs::metadata(self.resolve(file))
            .ok()
            .filter(fs::Metadata::is_file)
            .map(|m| m.len())
    }
}

/// In-memory assets keyed by file name
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    files: BTreeMap<String, String>,
}

impl MemoryAssetSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, file: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(file, content);
        self
    }

    pub fn insert(&mut self, file: impl Into<String>, content: impl Into<String>) {
        self.files.insert(file.into(), content.into());
    }
}

impl AssetSource for MemoryAssetSource {
    fn read(&self, file: &str) -> Result<String> {
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| EmbedError::FileNotFound {
                path: PathBuf::from(file),
            })
    }

    fn size(&self, file: &str) -> Option<u64> {
        self.files.get(file).map(|c| c.len() as u64)
    }
}

/// Reads the contents of a file at the given path
///
/// # Errors
///
/// - `EmbedError::FileNotFound` if the path doesn't exist or isn't a file.
/// - `EmbedError::FileAccess` if the file can't be read or isn't valid UTF-8.
pub fn read_file_contents(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(EmbedError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|source| EmbedError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// Folds `\r\n` and lone `\r` into `\n`, the way a text-mode read does
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
