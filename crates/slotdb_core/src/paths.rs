//! Store file layout.
//!
//! A store named `people` is three sibling files plus its import source:
//!
//! ```text
//! people.data       # sorted segment
//! people.overflow   # overflow segment
//! people.config     # descriptor (record width, sorted count, overflow count)
//! people.csv        # import source, read once by create
//! ```

use crate::descriptor::Descriptor;
use crate::error::{CoreError, CoreResult};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const DATA_EXT: &str = "data";
const OVERFLOW_EXT: &str = "overflow";
const CONFIG_EXT: &str = "config";
const SOURCE_EXT: &str = "csv";
/// Temporary file for atomic descriptor writes.
const CONFIG_TEMP_EXT: &str = "config.tmp";

/// Paths of the files that make up one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    base: PathBuf,
}

impl StorePaths {
    /// Creates the layout for the store named by `base` (no extension).
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Returns the store base name.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the path to the sorted segment.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.with_ext(DATA_EXT)
    }

    /// Returns the path to the overflow segment.
    #[must_use]
    pub fn overflow_path(&self) -> PathBuf {
        self.with_ext(OVERFLOW_EXT)
    }

    /// Returns the path to the descriptor.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.with_ext(CONFIG_EXT)
    }

    /// Returns the path to the import source.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        self.with_ext(SOURCE_EXT)
    }

    /// Appends `.ext` without touching dots already in the base name.
    fn with_ext(&self, ext: &str) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }

    /// Loads the descriptor from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreMissing`] if the file is absent and
    /// [`CoreError::InvalidDescriptor`] if it does not parse.
    pub fn load_descriptor(&self) -> CoreResult<Descriptor> {
        let path = self.config_path();
        if !path.is_file() {
            return Err(CoreError::store_missing(&path));
        }

        let text = fs::read_to_string(&path)?;
        Descriptor::decode(&text)
    }

    /// Saves the descriptor to disk atomically.
    ///
    /// Uses write-then-rename:
    /// 1. Write to temporary file
    /// 2. Sync temporary file to disk
    /// 3. Rename temporary file over the descriptor
    /// 4. Fsync the directory so the rename is durable
    pub fn save_descriptor(&self, descriptor: &Descriptor) -> CoreResult<()> {
        let temp_path = self.with_ext(CONFIG_TEMP_EXT);

        let mut file = File::create(&temp_path)?;
        file.write_all(descriptor.encode().as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, self.config_path())?;
        self.sync_directory()?;

        Ok(())
    }

    /// Syncs the directory holding the store files.
    ///
    /// Windows NTFS journals metadata, so the explicit fsync is skipped there.
    #[cfg(unix)]
    fn sync_directory(&self) -> CoreResult<()> {
        let parent = match self.base.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        File::open(parent)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> CoreResult<()> {
        Ok(())
    }
}
