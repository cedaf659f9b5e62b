//! Persistence for the [`Directory`].
//!
//! The whole directory is read at startup and rewritten after every
//! successful change. There are no incremental writes.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    storage::Directory,
    terminal::{Colorize, Console},
};

/// Somewhere a [`Directory`] can be loaded from and saved to.
pub trait Store {
    /// Loads the full directory.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read or parsed.
    fn load(&self) -> Result<Directory, StoreError>;

    /// Replaces the stored data with the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written.
    fn save(&self, directory: &Directory) -> Result<(), StoreError>;
}

/// Errors reading or writing the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file is not a valid directory document.
    #[error("malformed data in {}: {source}", path.display())]
    Malformed {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}

/// A [`Store`] backed by a single pretty-printed JSON file.
///
/// The file holds an object mapping each name to `[email, phone, age]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store for the file at `path`. The file need not exist yet.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, directory: &Directory) -> io::Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, directory)?;
        writeln!(writer)?;
        writer.flush()
    }
}

impl Store for JsonStore {
    fn load(&self) -> Result<Directory, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No data at {}, starting empty", self.path.display());
                return Ok(Directory::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let directory: Directory =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                StoreError::Malformed {
                    path: self.path.clone(),
                    source,
                }
            })?;

        tracing::debug!(
            "Loaded {} record(s) from {}",
            directory.len(),
            self.path.display()
        );
        Ok(directory)
    }

    fn save(&self, directory: &Directory) -> Result<(), StoreError> {
        self.write(directory).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "Saved {} record(s) to {}",
            directory.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Loads the saved directory, falling back to an empty one if the file is
/// unreadable or malformed. The outcome is reported on `console`.
///
/// # Errors
///
/// Returns an error only if the terminal itself fails.
#[instrument(skip_all)]
pub fn load_or_empty(store: &JsonStore, console: &mut impl Console) -> io::Result<Directory> {
    match store.load() {
        Ok(directory) => {
            if store.path().exists() {
                console.print(
                    &format!(
                        "✓ {} person(s) loaded from {}",
                        directory.len(),
                        store.path().display()
                    )
                    .success(),
                )?;
            }
            Ok(directory)
        }
        Err(e) => {
            tracing::debug!("{e}");
            console.print(&format!("✗ Could not load saved data: {e}").error())?;
            console.print(&"Starting with an empty directory.".warning())?;
            Ok(Directory::new())
        }
    }
}
