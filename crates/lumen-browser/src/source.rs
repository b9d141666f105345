//! Reading sources from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pipeline::PipelineInput;

/// Error type for source loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The markup file could not be read.
    #[error("failed to read markup from '{}'", path.display())]
    Markup {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The stylesheet file could not be read.
    #[error("failed to read stylesheet from '{}'", path.display())]
    Stylesheet {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Read a markup file.
///
/// # Errors
///
/// Returns [`LoadError::Markup`] if the file cannot be read as UTF-8 text.
pub fn load_markup(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::Markup {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a stylesheet file.
///
/// # Errors
///
/// Returns [`LoadError::Stylesheet`] if the file cannot be read as UTF-8
/// text.
pub fn load_stylesheet(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::Stylesheet {
        path: path.to_path_buf(),
        source,
    })
}

impl PipelineInput {
    /// Input read from a markup file and an optional stylesheet file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming whichever file could not be read.
    pub fn from_files(
        markup: impl AsRef<Path>,
        stylesheet: Option<&Path>,
    ) -> Result<Self, LoadError> {
        let mut input = Self::new(load_markup(markup)?);
        if let Some(path) = stylesheet {
            input.stylesheet = load_stylesheet(path)?;
        }
        Ok(input)
    }
}
