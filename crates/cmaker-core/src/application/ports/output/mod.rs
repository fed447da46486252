//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cmaker-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Environment;
use crate::error::CmakerResult;

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cmaker_adapters::filesystem::LocalFilesystem` (production)
/// - `cmaker_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Failures are reported as `ApplicationError::FilesystemError`; the services
/// re-tag them with the stage they happened in.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CmakerResult<()>;

    /// Recursively copy the contents of `from` into `to`, overwriting files
    /// that already exist at the same relative path.
    ///
    /// Returns `Ok(false)` without touching `to` when `from` does not exist.
    fn copy_tree(&self, from: &Path, to: &Path) -> CmakerResult<bool>;

    /// Immediate children of a directory, sorted by path.
    fn read_dir(&self, path: &Path) -> CmakerResult<Vec<DirEntry>>;

    /// Every regular file below `root`, recursively, sorted by path.
    fn files(&self, root: &Path) -> CmakerResult<Vec<PathBuf>>;

    /// Read a file as UTF-8 text; `Ok(None)` when the content is not text.
    fn read_text(&self, path: &Path) -> CmakerResult<Option<String>>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> CmakerResult<()>;

    /// Rename a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> CmakerResult<()>;
}

/// Failure reported by a [`Preprocessor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{message}", .line.map(|l| format!("line {l}: ")).unwrap_or_default())]
pub struct PreprocessError {
    /// 1-based line of the offending directive, when known.
    pub line: Option<usize>,
    pub message: String,
}

impl PreprocessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }

    pub fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }
}

/// Port for the macro preprocessor run over every materialized file.
///
/// Treated as a pure function of the text and the environment.
///
/// Implemented by:
/// - `cmaker_adapters::preprocessor::DirectivePreprocessor`
#[cfg_attr(test, mockall::automock)]
pub trait Preprocessor: Send + Sync {
    fn process(&self, source: &str, environment: &Environment) -> Result<String, PreprocessError>;
}
