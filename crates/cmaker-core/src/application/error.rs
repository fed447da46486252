//! Application layer errors.
//!
//! These errors represent failures while materializing or rendering a
//! project, not catalog lookups. Lookup errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ports::PreprocessError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The catalog file could not be read or parsed.
    #[error("Catalog unavailable at {}: {reason}", .path.display())]
    CatalogUnavailable { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project \"{}\" already exists", .path.display())]
    ProjectExists { path: PathBuf },

    /// A selected or mandatory feature has no fragment directory.
    #[error("Could not find feature \"{feature}\" (expected {})", .path.display())]
    MissingFeatureAssets { feature: String, path: PathBuf },

    /// Copying a template or feature fragment failed.
    #[error("Failed to copy {} into {}: {reason}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// The macro preprocessor rejected a file.
    #[error("Preprocessing failed for {}: {source}", .path.display())]
    PreprocessingFailed {
        path: PathBuf,
        #[source]
        source: PreprocessError,
    },

    /// Renaming or rewriting a file during wildcard substitution failed.
    #[error("Wildcard substitution failed for {}: {reason}", .path.display())]
    SubstitutionFailed { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state is unavailable")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CatalogUnavailable { path, .. } => vec![
                format!("Expected the catalog at: {}", path.display()),
                "Point --data-dir (or CMAKER_DATA_DIR) at a cmaker data directory".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove it first: rm -rf {}", path.display()),
            ],
            Self::MissingFeatureAssets { feature, .. } => vec![
                format!("The data directory has no fragment for '{}'", feature),
                "Reinstall the cmaker data files or drop the feature".into(),
                "A partially created project directory may be left behind".into(),
            ],
            Self::CopyFailed { to, .. } | Self::SubstitutionFailed { path: to, .. } => vec![
                format!("Check that you can write to: {}", to.display()),
                "A partially created project directory may be left behind".into(),
            ],
            Self::PreprocessingFailed { path, .. } => vec![
                format!("Fix the directive in the fragment that produced {}", path.display()),
                "A partially created project directory may be left behind".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogUnavailable { .. } => ErrorCategory::Configuration,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::MissingFeatureAssets { .. } => ErrorCategory::NotFound,
            Self::CopyFailed { .. }
            | Self::PreprocessingFailed { .. }
            | Self::SubstitutionFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
