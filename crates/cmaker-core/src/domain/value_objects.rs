//! Value objects: wildcard tokens and the data-root layout.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

// ============================================================================
// Wildcards
// ============================================================================

/// Fixed literal tokens rewritten in file names and file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wildcard {
    Project,
    Language,
    Standard,
}

impl Wildcard {
    pub const ALL: [Wildcard; 3] = [Self::Project, Self::Language, Self::Standard];

    pub const fn token(self) -> &'static str {
        match self {
            Self::Project => "!PROJECT!",
            Self::Language => "!LANGUAGE!",
            Self::Standard => "!STANDARD!",
        }
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Replace `token` with `value` until no occurrence is left.
///
/// Each pass replaces the left-most occurrence and rescans from the start,
/// since a replacement can complete a new occurrence across its boundary.
/// Callers must ensure `value` does not contain `token`; [`Wildcards::new`]
/// enforces this for the fixed tokens.
pub fn replace_until_absent(text: &str, token: &str, value: &str) -> String {
    if token.is_empty() {
        return text.to_owned();
    }

    let mut out = text.to_owned();
    while let Some(start) = out.find(token) {
        out.replace_range(start..start + token.len(), value);
    }
    out
}

/// Ordered token → value table applied by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcards {
    entries: Vec<(Wildcard, String)>,
}

impl Wildcards {
    /// Build the table, rejecting values that contain their own token
    /// (the rewrite loop would never terminate).
    pub fn new(entries: impl IntoIterator<Item = (Wildcard, String)>) -> Result<Self, DomainError> {
        let mut table: Vec<(Wildcard, String)> = entries.into_iter().collect();
        table.sort_by_key(|(wildcard, _)| *wildcard);

        if let Some((wildcard, value)) = table
            .iter()
            .find(|(wildcard, value)| value.contains(wildcard.token()))
        {
            return Err(DomainError::SelfReferentialWildcard {
                token: wildcard.token(),
                value: value.clone(),
            });
        }

        Ok(Self { entries: table })
    }

    /// `true` when any token occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.entries
            .iter()
            .any(|(wildcard, _)| text.contains(wildcard.token()))
    }

    /// Apply every token in order.
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_owned(), |acc, (wildcard, value)| {
                replace_until_absent(&acc, wildcard.token(), value)
            })
    }
}

// ============================================================================
// Data root
// ============================================================================

/// Layout of the directory holding the catalog and every fragment:
///
/// ```text
/// <data-root>/
/// ├── languages.json
/// ├── templates/<template>/<kind>/**
/// └── features/<feature>/**
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot(PathBuf);

impl DataRoot {
    pub const CATALOG_FILE: &'static str = "languages.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.0.join(Self::CATALOG_FILE)
    }

    pub fn templates_root(&self) -> PathBuf {
        self.0.join("templates")
    }

    pub fn features_root(&self) -> PathBuf {
        self.0.join("features")
    }

    /// `templates/<template>/<kind>`
    pub fn kind_dir(&self, template: &str, kind: &str) -> PathBuf {
        self.templates_root().join(template).join(kind)
    }

    /// `features/<feature>`
    pub fn feature_dir(&self, feature: &str) -> PathBuf {
        self.features_root().join(feature)
    }
}

impl AsRef<Path> for DataRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DataRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
