// ============================================================================
// domain/error.rs - CATALOG AND RESOLUTION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside the application error)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Catalog Lookup Errors (404-level equivalent)
    // ========================================================================
    #[error("Language '{language}' is not available")]
    UnknownLanguage { language: String },

    #[error("Standard {standard} is not available for '{language}'")]
    UnsupportedStandard {
        language: String,
        standard: u32,
        available: Vec<u32>,
    },

    #[error("Template '{template}' could not be found for '{language}'")]
    UnknownTemplate { language: String, template: String },

    #[error("Kind '{kind}' is not available for template '{template}'")]
    UnknownKind { template: String, kind: String },

    #[error("Feature '{feature}' is not available for kind '{kind}'")]
    UnknownFeature { kind: String, feature: String },

    #[error("Feature '{feature}' requires '{requirement}', which kind '{kind}' does not provide")]
    UnknownRequirement {
        kind: String,
        feature: String,
        requirement: String,
    },

    #[error("Kind '{kind}' inherits '{parent}', which template '{template}' does not define")]
    UnknownParentKind {
        template: String,
        kind: String,
        parent: String,
    },

    // ========================================================================
    // Catalog Integrity Errors
    // ========================================================================
    #[error("Kind '{kind}' takes part in an inheritance cycle: {}", .path.join(" -> "))]
    InheritanceCycle { kind: String, path: Vec<String> },

    #[error("Template '{template}' declares kind '{kind}' more than once")]
    DuplicateKind { template: String, kind: String },

    #[error("Kind '{kind}' declares feature '{feature}' more than once")]
    DuplicateFeature { kind: String, feature: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Wildcard '{token}' cannot be replaced by '{value}', which contains the token itself")]
    SelfReferentialWildcard { token: &'static str, value: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownLanguage { .. } => vec![
                "List the available languages with: cmaker list".into(),
                "Select one with --lang".into(),
            ],
            Self::UnsupportedStandard {
                language,
                available,
                ..
            } => {
                let standards: Vec<String> = available.iter().map(u32::to_string).collect();
                vec![
                    format!("Standards available for {}: {}", language, standards.join(", ")),
                    "Select one with --std".into(),
                ]
            }
            Self::UnknownTemplate { language, .. } => vec![
                format!("List the templates for {} with: cmaker list --lang {}", language, language),
            ],
            Self::UnknownKind { template, .. } => vec![
                format!("List the kinds of '{}' with: cmaker list", template),
                "Select one with --kind".into(),
            ],
            Self::UnknownFeature { kind, .. } => vec![
                format!("Features are looked up on '{}' and every kind it inherits", kind),
                "List the available features with: cmaker list".into(),
            ],
            Self::UnknownRequirement { .. }
            | Self::UnknownParentKind { .. }
            | Self::InheritanceCycle { .. }
            | Self::DuplicateKind { .. }
            | Self::DuplicateFeature { .. } => vec![
                "The catalog (languages.json) is inconsistent".into(),
                "Fix the entry named above or reinstall the cmaker data files".into(),
            ],
            Self::SelfReferentialWildcard { .. } | Self::InvalidProjectName { .. } => {
                vec!["Choose a different project name".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownLanguage { .. }
            | Self::UnsupportedStandard { .. }
            | Self::UnknownTemplate { .. }
            | Self::UnknownKind { .. }
            | Self::UnknownFeature { .. }
            | Self::UnknownRequirement { .. } => ErrorCategory::NotFound,
            Self::UnknownParentKind { .. }
            | Self::InheritanceCycle { .. }
            | Self::DuplicateKind { .. }
            | Self::DuplicateFeature { .. } => ErrorCategory::Catalog,
            Self::SelfReferentialWildcard { .. } | Self::InvalidProjectName { .. } => {
                ErrorCategory::Validation
            }
        }
    }

    /// `true` for the lookup failures raised while validating a selection.
    pub fn is_lookup(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Catalog,
}
