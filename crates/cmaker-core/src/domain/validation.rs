use crate::domain::{
    entities::{Catalog, Selection},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_catalog(catalog: &Catalog) -> Result<(), DomainError> {
        catalog.validate()
    }

    /// The project name becomes a directory under the destination, so it must
    /// be a single plain path component.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let reason = if name.is_empty() {
            Some("name cannot be empty")
        } else if name == "." || name == ".." {
            Some("name cannot be '.' or '..'")
        } else if name.contains('/') || name.contains('\\') {
            Some("name cannot contain path separators")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidProjectName {
                name: name.to_owned(),
                reason: reason.to_owned(),
            }),
            None => Ok(()),
        }
    }

    pub fn validate_selection(selection: &Selection) -> Result<(), DomainError> {
        Self::validate_project_name(&selection.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        for name in ["demo", "my-app", "lib_x", "App2"] {
            assert!(DomainValidator::validate_project_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn path_like_names_fail() {
        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(
                matches!(
                    DomainValidator::validate_project_name(name),
                    Err(DomainError::InvalidProjectName { .. })
                ),
                "{name}"
            );
        }
    }
}
