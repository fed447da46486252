//! Catalog model: Language → Template → Kind → Feature.
//!
//! The catalog is deserialized verbatim from `languages.json` and never
//! mutated afterwards. `requires` and `inherits` are kept as raw names; they
//! are resolved against the kind hierarchy only when a selection is resolved.
//!
//! Optional collections stay `Option` so that an absent key ("none declared")
//! is distinguishable from an explicitly empty list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// An optional or mandatory addition to a [`Kind`], backed by a
/// `features/<name>` fragment directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<String>>,
}

impl Feature {
    pub fn new(name: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            optional,
            requires: None,
        }
    }

    /// Builder-style helper to declare requirements.
    pub fn requiring<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub const fn is_mandatory(&self) -> bool {
        !self.optional
    }

    /// Names this feature requires, empty when none are declared.
    pub fn requirements(&self) -> &[String] {
        self.requires.as_deref().unwrap_or_default()
    }
}

/// A named project archetype within a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<Vec<String>>,
}

impl Kind {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: None,
            inherits: None,
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.get_or_insert_with(Vec::new).push(feature);
        self
    }

    pub fn inheriting<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inherits = Some(parents.into_iter().map(Into::into).collect());
        self
    }

    /// Features declared directly on this kind.
    pub fn declared_features(&self) -> &[Feature] {
        self.features.as_deref().unwrap_or_default()
    }

    /// Names of the kinds this kind inherits from, in declaration order.
    pub fn parents(&self) -> &[String] {
        self.inherits.as_deref().unwrap_or_default()
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.declared_features().iter().find(|f| f.name == name)
    }

    pub fn mandatory_features(&self) -> impl Iterator<Item = &Feature> {
        self.declared_features().iter().filter(|f| f.is_mandatory())
    }
}

/// A project template (`executable`, `library`, ...) holding its kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub kinds: Vec<Kind>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kinds: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn kind(&self, name: &str) -> Option<&Kind> {
        self.kinds.iter().find(|k| k.name == name)
    }

    /// Enforce unique kind names, and unique feature names within each kind.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut kinds = HashSet::new();
        for kind in &self.kinds {
            if !kinds.insert(kind.name.as_str()) {
                return Err(DomainError::DuplicateKind {
                    template: self.name.clone(),
                    kind: kind.name.clone(),
                });
            }

            let mut features = HashSet::new();
            for feature in kind.declared_features() {
                if !features.insert(feature.name.as_str()) {
                    return Err(DomainError::DuplicateFeature {
                        kind: kind.name.clone(),
                        feature: feature.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A top-level catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub standards: Vec<u32>,
    pub templates: Vec<Template>,
}

impl Language {
    pub fn new(name: impl Into<String>, standards: impl Into<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            standards: standards.into(),
            templates: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn supports_standard(&self, standard: u32) -> bool {
        self.standards.contains(&standard)
    }
}

/// Every language known for one run. Loaded once, read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub languages: Vec<Language>,
}

impl Catalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.name == name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.languages
            .iter()
            .flat_map(|l| &l.templates)
            .try_for_each(Template::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Language::new("c++", [20, 23]).with_template(
                Template::new("executable")
                    .with_kind(Kind::new("common").with_feature(Feature::new("testing", true))),
            ),
        ])
    }

    #[test]
    fn lookups_are_exact_and_case_sensitive() {
        let catalog = sample();
        assert!(catalog.language("c++").is_some());
        assert!(catalog.language("C++").is_none());
        assert!(catalog.language("c").is_none());

        let lang = catalog.language("c++").unwrap();
        assert!(lang.supports_standard(23));
        assert!(!lang.supports_standard(17));
        assert!(lang.template("exec").is_none());

        let kind = lang.template("executable").unwrap().kind("common").unwrap();
        assert!(kind.feature("testing").is_some());
        assert!(kind.feature("Testing").is_none());
    }

    #[test]
    fn absent_keys_deserialize_to_none() {
        let json = r#"{ "name": "common", "features": [ { "name": "a", "optional": true } ] }"#;
        let kind: Kind = serde_json::from_str(json).unwrap();

        assert!(kind.inherits.is_none());
        assert!(kind.declared_features()[0].requires.is_none());
        assert!(kind.parents().is_empty());
    }

    #[test]
    fn empty_lists_are_preserved() {
        let json = r#"{ "name": "k", "features": [], "inherits": [] }"#;
        let kind: Kind = serde_json::from_str(json).unwrap();

        assert_eq!(kind.features, Some(vec![]));
        assert_eq!(kind.inherits, Some(vec![]));
    }

    #[test]
    fn mandatory_features_filter_optional_ones() {
        let kind = Kind::new("k")
            .with_feature(Feature::new("a", true))
            .with_feature(Feature::new("b", false))
            .with_feature(Feature::new("c", false));

        let names: Vec<_> = kind.mandatory_features().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    #[test]
    fn duplicate_kind_is_rejected() {
        let template = Template::new("executable")
            .with_kind(Kind::new("common"))
            .with_kind(Kind::new("common"));

        assert!(matches!(
            template.validate(),
            Err(DomainError::DuplicateKind { .. })
        ));
    }

    #[test]
    fn duplicate_feature_is_rejected() {
        let catalog = Catalog::new(vec![Language::new("c", [11]).with_template(
            Template::new("library").with_kind(
                Kind::new("static")
                    .with_feature(Feature::new("x", true))
                    .with_feature(Feature::new("x", false)),
            ),
        )]);

        assert!(matches!(
            catalog.validate(),
            Err(DomainError::DuplicateFeature { .. })
        ));
    }
}
