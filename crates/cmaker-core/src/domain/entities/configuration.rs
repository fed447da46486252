use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{
    error::DomainError,
    value_objects::{Wildcard, Wildcards},
};

/// Fully validated, closure-computed description of one generation run.
///
/// Produced by [`crate::domain::ConfigurationResolver`] and immutable
/// afterwards; it drives both materialization and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    pub(crate) name: String,
    pub(crate) language: String,
    pub(crate) standard: String,
    pub(crate) template: String,
    pub(crate) kind: String,
    pub(crate) ancestors: Vec<String>,
    pub(crate) features: Vec<String>,
}

impl ResolvedConfiguration {
    /// Project name; also the name of the directory that gets created.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn standard(&self) -> &str {
        &self.standard
    }

    /// Template type (`executable`, `library`, ...).
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Inherited kinds, least specific first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Final feature set: unique, in first-seen order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }

    /// Environment handed to the macro preprocessor.
    pub fn environment(&self) -> Environment {
        Environment::from_configuration(self)
    }

    /// Token table for the wildcard substitution phase.
    pub fn wildcards(&self) -> Result<Wildcards, DomainError> {
        Wildcards::new([
            (Wildcard::Project, self.name.clone()),
            (Wildcard::Language, self.language.clone()),
            (Wildcard::Standard, self.standard.clone()),
        ])
    }
}

impl fmt::Display for ResolvedConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}{} {}/{})",
            self.name, self.language, self.standard, self.template, self.kind
        )
    }
}

/// Variables visible to the macro preprocessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    variables: BTreeMap<String, String>,
}

impl Environment {
    pub const LANGUAGE: &'static str = "LANGUAGE";
    pub const STANDARD: &'static str = "STANDARD";
    pub const KIND: &'static str = "KIND";
    pub const MODE: &'static str = "MODE";
    pub const FEATURES: &'static str = "FEATURES";

    pub fn new() -> Self {
        Self::default()
    }

    /// `KIND` carries the template type and `MODE` the kind name.
    pub fn from_configuration(config: &ResolvedConfiguration) -> Self {
        Self::new()
            .with(Self::LANGUAGE, &config.language)
            .with(Self::STANDARD, &config.standard)
            .with(Self::KIND, &config.template)
            .with(Self::MODE, &config.kind)
            .with(Self::FEATURES, config.features.join(","))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}
