//! Selection validation and feature-closure computation.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::{
    entities::{
        catalog::{Catalog, Feature, Kind},
        configuration::ResolvedConfiguration,
        selection::Selection,
    },
    error::DomainError,
    kind_graph::KindGraph,
};

/// Turns a [`Selection`] into a [`ResolvedConfiguration`].
///
/// Validation short-circuits in this order: language, standard, template,
/// kind, requested features. The feature set is then built from
///
/// 1. each requested feature followed by its `requires` closure,
/// 2. the selected kind's mandatory features and their closures,
/// 3. every ancestor's mandatory features and their closures,
///
/// keeping the first occurrence of each name. Re-resolving with the result
/// as the request yields the same set.
pub struct ConfigurationResolver<'c> {
    catalog: &'c Catalog,
}

impl<'c> ConfigurationResolver<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    #[instrument(skip_all, fields(selection = %selection))]
    pub fn resolve(&self, selection: &Selection) -> Result<ResolvedConfiguration, DomainError> {
        let language = self.catalog.language(&selection.language).ok_or_else(|| {
            DomainError::UnknownLanguage {
                language: selection.language.clone(),
            }
        })?;

        if !language.supports_standard(selection.standard) {
            return Err(DomainError::UnsupportedStandard {
                language: language.name.clone(),
                standard: selection.standard,
                available: language.standards.clone(),
            });
        }

        let template = language.template(&selection.template).ok_or_else(|| {
            DomainError::UnknownTemplate {
                language: language.name.clone(),
                template: selection.template.clone(),
            }
        })?;

        let graph = KindGraph::new(template);
        let kind = graph
            .kind(&selection.kind)
            .ok_or_else(|| DomainError::UnknownKind {
                template: template.name.clone(),
                kind: selection.kind.clone(),
            })?;
        let ancestry = graph.ancestry(&kind.name)?;

        // The selected kind first, then ancestors nearest-first.
        let scope = FeatureScope {
            kind,
            lineage: std::iter::once(kind).chain(ancestry.lookup.iter().copied()).collect(),
        };

        for requested in &selection.features {
            if scope.find(requested).is_none() {
                return Err(DomainError::UnknownFeature {
                    kind: kind.name.clone(),
                    feature: requested.clone(),
                });
            }
        }

        let mut closure = Closure::default();
        for requested in &selection.features {
            closure.collect(&scope, requested)?;
        }
        for feature in kind.mandatory_features() {
            closure.collect(&scope, &feature.name)?;
        }
        for ancestor in &ancestry.lookup {
            for feature in ancestor.mandatory_features() {
                closure.collect(&scope, &feature.name)?;
            }
        }

        debug!(features = ?closure.order, "feature set resolved");

        Ok(ResolvedConfiguration {
            name: selection.name.clone(),
            language: language.name.clone(),
            standard: selection.standard.to_string(),
            template: template.name.clone(),
            kind: kind.name.clone(),
            ancestors: ancestry.overlay.iter().map(|k| k.name.clone()).collect(),
            features: closure.order,
        })
    }
}

/// Kinds a feature name may resolve against.
struct FeatureScope<'a> {
    kind: &'a Kind,
    lineage: Vec<&'a Kind>,
}

impl<'a> FeatureScope<'a> {
    /// First match wins across the whole hierarchy.
    fn find(&self, name: &str) -> Option<&'a Feature> {
        self.lineage.iter().find_map(|k| k.feature(name))
    }
}

/// First-seen ordered set of feature names.
#[derive(Default)]
struct Closure {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl Closure {
    /// Add `name` then, depth-first, everything it requires.
    fn collect(&mut self, scope: &FeatureScope<'_>, name: &str) -> Result<(), DomainError> {
        if self.seen.contains(name) {
            return Ok(());
        }

        let feature = scope.find(name).ok_or_else(|| DomainError::UnknownFeature {
            kind: scope.kind.name.clone(),
            feature: name.to_owned(),
        })?;

        self.seen.insert(feature.name.clone());
        self.order.push(feature.name.clone());

        for requirement in feature.requirements() {
            if !self.seen.contains(requirement) && scope.find(requirement).is_none() {
                return Err(DomainError::UnknownRequirement {
                    kind: scope.kind.name.clone(),
                    feature: feature.name.clone(),
                    requirement: requirement.clone(),
                });
            }
            self.collect(scope, requirement)?;
        }
        Ok(())
    }
}
