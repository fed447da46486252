//! Catalog Service - read-only views over the loaded catalog.

use serde::Serialize;
use tracing::warn;

use crate::{
    domain::{Catalog, DomainError, KindGraph},
    error::CmakerResult,
};

/// One selectable `language / template / kind` combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    pub language: String,
    pub standards: Vec<u32>,
    pub template: String,
    pub kind: String,
    pub inherits: Vec<String>,
    /// Features selectable for this kind, own declarations first.
    pub features: Vec<FeatureInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub name: String,
    pub mandatory: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    /// Kind that declares the feature when it is inherited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}

pub struct CatalogService<'c> {
    catalog: &'c Catalog,
}

impl<'c> CatalogService<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Flat listing in catalog order, optionally restricted to one language.
    ///
    /// Kinds whose inheritance cannot be walked (a cycle or an undefined
    /// parent) are left out with a warning; the rest are still listed.
    pub fn kinds(&self, language: Option<&str>) -> CmakerResult<Vec<KindInfo>> {
        if let Some(name) = language {
            if self.catalog.language(name).is_none() {
                return Err(DomainError::UnknownLanguage {
                    language: name.to_owned(),
                }
                .into());
            }
        }

        let mut rows = Vec::new();
        for lang in self
            .catalog
            .languages
            .iter()
            .filter(|l| language.is_none_or(|name| l.name == name))
        {
            for template in &lang.templates {
                let graph = KindGraph::new(template);
                for kind in &template.kinds {
                    let ancestry = match graph.ancestry(&kind.name) {
                        Ok(ancestry) => ancestry,
                        Err(err) => {
                            warn!(
                                language = %lang.name,
                                template = %template.name,
                                kind = %kind.name,
                                error = %err,
                                "skipping kind with broken inheritance"
                            );
                            continue;
                        }
                    };

                    let own = kind.declared_features().iter().map(|f| (f, None));
                    let inherited = ancestry.lookup.iter().flat_map(|ancestor| {
                        ancestor
                            .declared_features()
                            .iter()
                            .map(move |f| (f, Some(ancestor.name.clone())))
                    });

                    let mut features: Vec<FeatureInfo> = Vec::new();
                    for (feature, inherited_from) in own.chain(inherited) {
                        if features.iter().any(|f| f.name == feature.name) {
                            continue;
                        }
                        features.push(FeatureInfo {
                            name: feature.name.clone(),
                            mandatory: feature.is_mandatory(),
                            requires: feature.requirements().to_vec(),
                            inherited_from,
                        });
                    }

                    rows.push(KindInfo {
                        language: lang.name.clone(),
                        standards: lang.standards.clone(),
                        template: template.name.clone(),
                        kind: kind.name.clone(),
                        inherits: kind.parents().to_vec(),
                        features,
                    });
                }
            }
        }
        Ok(rows)
    }
}
