//! Template Materializer - overlays fragments into a new project directory.
//!
//! Copy order, each step recursive and overwriting:
//! 1. `templates/<type>/<ancestor>` for every ancestor, least specific first
//! 2. `templates/<type>/<kind>`
//! 3. `features/<name>` for every mandatory or selected feature declared on
//!    an ancestor (same order as step 1)
//! 4. the same for features declared on the selected kind
//!
//! Later copies win at matching relative paths. Nothing is rolled back on
//! failure: whatever was copied before the error stays on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DataRoot, DomainError, Kind, ResolvedConfiguration, Template},
    error::{CmakerError, CmakerResult},
};

pub struct Materializer<'a> {
    filesystem: &'a dyn Filesystem,
    data_root: &'a DataRoot,
}

impl<'a> Materializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, data_root: &'a DataRoot) -> Self {
        Self {
            filesystem,
            data_root,
        }
    }

    /// Create `destination/<project name>` from the fragments selected by
    /// `config`, returning the project directory.
    ///
    /// `template` must be the catalog template `config` was resolved against.
    #[instrument(skip_all, fields(project = %config.name(), destination = %destination.display()))]
    pub fn materialize(
        &self,
        template: &Template,
        config: &ResolvedConfiguration,
        destination: &Path,
    ) -> CmakerResult<PathBuf> {
        let project = destination.join(config.name());
        if self.filesystem.exists(&project) {
            return Err(ApplicationError::ProjectExists { path: project }.into());
        }

        let ancestors = config
            .ancestors()
            .iter()
            .map(|name| lookup_kind(template, name))
            .collect::<Result<Vec<_>, _>>()?;
        let kind = lookup_kind(template, config.kind())?;

        self.filesystem.create_dir_all(&project)?;

        for ancestor in &ancestors {
            self.copy_kind_fragment(template, ancestor, &project)?;
        }
        self.copy_kind_fragment(template, kind, &project)?;

        for ancestor in &ancestors {
            self.copy_feature_fragments(ancestor, config, &project)?;
        }
        self.copy_feature_fragments(kind, config, &project)?;

        info!(path = %project.display(), "project materialized");
        Ok(project)
    }

    fn copy_kind_fragment(&self, template: &Template, kind: &Kind, project: &Path) -> CmakerResult<()> {
        let source = self.data_root.kind_dir(&template.name, &kind.name);
        if self.copy(&source, project)? {
            debug!(kind = %kind.name, "copied template fragment");
        } else {
            debug!(kind = %kind.name, path = %source.display(), "kind has no template fragment");
        }
        Ok(())
    }

    /// Copy `features/<name>` for each feature declared directly on `kind`
    /// that is mandatory or part of the resolved set.
    fn copy_feature_fragments(
        &self,
        kind: &Kind,
        config: &ResolvedConfiguration,
        project: &Path,
    ) -> CmakerResult<()> {
        let wanted = kind
            .declared_features()
            .iter()
            .filter(|f| f.is_mandatory() || config.has_feature(&f.name));

        for feature in wanted {
            let source = self.data_root.feature_dir(&feature.name);
            // Checked up front so a missing fragment never leaves half a copy.
            if !self.filesystem.is_dir(&source) {
                return Err(ApplicationError::MissingFeatureAssets {
                    feature: feature.name.clone(),
                    path: source,
                }
                .into());
            }

            self.copy(&source, project)?;
            debug!(feature = %feature.name, kind = %kind.name, "copied feature fragment");
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> CmakerResult<bool> {
        self.filesystem
            .copy_tree(from, to)
            .map_err(|e| match e {
                CmakerError::Application(ApplicationError::FilesystemError { reason, .. }) => {
                    ApplicationError::CopyFailed {
                        from: from.to_path_buf(),
                        to: to.to_path_buf(),
                        reason,
                    }
                    .into()
                }
                other => other,
            })
    }
}

fn lookup_kind<'t>(template: &'t Template, name: &str) -> Result<&'t Kind, DomainError> {
    template.kind(name).ok_or_else(|| DomainError::UnknownKind {
        template: template.name.clone(),
        kind: name.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    use crate::application::ports::MockFilesystem;
    use crate::domain::{Catalog, ConfigurationResolver, Feature, Language, Selection};

    fn catalog() -> Catalog {
        Catalog::new(vec![Language::new("c++", [23]).with_template(
            Template::new("executable")
                .with_kind(Kind::new("common").with_feature(Feature::new("formatting", false)))
                .with_kind(
                    Kind::new("gui")
                        .inheriting(["common"])
                        .with_feature(Feature::new("themes", true)),
                ),
        )])
    }

    #[test]
    fn existing_project_fails_before_any_copy() {
        let catalog = catalog();
        let config = ConfigurationResolver::new(&catalog)
            .resolve(&Selection::builder("demo").build())
            .unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("out/demo"))
            .return_const(true);
        fs.expect_copy_tree().never();
        fs.expect_create_dir_all().never();

        let root = DataRoot::new("data");
        let err = Materializer::new(&fs, &root)
            .materialize(&catalog.languages[0].templates[0], &config, Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            CmakerError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn copy_failure_names_both_paths() {
        let catalog = catalog();
        let config = ConfigurationResolver::new(&catalog)
            .resolve(&Selection::builder("demo").build())
            .unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_copy_tree().returning(|from, _| {
            Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let root = DataRoot::new("data");
        let err = Materializer::new(&fs, &root)
            .materialize(&catalog.languages[0].templates[0], &config, Path::new("out"))
            .unwrap_err();

        match err {
            CmakerError::Application(ApplicationError::CopyFailed { from, to, reason }) => {
                assert_eq!(from, Path::new("data/templates/executable/common"));
                assert_eq!(to, Path::new("out/demo"));
                assert_eq!(reason, "permission denied");
            }
            other => panic!("expected CopyFailed, got {other:?}"),
        }
    }

    #[test]
    fn fragments_follow_overlay_order_across_a_diamond() {
        let catalog = Catalog::new(vec![Language::new("c++", [23]).with_template(
            Template::new("library")
                .with_kind(Kind::new("common").with_feature(Feature::new("formatting", false)))
                .with_kind(
                    Kind::new("static")
                        .inheriting(["common"])
                        .with_feature(Feature::new("pic", false)),
                )
                .with_kind(
                    Kind::new("shared")
                        .inheriting(["common"])
                        .with_feature(Feature::new("docs", true)),
                )
                .with_kind(
                    Kind::new("both")
                        .inheriting(["static", "shared"])
                        .with_feature(Feature::new("bundle", false))
                        .with_feature(Feature::new("testing", true)),
                ),
        )]);
        let config = ConfigurationResolver::new(&catalog)
            .resolve(
                &Selection::builder("demo")
                    .language("c++")
                    .standard(23)
                    .template("library")
                    .kind("both")
                    .feature("testing")
                    .build(),
            )
            .unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));

        // Kinds least specific first with `common` once, then features by
        // declaring kind in the same order. `docs` is optional and unselected.
        let expected = [
            "data/templates/library/common",
            "data/templates/library/static",
            "data/templates/library/shared",
            "data/templates/library/both",
            "data/features/formatting",
            "data/features/pic",
            "data/features/bundle",
            "data/features/testing",
        ];
        let mut seq = Sequence::new();
        for source in expected {
            fs.expect_copy_tree()
                .withf(move |from, to| from == Path::new(source) && to == Path::new("out/demo"))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(true));
        }

        let root = DataRoot::new("data");
        let project = Materializer::new(&fs, &root)
            .materialize(&catalog.languages[0].templates[0], &config, Path::new("out"))
            .unwrap();

        assert_eq!(project, Path::new("out/demo"));
    }

    #[test]
    fn missing_feature_fragment_is_reported() {
        let catalog = catalog();
        let config = ConfigurationResolver::new(&catalog)
            .resolve(&Selection::builder("demo").build())
            .unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_copy_tree().returning(|_, _| Ok(true));
        fs.expect_is_dir().return_const(false);

        let root = DataRoot::new("data");
        let err = Materializer::new(&fs, &root)
            .materialize(&catalog.languages[0].templates[0], &config, Path::new("out"))
            .unwrap_err();

        assert!(matches!(
            err,
            CmakerError::Application(ApplicationError::MissingFeatureAssets { feature, .. })
                if feature == "formatting"
        ));
    }
}
