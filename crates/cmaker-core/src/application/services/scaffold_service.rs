//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the project name and resolve the selection
//! 2. Materialize template and feature fragments
//! 3. Render (preprocess, then substitute wildcards)
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ContentRenderer, Materializer,
        ports::{Filesystem, Preprocessor},
    },
    domain::{
        Catalog, ConfigurationResolver, DataRoot, DomainValidator as validator,
        ResolvedConfiguration, Selection, Template,
    },
    error::{CmakerError, CmakerResult},
};

/// Result of a successful scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffolded {
    pub configuration: ResolvedConfiguration,
    pub project_dir: PathBuf,
}

/// Main scaffolding service.
///
/// Resolution is pure; the filesystem and preprocessor are injected so the
/// whole workflow runs against in-memory adapters in tests.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    preprocessor: Box<dyn Preprocessor>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cmaker_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem,   // impl Filesystem
    ///     preprocessor, // impl Preprocessor
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, preprocessor: Box<dyn Preprocessor>) -> Self {
        Self {
            filesystem,
            preprocessor,
        }
    }

    /// Validate and resolve without touching the filesystem.
    pub fn resolve(
        &self,
        catalog: &Catalog,
        selection: &Selection,
    ) -> CmakerResult<ResolvedConfiguration> {
        validator::validate_selection(selection)?;
        Ok(ConfigurationResolver::new(catalog).resolve(selection)?)
    }

    /// Scaffold a new project at `destination/<selection.name>`.
    ///
    /// Nothing is written unless resolution succeeds. A failure after that
    /// point leaves the partially generated directory in place.
    #[instrument(
        skip_all,
        fields(
            selection = %selection,
            data_root = %data_root,
            destination = %destination.display()
        )
    )]
    pub fn scaffold(
        &self,
        catalog: &Catalog,
        selection: &Selection,
        data_root: &DataRoot,
        destination: &Path,
    ) -> CmakerResult<Scaffolded> {
        let configuration = self.resolve(catalog, selection)?;
        info!(configuration = %configuration, features = ?configuration.features(), "selection resolved");

        let template = template_of(catalog, &configuration)?;

        let project_dir = Materializer::new(self.filesystem.as_ref(), data_root)
            .materialize(template, &configuration, destination)?;

        if let Err(e) = ContentRenderer::new(self.filesystem.as_ref(), self.preprocessor.as_ref())
            .render(&project_dir, &configuration)
        {
            warn!(
                error = %e,
                path = %project_dir.display(),
                "Rendering failed, partially generated project left in place"
            );
            return Err(e);
        }

        info!(path = %project_dir.display(), "Scaffold completed successfully");
        Ok(Scaffolded {
            configuration,
            project_dir,
        })
    }
}

fn template_of<'c>(
    catalog: &'c Catalog,
    configuration: &ResolvedConfiguration,
) -> CmakerResult<&'c Template> {
    catalog
        .language(configuration.language())
        .and_then(|l| l.template(configuration.template()))
        .ok_or_else(|| CmakerError::Internal {
            message: format!("resolved template '{}' vanished from catalog", configuration.template()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockFilesystem, MockPreprocessor},
    };
    use crate::domain::{DomainError, Feature, Kind, Language};

    fn catalog() -> Catalog {
        Catalog::new(vec![Language::new("c++", [20, 23]).with_template(
            Template::new("executable").with_kind(
                Kind::new("common").with_feature(Feature::new("testing", true)),
            ),
        )])
    }

    fn untouched_filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().never();
        fs.expect_create_dir_all().never();
        fs.expect_copy_tree().never();
        fs.expect_write_file().never();
        fs
    }

    #[test]
    fn lookup_error_writes_nothing() {
        let service = ScaffoldService::new(
            Box::new(untouched_filesystem()),
            Box::new(MockPreprocessor::new()),
        );

        let err = service
            .scaffold(
                &catalog(),
                &Selection::builder("demo").feature("network").build(),
                &DataRoot::new("data"),
                Path::new("out"),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CmakerError::Domain(DomainError::UnknownFeature { .. })
        ));
    }

    #[test]
    fn invalid_project_name_writes_nothing() {
        let service = ScaffoldService::new(
            Box::new(untouched_filesystem()),
            Box::new(MockPreprocessor::new()),
        );

        let err = service
            .scaffold(
                &catalog(),
                &Selection::builder("../escape").build(),
                &DataRoot::new("data"),
                Path::new("out"),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CmakerError::Domain(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn existing_project_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_copy_tree().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockPreprocessor::new()));
        let err = service
            .scaffold(
                &catalog(),
                &Selection::builder("demo").build(),
                &DataRoot::new("data"),
                Path::new("out"),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CmakerError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn resolve_does_not_touch_the_filesystem() {
        let service = ScaffoldService::new(
            Box::new(untouched_filesystem()),
            Box::new(MockPreprocessor::new()),
        );

        let config = service
            .resolve(&catalog(), &Selection::builder("demo").standard(20).feature("testing").build())
            .unwrap();

        assert_eq!(config.standard(), "20");
        assert_eq!(config.features(), ["testing"]);
    }
}
