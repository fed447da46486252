//! Content Renderer - rewrites a materialized project in place.
//!
//! Two phases, strictly in this order:
//!
//! 1. **Preprocessing**: every text file is run through the [`Preprocessor`]
//!    with the configuration's [`Environment`] and overwritten with the result.
//! 2. **Wildcard substitution**: entries whose name contains a token are
//!    renamed (children before their directory), then tokens in file contents
//!    are replaced.
//!
//! Files that are not valid UTF-8 are left untouched by both phases.

use std::path::Path;

use tracing::{debug, info, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Preprocessor},
    },
    domain::{Environment, ResolvedConfiguration, Wildcards},
    error::{CmakerError, CmakerResult},
};

pub struct ContentRenderer<'a> {
    filesystem: &'a dyn Filesystem,
    preprocessor: &'a dyn Preprocessor,
}

impl<'a> ContentRenderer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, preprocessor: &'a dyn Preprocessor) -> Self {
        Self {
            filesystem,
            preprocessor,
        }
    }

    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn render(&self, project: &Path, config: &ResolvedConfiguration) -> CmakerResult<()> {
        // Fail on an unusable token table before anything is rewritten.
        let wildcards = config.wildcards()?;

        self.preprocess(project, &config.environment())?;
        self.rename_entries(project, &wildcards)?;
        self.substitute_contents(project, &wildcards)?;

        info!("project rendered");
        Ok(())
    }

    /// Phase 1.
    pub fn preprocess(&self, project: &Path, environment: &Environment) -> CmakerResult<()> {
        for path in self.filesystem.files(project)? {
            let Some(source) = self.filesystem.read_text(&path)? else {
                trace!(path = %path.display(), "skipping binary file");
                continue;
            };

            let output = self
                .preprocessor
                .process(&source, environment)
                .map_err(|source| ApplicationError::PreprocessingFailed {
                    path: path.clone(),
                    source,
                })?;

            if output != source {
                self.filesystem.write_file(&path, &output)?;
                debug!(path = %path.display(), "preprocessed");
            }
        }
        Ok(())
    }

    /// Phase 2a: rename every entry below `dir` whose name contains a token.
    ///
    /// A directory's children are handled before the directory itself, so
    /// paths collected from a listing stay valid until they are used.
    pub fn rename_entries(&self, dir: &Path, wildcards: &Wildcards) -> CmakerResult<()> {
        let entries = self
            .filesystem
            .read_dir(dir)
            .map_err(|e| substitution_failed(dir, e))?;

        for entry in entries {
            if entry.is_dir {
                self.rename_entries(&entry.path, wildcards)?;
            }

            let Some(name) = entry.path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !wildcards.matches(name) {
                continue;
            }

            let renamed = entry.path.with_file_name(wildcards.apply(name));
            self.filesystem
                .rename(&entry.path, &renamed)
                .map_err(|e| substitution_failed(&entry.path, e))?;
            debug!(from = %entry.path.display(), to = %renamed.display(), "renamed");
        }
        Ok(())
    }

    /// Phase 2b: replace tokens inside every text file below `project`.
    pub fn substitute_contents(&self, project: &Path, wildcards: &Wildcards) -> CmakerResult<()> {
        let files = self
            .filesystem
            .files(project)
            .map_err(|e| substitution_failed(project, e))?;

        for path in files {
            let text = self
                .filesystem
                .read_text(&path)
                .map_err(|e| substitution_failed(&path, e))?;
            let Some(text) = text else { continue };

            if wildcards.matches(&text) {
                self.filesystem
                    .write_file(&path, &wildcards.apply(&text))
                    .map_err(|e| substitution_failed(&path, e))?;
                debug!(path = %path.display(), "substituted");
            }
        }
        Ok(())
    }
}

/// Re-tag a port failure as belonging to the substitution phase.
fn substitution_failed(path: &Path, err: CmakerError) -> CmakerError {
    match err {
        CmakerError::Application(ApplicationError::FilesystemError { reason, .. }) => {
            ApplicationError::SubstitutionFailed {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::{DirEntry, MockFilesystem, MockPreprocessor, PreprocessError};
    use crate::domain::{Catalog, ConfigurationResolver, Kind, Language, Selection, Template};
    use mockall::Sequence;

    fn config(name: &str) -> ResolvedConfiguration {
        let catalog = Catalog::new(vec![Language::new("c", [11, 17]).with_template(
            Template::new("executable").with_kind(Kind::new("common")),
        )]);
        ConfigurationResolver::new(&catalog)
            .resolve(&Selection::builder(name).language("c").standard(11).build())
            .unwrap()
    }

    #[test]
    fn preprocessor_sees_environment_and_output_is_written() {
        let mut fs = MockFilesystem::new();
        fs.expect_files()
            .returning(|_| Ok(vec![PathBuf::from("/p/install.py")]));
        fs.expect_read_text()
            .returning(|_| Ok(Some("%IF ...\nbody\n%END\n".into())));
        fs.expect_write_file()
            .withf(|path, content| path == Path::new("/p/install.py") && content == "body\n")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut pre = MockPreprocessor::new();
        pre.expect_process()
            .withf(|_, env| env.get("LANGUAGE") == Some("c") && env.get("STANDARD") == Some("11"))
            .returning(|_, _| Ok("body\n".into()));

        ContentRenderer::new(&fs, &pre)
            .preprocess(Path::new("/p"), &config("demo").environment())
            .unwrap();
    }

    #[test]
    fn binary_files_are_skipped() {
        let mut fs = MockFilesystem::new();
        fs.expect_files()
            .returning(|_| Ok(vec![PathBuf::from("/p/logo.png")]));
        fs.expect_read_text().returning(|_| Ok(None));
        fs.expect_write_file().never();

        let mut pre = MockPreprocessor::new();
        pre.expect_process().never();

        ContentRenderer::new(&fs, &pre)
            .preprocess(Path::new("/p"), &Environment::new())
            .unwrap();
    }

    #[test]
    fn preprocessor_failure_names_the_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_files()
            .returning(|_| Ok(vec![PathBuf::from("/p/CMakeLists.txt")]));
        fs.expect_read_text().returning(|_| Ok(Some("%END\n".into())));

        let mut pre = MockPreprocessor::new();
        pre.expect_process()
            .returning(|_, _| Err(PreprocessError::at(1, "unexpected %END")));

        let err = ContentRenderer::new(&fs, &pre)
            .preprocess(Path::new("/p"), &Environment::new())
            .unwrap_err();

        match err {
            CmakerError::Application(ApplicationError::PreprocessingFailed { path, source }) => {
                assert_eq!(path, Path::new("/p/CMakeLists.txt"));
                assert_eq!(source.line, Some(1));
            }
            other => panic!("expected PreprocessingFailed, got {other:?}"),
        }
    }

    #[test]
    fn children_are_renamed_before_their_directory() {
        let wildcards = config("demo").wildcards().unwrap();
        let mut seq = Sequence::new();

        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .withf(|p| p == Path::new("/p"))
            .returning(|_| Ok(vec![DirEntry::dir("/p/!PROJECT!")]));
        fs.expect_read_dir()
            .withf(|p| p == Path::new("/p/!PROJECT!"))
            .returning(|_| Ok(vec![DirEntry::file("/p/!PROJECT!/!PROJECT!.c")]));
        fs.expect_rename()
            .withf(|from, to| {
                from == Path::new("/p/!PROJECT!/!PROJECT!.c") && to == Path::new("/p/!PROJECT!/demo.c")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .withf(|from, to| from == Path::new("/p/!PROJECT!") && to == Path::new("/p/demo"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let pre = MockPreprocessor::new();
        ContentRenderer::new(&fs, &pre)
            .rename_entries(Path::new("/p"), &wildcards)
            .unwrap();
    }

    #[test]
    fn one_rename_covers_several_tokens() {
        let wildcards = config("demo").wildcards().unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::file("/p/!PROJECT!-!LANGUAGE!!STANDARD!.txt")]));
        fs.expect_rename()
            .withf(|_, to| to == Path::new("/p/demo-c11.txt"))
            .times(1)
            .returning(|_, _| Ok(()));

        let pre = MockPreprocessor::new();
        ContentRenderer::new(&fs, &pre)
            .rename_entries(Path::new("/p"), &wildcards)
            .unwrap();
    }

    #[test]
    fn contents_without_tokens_are_not_rewritten() {
        let wildcards = config("demo").wildcards().unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_files().returning(|_| {
            Ok(vec![PathBuf::from("/p/a.txt"), PathBuf::from("/p/b.txt")])
        });
        fs.expect_read_text()
            .withf(|p| p == Path::new("/p/a.txt"))
            .returning(|_| Ok(Some("project(!PROJECT! C)".into())));
        fs.expect_read_text()
            .withf(|p| p == Path::new("/p/b.txt"))
            .returning(|_| Ok(Some("nothing here".into())));
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("/p/a.txt") && c == "project(demo C)")
            .times(1)
            .returning(|_, _| Ok(()));

        let pre = MockPreprocessor::new();
        ContentRenderer::new(&fs, &pre)
            .substitute_contents(Path::new("/p"), &wildcards)
            .unwrap();
    }

    #[test]
    fn rename_failure_is_a_substitution_error() {
        let wildcards = config("demo").wildcards().unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::file("/p/!PROJECT!.c")]));
        fs.expect_rename().returning(|from, _| {
            Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });

        let pre = MockPreprocessor::new();
        let err = ContentRenderer::new(&fs, &pre)
            .rename_entries(Path::new("/p"), &wildcards)
            .unwrap_err();

        assert!(matches!(
            err,
            CmakerError::Application(ApplicationError::SubstitutionFailed { ref reason, .. })
                if reason == "read-only"
        ));
    }

    #[test]
    fn self_referential_name_is_rejected_before_rendering() {
        let mut fs = MockFilesystem::new();
        fs.expect_files().never();
        fs.expect_read_dir().never();
        let pre = MockPreprocessor::new();

        let err = ContentRenderer::new(&fs, &pre)
            .render(Path::new("/p"), &config("x!PROJECT!"))
            .unwrap_err();

        assert!(matches!(err, CmakerError::Domain(_)));
    }
}
