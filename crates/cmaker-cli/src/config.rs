//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables prefixed with `CMAKER_` (`CMAKER_DEFAULTS__KIND=gui`)
//! 3. Config file (`--config FILE`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use cmaker_core::domain::DataRoot;
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Directory holding the catalog and fragments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Values `cmaker new` falls back to when a flag is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    pub language: String,
    pub template: String,
    pub kind: String,
    pub standard: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                language: "c++".into(),
                template: "executable".into(),
                kind: "common".into(),
                standard: 23,
            },
            output: OutputConfig::default(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("CMAKER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cmaker.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "cmaker")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cmaker.toml"))
    }

    /// Pick the data root: the `--data-dir` flag, then `data_dir` from the
    /// config layers, then the in-repo `resources/` for debug builds, then
    /// the platform data dir (`$XDG_DATA_HOME/cmaker` on Linux).
    pub fn data_root(&self, flag: Option<&Path>) -> CliResult<DataRoot> {
        if let Some(dir) = flag.or(self.data_dir.as_deref()) {
            return Ok(DataRoot::new(dir));
        }

        if cfg!(debug_assertions) {
            let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../resources");
            if bundled.is_dir() {
                return Ok(DataRoot::new(bundled));
            }
        }

        ProjectDirs::from("", "", "cmaker")
            .map(|d| DataRoot::new(d.data_dir()))
            .ok_or_else(|| CliError::ConfigError {
                message: "cannot determine a data directory; pass --data-dir".into(),
                source: None,
            })
    }

    /// Look up a dotted key such as `defaults.kind`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.language" => self.defaults.language.clone(),
            "defaults.template" => self.defaults.template.clone(),
            "defaults.kind" => self.defaults.kind.clone(),
            "defaults.standard" => self.defaults.standard.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "data_dir" => self.data_dir.as_ref()?.display().to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key accepted by [`AppConfig::get`].
    pub const KEYS: &'static [&'static str] = &[
        "defaults.language",
        "defaults.template",
        "defaults.kind",
        "defaults.standard",
        "output.no_color",
        "data_dir",
    ];
}
