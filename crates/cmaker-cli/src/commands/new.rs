//! Implementation of the `cmaker new` command.
//!
//! Responsibility: fill the gaps in the CLI arguments from the configured
//! defaults, call the core scaffold service, and display results. No
//! business logic lives here.

use std::path::Path;

use tracing::{debug, info, instrument};

use cmaker_adapters::{DirectivePreprocessor, JsonCatalogLoader, LocalFilesystem};
use cmaker_core::{
    application::ScaffoldService,
    domain::{ResolvedConfiguration, Selection},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `cmaker new` command.
///
/// Dispatch sequence:
/// 1. Build a `Selection` from the flags and configured defaults
/// 2. Load the catalog from the data root
/// 3. Early-exit after resolution if `--dry-run`
/// 4. Scaffold into the current directory
/// 5. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let selection = build_selection(&args, &config);
    debug!(selection = %selection, "selection built");

    let data_root = config.data_root(global.data_dir.as_deref())?;
    let catalog = JsonCatalogLoader::new(data_root.clone()).load()?;

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(DirectivePreprocessor::new()),
    );
    let destination = Path::new(".");

    if args.dry_run {
        let resolved = service.resolve(&catalog, &selection)?;
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            resolved.name(),
            destination.join(resolved.name()).display(),
        ))?;
        show_configuration(&resolved, &output)?;
        return Ok(());
    }

    output.header(&format!("Creating '{}'...", selection.name))?;
    info!(data_root = %data_root, "scaffold started");

    let scaffolded = service.scaffold(&catalog, &selection, &data_root, destination)?;

    info!(path = %scaffolded.project_dir.display(), "scaffold completed");
    show_configuration(&scaffolded.configuration, &output)?;
    output.success(&format!(
        "Project '{}' created!",
        scaffolded.configuration.name()
    ))?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", scaffolded.configuration.name()))?;
    output.print("  cmake -S . -B build && cmake --build build")?;

    Ok(())
}

/// Flags win; anything omitted comes from the configured defaults.
fn build_selection(args: &NewArgs, config: &AppConfig) -> Selection {
    let defaults = &config.defaults;

    Selection::builder(args.name.as_str())
        .language(
            args.language
                .clone()
                .unwrap_or_else(|| defaults.language.clone()),
        )
        .standard(args.standard.unwrap_or(defaults.standard))
        .template(
            args.project_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| defaults.template.clone()),
        )
        .kind(args.kind.clone().unwrap_or_else(|| defaults.kind.clone()))
        .features(args.features.iter().cloned())
        .build()
}

fn show_configuration(config: &ResolvedConfiguration, out: &OutputManager) -> CliResult<()> {
    out.print(&format!("  Language:  {}{}", config.language(), config.standard()))?;
    out.print(&format!("  Type:      {}", config.template()))?;
    out.print(&format!("  Kind:      {}", config.kind()))?;
    if !config.ancestors().is_empty() {
        out.print(&format!("  Inherits:  {}", config.ancestors().join(", ")))?;
    }
    let features = if config.features().is_empty() {
        "none".to_owned()
    } else {
        config.features().join(", ")
    };
    out.print(&format!("  Features:  {features}"))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
