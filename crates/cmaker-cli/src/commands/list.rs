//! Implementation of the `cmaker list` command.

use console::{Alignment, pad_str};
use tracing::instrument;

use cmaker_adapters::JsonCatalogLoader;
use cmaker_core::application::{CatalogService, KindInfo};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(language = ?args.language))]
pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let data_root = config.data_root(global.data_dir.as_deref())?;
    let catalog = JsonCatalogLoader::new(data_root).load()?;
    let kinds = CatalogService::new(&catalog).kinds(args.language.as_deref())?;

    match args.format {
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&kinds).map_err(std::io::Error::from)?;
            output.data(&json)?;
        }

        ListFormat::List => {
            for kind in &kinds {
                output.data(&format!("{} {}/{}", kind.language, kind.template, kind.kind))?;
            }
        }

        ListFormat::Table => {
            if kinds.is_empty() {
                output.warning("The catalog does not define any kinds")?;
                return Ok(());
            }
            output.header("Available kinds:")?;
            for line in table(&kinds) {
                output.print(&line)?;
            }
            output.print("")?;
            output.print("Features marked * are always included.")?;
        }
    }

    Ok(())
}

const HEADERS: [&str; 5] = ["LANGUAGE", "STANDARDS", "TYPE/KIND", "INHERITS", "FEATURES"];

/// Render rows with every column padded to its widest cell.
fn table(kinds: &[KindInfo]) -> Vec<String> {
    let rows: Vec<[String; 5]> = kinds.iter().map(row).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(console::measure_text_width(cell));
        }
    }

    let render = |cells: [&str; 5]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad_str(cell, width, Alignment::Left, None).into_owned())
            .collect::<Vec<_>>()
            .join("  ");
        format!("  {}", line.trim_end())
    };

    std::iter::once(render(HEADERS))
        .chain(rows.iter().map(|r| render(r.each_ref().map(String::as_str))))
        .collect()
}

fn row(kind: &KindInfo) -> [String; 5] {
    let standards = kind
        .standards
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let features = kind
        .features
        .iter()
        .map(|f| {
            if f.mandatory {
                format!("{}*", f.name)
            } else {
                f.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    [
        kind.language.clone(),
        standards,
        format!("{}/{}", kind.template, kind.kind),
        if kind.inherits.is_empty() {
            "-".into()
        } else {
            kind.inherits.join(",")
        },
        if features.is_empty() { "-".into() } else { features },
    ]
}
