//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cmaker",
    bin_name = "cmaker",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "CMake project generator",
    long_about = "cmaker creates C and C++ projects from a catalog of \
                  template kinds and optional features.",
    after_help = "EXAMPLES:\n\
        \x20 cmaker new -n demo\n\
        \x20 cmaker new library -n mylib -k static --lang c --std 11\n\
        \x20 cmaker new -n app --features installable metadata\n\
        \x20 cmaker list --lang c++\n\
        \x20 cmaker completions bash > ~/.local/share/bash-completion/completions/cmaker",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 cmaker new -n demo\n\
            \x20 cmaker new executable -n viewer --kind gui --std 20\n\
            \x20 cmaker new library -n mylib --kind shared --features installable"
    )]
    New(NewArgs),

    /// List languages, template types, kinds and their features.
    #[command(
        visible_alias = "ls",
        about = "List available kinds and features",
        after_help = "EXAMPLES:\n\
            \x20 cmaker list\n\
            \x20 cmaker list --lang c\n\
            \x20 cmaker list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cmaker completions bash > ~/.local/share/bash-completion/completions/cmaker\n\
            \x20 cmaker completions zsh  > ~/.zfunc/_cmaker\n\
            \x20 cmaker completions fish > ~/.config/fish/completions/cmaker.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the cmaker configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cmaker config get defaults.language\n\
            \x20 cmaker config list\n\
            \x20 cmaker config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `cmaker new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template type; falls back to the configured default.
    #[arg(value_name = "TYPE", value_enum, help = "Project type")]
    pub project_type: Option<ProjectType>,

    /// Project name, created as a directory under the current directory.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        help = "Project kind within the type (e.g. common, gui, static)"
    )]
    pub kind: Option<String>,

    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        help = "Project language (e.g. c++, c)"
    )]
    pub language: Option<String>,

    #[arg(long = "std", value_name = "N", help = "Language standard (e.g. 23)")]
    pub standard: Option<u32>,

    /// Optional features; repeatable, space or comma separated.
    #[arg(
        long = "features",
        value_name = "FEATURE",
        num_args = 1..,
        value_delimiter = ',',
        help = "Features used in the project"
    )]
    pub features: Vec<String>,

    /// Resolve and print the configuration without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

/// Template types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProjectType {
    Executable,
    Library,
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Executable => write!(f, "executable"),
            Self::Library => write!(f, "library"),
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `cmaker list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by language.
    #[arg(short = 'l', long = "lang", help = "Filter by language")]
    pub language: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `language type/kind` per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cmaker completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cmaker config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.language`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
