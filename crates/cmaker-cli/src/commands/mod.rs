//! One module per subcommand; each exposes an `execute` entry point.

pub mod completions;
pub mod config;
pub mod list;
pub mod new;
