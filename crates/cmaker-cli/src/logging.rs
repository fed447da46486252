//! Tracing subscriber setup for the `cmaker` binary.
//!
//! The library crates only emit events; the filter is decided here.
//!
//! | Flag(s)   | cmaker crates | per-file copy events |
//! |-----------|---------------|----------------------|
//! | (none)    | WARN          | off                  |
//! | `-v`      | INFO          | off                  |
//! | `-vv`     | DEBUG         | off                  |
//! | `-vvv`    | TRACE         | off                  |
//! | `-vvvv`   | TRACE         | TRACE                |
//! | `--quiet` | ERROR         | off                  |
//!
//! `RUST_LOG` replaces the whole table when set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Target of the per-entry `copied` events emitted while overlaying fragments.
const COPY_TARGET: &str = "cmaker_adapters::filesystem";

/// Install the global subscriber. Fails if one is already registered.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(args)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        // Targets only help once the user is digging into internals.
        .with_target(args.verbose >= 2)
        .without_time()
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Filter directives for the verbosity flags.
fn directives(args: &GlobalArgs) -> String {
    let level = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let copies = if args.verbose >= 4 { "trace" } else { "debug" };
    let copies = if args.quiet { "error" } else { copies };

    format!("cmaker={level},cmaker_core={level},cmaker_adapters={level},{COPY_TARGET}={copies}")
}
