//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cmaker-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Directory copies, traversal, reads, writes and renames
//!   - `Preprocessor`: The macro language run over every materialized file
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DirEntry, Filesystem, PreprocessError, Preprocessor};

#[cfg(test)]
pub use output::{MockFilesystem, MockPreprocessor};
