//! Infrastructure adapters for cmaker.
//!
//! This crate implements the ports defined in `cmaker_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog_loader;
pub mod filesystem;
pub mod preprocessor;

// Re-export commonly used adapters
pub use catalog_loader::JsonCatalogLoader;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use preprocessor::DirectivePreprocessor;
