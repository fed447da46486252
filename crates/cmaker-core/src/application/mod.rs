//! Application layer for cmaker.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (materialize, render, scaffold, list)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Resolution rules live
//! in `crate::domain`; this layer decides what gets copied and rewritten.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CatalogService, ContentRenderer, FeatureInfo,
    KindInfo, // DTO for catalog listings
    Materializer, ScaffoldService, Scaffolded,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, Filesystem, PreprocessError, Preprocessor};

pub use error::ApplicationError;
