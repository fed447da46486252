// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cmaker.
//!
//! This module contains pure business logic with no I/O. Filesystem access
//! and macro preprocessing are reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror, serde, tracing
//! - **Immutable entities**: The catalog is read-only once loaded
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod kind_graph;
pub mod resolver;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    catalog::{Catalog, Feature, Kind, Language, Template},
    configuration::{Environment, ResolvedConfiguration},
    selection::{
        DEFAULT_KIND, DEFAULT_LANGUAGE, DEFAULT_STANDARD, DEFAULT_TEMPLATE, Selection,
        SelectionBuilder,
    },
};

pub use error::{DomainError, ErrorCategory};
pub use kind_graph::{Ancestry, KindGraph};
pub use resolver::ConfigurationResolver;
pub use value_objects::{DataRoot, Wildcard, Wildcards, replace_until_absent};

pub use validation::DomainValidator;
