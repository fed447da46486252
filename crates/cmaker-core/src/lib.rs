//! cmaker core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the cmaker
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           cmaker-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, Materializer,        │
//! │   ContentRenderer, CatalogService)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Driven: Filesystem, Preprocessor) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cmaker-adapters (Infrastructure)     │
//! │ (LocalFilesystem, JsonCatalogLoader,    │
//! │  DirectivePreprocessor)                 │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Catalog, KindGraph, Resolver, Tokens)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use cmaker_core::{
//!     application::ScaffoldService,
//!     domain::{DataRoot, Selection},
//! };
//!
//! // 1. Describe the project
//! let selection = Selection::builder("demo")
//!     .template("library")
//!     .kind("static")
//!     .feature("installable")
//!     .build();
//!
//! // 2. Use application service (with injected adapters)
//! let service = ScaffoldService::new(filesystem, preprocessor);
//! service.scaffold(&catalog, &selection, &DataRoot::new("resources"), Path::new(".")).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, KindInfo, ScaffoldService, Scaffolded,
        ports::{Filesystem, Preprocessor},
    };
    pub use crate::domain::{
        Catalog, DataRoot, Environment, Feature, Kind, Language, ResolvedConfiguration, Selection,
        Template,
    };
    pub use crate::error::{CmakerError, CmakerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
