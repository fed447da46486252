//! JSON catalog loader.
//!
//! Reads `<data-root>/languages.json` into a domain [`Catalog`].
//!
//! # `languages.json` format
//!
//! ```json
//! { "languages": [
//!   { "name": "c++", "standards": [20, 23],
//!     "templates": [
//!       { "name": "executable",
//!         "kinds": [
//!           { "name": "common",
//!             "features": [ { "name": "testing", "optional": true } ] },
//!           { "name": "gui", "inherits": ["common"] }
//!         ] }
//!     ] }
//! ] }
//! ```
//!
//! `features`, `inherits` and `requires` may be omitted.

use std::fs;

use cmaker_core::{
    application::ApplicationError,
    domain::{Catalog, DataRoot, DomainValidator as validator},
    error::CmakerResult,
};
use tracing::{debug, instrument};

pub struct JsonCatalogLoader {
    data_root: DataRoot,
}

impl JsonCatalogLoader {
    pub fn new(data_root: DataRoot) -> Self {
        Self { data_root }
    }

    /// Read, parse and validate the catalog.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::CatalogUnavailable`] if the file cannot be read
    ///   or is not valid catalog JSON.
    /// - A catalog-category `DomainError` if kind or feature names repeat.
    #[instrument(skip(self), fields(data_root = %self.data_root))]
    pub fn load(&self) -> CmakerResult<Catalog> {
        let path = self.data_root.catalog_file();

        let raw = fs::read_to_string(&path).map_err(|e| ApplicationError::CatalogUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let catalog = Self::parse(&raw).map_err(|e| ApplicationError::CatalogUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        validator::validate_catalog(&catalog)?;

        debug!(languages = catalog.languages.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse catalog JSON without validating it.
    pub fn parse(raw: &str) -> Result<Catalog, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
