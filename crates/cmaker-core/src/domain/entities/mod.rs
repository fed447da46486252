pub mod catalog;
pub mod configuration;
pub mod selection;

pub use crate::domain::DomainError;
pub use catalog::{Catalog, Feature, Kind, Language, Template};
pub use configuration::{Environment, ResolvedConfiguration};
pub use selection::{Selection, SelectionBuilder};
