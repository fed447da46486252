//! Macro preprocessor adapters.

mod directive;

pub use directive::DirectivePreprocessor;
