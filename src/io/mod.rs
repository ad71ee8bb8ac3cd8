mod dataset;
pub mod import;

pub use dataset::*;
pub use import::{ImportError, ImportOptions, ImportResult, Importer};
