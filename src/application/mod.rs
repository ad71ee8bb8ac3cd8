// Application layer - the caller around the pure metrics.
// Windows the dataset, assembles dashboard reports and applies user actions.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
