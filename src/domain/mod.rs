mod bill;
mod budget;
mod category;
mod expense;
mod holding;
mod income;
pub mod metrics;
mod money;
mod period;
mod savings;
mod snapshot;

pub use bill::*;
pub use budget::*;
pub use category::*;
pub use expense::*;
pub use holding::*;
pub use income::*;
pub use metrics::*;
pub use money::*;
pub use period::*;
pub use savings::*;
pub use snapshot::*;
