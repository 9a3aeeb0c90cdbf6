pub mod claim;
pub mod status;
pub mod totals;

pub use claim::*;
pub use status::*;
pub use totals::*;
