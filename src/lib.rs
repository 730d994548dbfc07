pub mod error;
pub mod kernel;
pub mod math;
pub mod split;

pub use error::{Result, SplitError};
pub use split::{split, GreedySplitter, PolygonSplitter};
