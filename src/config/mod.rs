//! Configuration types and the optional on-disk config file.

pub mod file;
pub mod weigh;

pub use file::FileConfig;
pub use weigh::{TraversalOrder, WeighOptions};
