//! # fork-sizes
//!
//! Inspect how much space files use in their data fork and their resource
//! fork.
//!
//! The crate backs two command-line tools:
//!
//! - `weigh-dirs` walks a directory tree and prints one row per file with its
//!   data fork, resource fork, and combined size, one summary line per
//!   directory, and a final `Total` row.
//! - `total-sizes` reads tab-separated size rows (such as the file rows
//!   printed by `weigh-dirs`) and prints their column totals.
//!
//! Resource fork sizes are read through a [`fork::ForkReader`]; on platforms
//! without resource forks every file simply reports `0`.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fork;
pub mod sizes;
pub mod utils;
pub mod weigher;

pub use config::{TraversalOrder, WeighOptions};
pub use error::{LineError, ParseError, SizeOverflow};
pub use sizes::{FileSizes, SizeTotals};
