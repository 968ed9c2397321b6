//! Utility functions and helpers.
//!
//! This module contains small formatting helpers shared by both tools, such
//! as grouped-integer rendering and parsing.

pub mod grouping;

pub use grouping::{group_digits, parse_grouped};
