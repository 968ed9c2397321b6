//! Options controlling how the tree weigher walks and prints a directory.

use clap::ValueEnum;

/// Order in which subdirectories are descended into.
///
/// Children are always *displayed* sorted case-insensitively; this only
/// decides whether recursion follows that same order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum TraversalOrder {
    /// Recurse in the case-insensitive order children are displayed
    #[default]
    Sorted,

    /// Recurse in whatever order the file system lists directories
    Listing,
}

/// Configuration for the tree weigher.
#[derive(Clone, Debug)]
pub struct WeighOptions {
    /// Order of recursion into subdirectories
    pub order: TraversalOrder,

    /// Whether a subdirectory gets a `contains N items` line inside its
    /// parent's listing, in addition to its own summary line when visited
    pub preview_subdirs: bool,

    /// Whether to report progress on stderr
    pub verbose: bool,
}

impl Default for WeighOptions {
    fn default() -> Self {
        Self {
            order: TraversalOrder::default(),
            preview_subdirs: true,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weigh_options() {
        let opts = WeighOptions::default();

        assert_eq!(opts.order, TraversalOrder::Sorted);
        assert!(opts.preview_subdirs);
        assert!(!opts.verbose);
    }

    #[test]
    fn test_traversal_order_from_str() {
        assert_eq!(
            TraversalOrder::from_str("sorted", true).unwrap(),
            TraversalOrder::Sorted
        );
        assert_eq!(
            TraversalOrder::from_str("LISTING", true).unwrap(),
            TraversalOrder::Listing
        );
        assert!(TraversalOrder::from_str("random", true).is_err());
    }
}
