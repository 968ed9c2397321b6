//! Per-file size records and running totals.
//!
//! A [`FileSizes`] is computed once per visited file and never mutated, so its
//! combined size always equals data plus resource fork. [`SizeTotals`] is the
//! accumulator both tools thread through their loops instead of keeping
//! process-wide counters.

use crate::error::{Column, SizeOverflow};
use crate::utils::group_digits;

/// Label of the final row printed by both tools.
pub const TOTAL_LABEL: &str = "Total";

/// Data fork, resource fork, and combined size of one file, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileSizes {
    primary: u64,
    auxiliary: u64,
    combined: u64,
}

impl FileSizes {
    /// Build a record, computing the combined size.
    ///
    /// # Errors
    ///
    /// Returns [`SizeOverflow`] if the two sizes do not sum within `u64`.
    pub const fn new(primary: u64, auxiliary: u64) -> Result<Self, SizeOverflow> {
        match primary.checked_add(auxiliary) {
            Some(combined) => Ok(Self {
                primary,
                auxiliary,
                combined,
            }),
            None => Err(SizeOverflow {
                column: Column::Combined,
            }),
        }
    }

    #[must_use]
    pub const fn primary(&self) -> u64 {
        self.primary
    }

    #[must_use]
    pub const fn auxiliary(&self) -> u64 {
        self.auxiliary
    }

    #[must_use]
    pub const fn combined(&self) -> u64 {
        self.combined
    }
}

/// Three column accumulators: data, resource, and combined size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeTotals {
    pub primary: u64,
    pub auxiliary: u64,
    pub combined: u64,
}

impl SizeTotals {
    /// Add one file's sizes to the totals.
    ///
    /// # Errors
    ///
    /// Returns [`SizeOverflow`] naming the first column that overflowed; the
    /// totals are left unchanged in that case.
    pub fn add_file(&mut self, sizes: &FileSizes) -> Result<(), SizeOverflow> {
        self.add_columns([sizes.primary, sizes.auxiliary, sizes.combined])
    }

    /// Add three raw column values, as read from a pre-computed row.
    ///
    /// The combined column is summed as given rather than recomputed, so
    /// totalling rows reproduces whatever the rows said.
    ///
    /// # Errors
    ///
    /// Returns [`SizeOverflow`] naming the first column that overflowed; the
    /// totals are left unchanged in that case.
    pub fn add_columns(&mut self, values: [u64; 3]) -> Result<(), SizeOverflow> {
        let current = [self.primary, self.auxiliary, self.combined];
        let mut next = [0u64; 3];

        for (i, column) in Column::ALL.into_iter().enumerate() {
            next[i] = current[i]
                .checked_add(values[i])
                .ok_or(SizeOverflow { column })?;
        }

        [self.primary, self.auxiliary, self.combined] = next;
        Ok(())
    }
}

/// Render `label` and the three totals as a tab-separated row of grouped integers.
///
/// # Examples
///
/// ```
/// # use fork_sizes::sizes::{SizeTotals, format_row};
/// let totals = SizeTotals { primary: 3_000, auxiliary: 500, combined: 3_500 };
/// assert_eq!(format_row("Total", &totals), "Total\t3,000\t500\t3,500");
/// ```
#[must_use]
pub fn format_row(label: &str, totals: &SizeTotals) -> String {
    format!(
        "{label}\t{}\t{}\t{}",
        group_digits(totals.primary),
        group_digits(totals.auxiliary),
        group_digits(totals.combined)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sizes_combined_is_sum() {
        let sizes = FileSizes::new(5, 3).unwrap();
        assert_eq!(sizes.primary(), 5);
        assert_eq!(sizes.auxiliary(), 3);
        assert_eq!(sizes.combined(), 8);
    }

    #[test]
    fn test_file_sizes_without_resource_fork() {
        let sizes = FileSizes::new(10, 0).unwrap();
        assert_eq!(sizes.combined(), 10);
    }

    #[test]
    fn test_file_sizes_overflow() {
        assert_eq!(
            FileSizes::new(u64::MAX, 1),
            Err(SizeOverflow {
                column: Column::Combined
            })
        );
    }

    #[test]
    fn test_totals_accumulate_files() {
        let mut totals = SizeTotals::default();
        totals.add_file(&FileSizes::new(10, 0).unwrap()).unwrap();
        totals.add_file(&FileSizes::new(5, 3).unwrap()).unwrap();

        assert_eq!(
            totals,
            SizeTotals {
                primary: 15,
                auxiliary: 3,
                combined: 18
            }
        );
        assert_eq!(totals.combined, totals.primary + totals.auxiliary);
    }

    #[test]
    fn test_totals_overflow_leaves_totals_unchanged() {
        let mut totals = SizeTotals {
            primary: 1,
            auxiliary: u64::MAX,
            combined: 0,
        };

        let err = totals.add_columns([1, 1, 1]).unwrap_err();

        assert_eq!(err.column, Column::Auxiliary);
        assert_eq!(totals.primary, 1);
        assert_eq!(totals.combined, 0);
    }

    #[test]
    fn test_format_row() {
        let totals = SizeTotals {
            primary: 15,
            auxiliary: 3,
            combined: 18,
        };
        assert_eq!(format_row(TOTAL_LABEL, &totals), "Total\t15\t3\t18");
        assert_eq!(
            format_row(TOTAL_LABEL, &SizeTotals::default()),
            "Total\t0\t0\t0"
        );
    }
}
