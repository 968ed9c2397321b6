//! Totalling of pre-computed size rows.
//!
//! Input is text with one row per line: a label and three size columns,
//! separated by tabs, where the sizes may carry thousands separators. This
//! is the shape of the file lines the tree weigher prints, so its output (or
//! a filtered part of it) can be fed straight in.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    error::{Column, LineError, ParseError},
    sizes::SizeTotals,
    utils::parse_grouped,
};

/// Name used for standard input in diagnostics, and the argument that selects it.
pub const STDIN_NAME: &str = "<stdin>";
pub const STDIN_ARG: &str = "-";

const FIELD_COUNT: usize = 4;

/// Parse one row into its three size columns, ignoring the label.
///
/// # Errors
///
/// Returns [`LineError::FieldCount`] unless the line has exactly four
/// tab-separated fields, and [`LineError::InvalidNumber`] if a size column is
/// not a (possibly grouped) non-negative integer.
///
/// # Examples
///
/// ```
/// # use fork_sizes::aggregator::parse_line;
/// assert_eq!(parse_line("x\t1,000\t0\t1,000").unwrap(), [1_000, 0, 1_000]);
/// assert!(parse_line("x\t1,000").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<[u64; 3], LineError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(LineError::FieldCount {
            found: fields.len(),
        });
    }

    let mut values = [0u64; 3];
    for ((slot, column), text) in values.iter_mut().zip(Column::ALL).zip(&fields[1..]) {
        *slot = parse_grouped(text).map_err(|source| LineError::InvalidNumber {
            column,
            value: text.trim().to_string(),
            source,
        })?;
    }

    Ok(values)
}

/// Accumulates size rows from one or more inputs.
#[derive(Debug, Default)]
pub struct Aggregator {
    totals: SizeTotals,
    rows: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `line` and add its columns to the totals.
    ///
    /// # Errors
    ///
    /// Returns the reason the line was rejected; the totals are unchanged.
    pub fn add_line(&mut self, line: &str) -> Result<(), LineError> {
        let values = parse_line(line)?;
        self.totals.add_columns(values)?;
        self.rows += 1;
        Ok(())
    }

    /// Consume every line of `reader`, naming it `input` in diagnostics.
    ///
    /// # Errors
    ///
    /// Stops at the first unreadable or malformed line. A malformed line is
    /// reported as a [`ParseError`] carrying the input name and line number.
    pub fn feed<R: BufRead>(&mut self, input: &str, reader: R) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {input}"))?;
            self.add_line(&line).map_err(|kind| ParseError {
                input: input.to_string(),
                line: index + 1,
                kind,
            })?;
        }
        Ok(())
    }

    /// Open `path` and feed its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, or as [`Self::feed`].
    pub fn feed_file(&mut self, path: &Path) -> Result<()> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        self.feed(&path.display().to_string(), BufReader::new(file))
    }

    #[must_use]
    pub const fn totals(&self) -> &SizeTotals {
        &self.totals
    }

    /// Number of rows accepted so far.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }
}

/// Total every row of the named files in order, or of standard input when
/// `paths` is empty. A path of `-` also reads standard input.
///
/// # Errors
///
/// Returns an error for the first file that cannot be opened or read, and for
/// the first malformed row.
pub fn aggregate_inputs(paths: &[PathBuf]) -> Result<SizeTotals> {
    let mut aggregator = Aggregator::new();

    if paths.is_empty() {
        aggregator.feed(STDIN_NAME, io::stdin().lock())?;
    }

    for path in paths {
        if path.as_os_str() == STDIN_ARG {
            aggregator.feed(STDIN_NAME, io::stdin().lock())?;
        } else {
            aggregator.feed_file(path)?;
        }
    }

    Ok(*aggregator.totals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizes::{TOTAL_LABEL, format_row};
    use std::io::Cursor;

    #[test]
    fn test_parse_line_grouped_values() {
        assert_eq!(
            parse_line("y\t2,000\t500\t2,500").unwrap(),
            [2_000, 500, 2_500]
        );
    }

    #[test]
    fn test_parse_line_label_is_ignored() {
        assert_eq!(parse_line(" 📄 a:b.txt\t10\t0\t10").unwrap(), [10, 0, 10]);
        assert_eq!(parse_line("\t1\t2\t3").unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_parse_line_field_count() {
        assert_eq!(
            parse_line(""),
            Err(LineError::FieldCount { found: 1 })
        );
        assert_eq!(
            parse_line("x\t1\t2"),
            Err(LineError::FieldCount { found: 3 })
        );
        assert_eq!(
            parse_line("x\t1\t2\t3\t4"),
            Err(LineError::FieldCount { found: 5 })
        );
    }

    #[test]
    fn test_parse_line_invalid_number_names_column() {
        let err = parse_line("x\t1\tlots\t3").unwrap_err();
        match err {
            LineError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, Column::Auxiliary);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_feed_sums_columns() {
        let mut aggregator = Aggregator::new();
        let input = "x\t1,000\t0\t1,000\ny\t2,000\t500\t2,500\n";

        aggregator.feed("test", Cursor::new(input)).unwrap();

        assert_eq!(aggregator.rows(), 2);
        assert_eq!(
            format_row(TOTAL_LABEL, aggregator.totals()),
            "Total\t3,000\t500\t3,500"
        );
    }

    #[test]
    fn test_feed_handles_crlf_and_missing_final_newline() {
        let mut aggregator = Aggregator::new();

        aggregator
            .feed("test", Cursor::new("a\t1\t2\t3\r\nb\t4\t5\t9"))
            .unwrap();

        assert_eq!(
            *aggregator.totals(),
            SizeTotals {
                primary: 5,
                auxiliary: 7,
                combined: 12
            }
        );
    }

    #[test]
    fn test_feed_empty_input() {
        let mut aggregator = Aggregator::new();
        aggregator.feed("test", Cursor::new("")).unwrap();

        assert_eq!(aggregator.rows(), 0);
        assert_eq!(
            format_row(TOTAL_LABEL, aggregator.totals()),
            "Total\t0\t0\t0"
        );
    }

    #[test]
    fn test_feed_reports_line_number() {
        let mut aggregator = Aggregator::new();
        let input = "a\t1\t0\t1\nnot a row\n";

        let err = aggregator.feed("rows.tsv", Cursor::new(input)).unwrap_err();
        let parse_error = err.downcast_ref::<ParseError>().unwrap();

        assert_eq!(parse_error.input, "rows.tsv");
        assert_eq!(parse_error.line, 2);
        assert_eq!(parse_error.kind, LineError::FieldCount { found: 1 });
        assert!(err.to_string().starts_with("rows.tsv:2: "));
    }

    #[test]
    fn test_re_aggregation_is_stable() {
        let mut first = Aggregator::new();
        first
            .feed("a", Cursor::new("x\t1,000\t0\t1,000\ny\t2,000\t500\t2,500\n"))
            .unwrap();
        let total_row = format_row(TOTAL_LABEL, first.totals());

        let mut second = Aggregator::new();
        second.feed("b", Cursor::new(total_row)).unwrap();

        assert_eq!(second.totals(), first.totals());
    }

    #[test]
    fn test_feed_file_missing() {
        let mut aggregator = Aggregator::new();
        let err = aggregator
            .feed_file(Path::new("/definitely/not/here.tsv"))
            .unwrap_err();

        assert!(err.to_string().contains("Failed to open"));
    }
}
