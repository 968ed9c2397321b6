//! # total-sizes
//!
//! Sum tab-separated size rows into one `Total` row.
//!
//! Each input line is `<label>\t<data>\t<rsrc>\t<total>`; the sizes may use
//! thousands separators. Files named on the command line are read in order,
//! standard input when none are given.

use std::{path::PathBuf, process::exit};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use fork_sizes::{
    aggregator::aggregate_inputs,
    sizes::{TOTAL_LABEL, format_row},
};

/// Command-line interface for `total-sizes`.
#[derive(Parser)]
#[command(name = "total-sizes")]
#[command(about = "Total the size columns of tab-separated size rows")]
#[command(version)]
struct Cli {
    /// Files to read, in order (standard input when none, or for `-`)
    files: Vec<PathBuf>,
}

fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err:#}", "Error:".red());

        exit(1);
    }
}

fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let totals = aggregate_inputs(&args.files)?;

    println!("{}", format_row(TOTAL_LABEL, &totals));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_files_means_stdin() {
        let args = Cli::parse_from(["total-sizes"]);
        assert!(args.files.is_empty());
    }

    #[test]
    fn test_files_keep_argument_order() {
        let args = Cli::parse_from(["total-sizes", "b.tsv", "-", "a.tsv"]);
        assert_eq!(
            args.files,
            vec![
                PathBuf::from("b.tsv"),
                PathBuf::from("-"),
                PathBuf::from("a.tsv")
            ]
        );
    }
}
