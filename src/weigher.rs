//! Directory tree weighing.
//!
//! This module walks a directory tree top-down and prints, for every
//! directory, a summary line followed by one line per child: subdirectories
//! with their item count, files with their data fork, resource fork, and
//! combined sizes. Every file's sizes are added to a [`SizeTotals`] that is
//! printed as the final row.
//!
//! Entries whose name starts with a dot are never listed, counted, descended
//! into, or totalled. Any I/O failure aborts the walk.

use std::{
    cmp::Ordering,
    ffi::OsStr,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use humansize::{DECIMAL, format_size};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::{TraversalOrder, WeighOptions},
    fork::ForkReader,
    sizes::{FileSizes, SizeTotals, TOTAL_LABEL, format_row},
    utils::group_digits,
};

/// Column header printed before the tree.
pub const HEADER: &str = "Name\tData size\tRsrc size\tTotal size";

/// Rule printed below the header and above the total row.
pub const SEPARATOR: &str = "═══════\t═════════\t═════════\t═════════";

const ROOT_GLYPH: &str = "🗄";
const DIR_GLYPH: &str = "📁";
const FILE_GLYPH: &str = "📄";

/// Whether a child is descended into or weighed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One non-hidden entry of a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// The non-hidden children of a directory, split by kind.
///
/// Both lists are sorted case-insensitively by name.
#[derive(Clone, Debug, Default)]
pub struct Children {
    pub directories: Vec<ChildEntry>,
    pub files: Vec<ChildEntry>,
}

impl Children {
    /// Number of immediate children, directories and files together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All children merged into one case-insensitive order for printing.
    ///
    /// On equal keys directories come before files.
    #[must_use]
    pub fn display_order(&self) -> Vec<&ChildEntry> {
        let mut merged: Vec<&ChildEntry> =
            self.directories.iter().chain(self.files.iter()).collect();
        merged.sort_by(|a, b| compare_names(&a.name, &b.name));
        merged
    }
}

/// Summary of a completed walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeighReport {
    /// Sums over every weighed file
    pub totals: SizeTotals,

    /// Number of directories visited, the root included
    pub directories: usize,

    /// Number of files weighed
    pub files: usize,
}

/// Whether `name` is a dot-file or dot-directory.
#[must_use]
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().starts_with(b".")
}

/// Name as printed: `:` becomes `/`, since classic Mac volumes store the
/// user-visible slash as a colon.
#[must_use]
pub fn display_name(name: &str) -> String {
    name.replace(':', "/")
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    compare_names(&a.file_name().to_string_lossy(), &b.file_name().to_string_lossy())
}

fn indent(depth: usize) -> String {
    " ".repeat(depth)
}

/// Label used for a visited directory: its last path component, or the path
/// as given when there is none (`.`, `/`).
fn directory_label(dir: &Path) -> String {
    dir.file_name().map_or_else(
        || dir.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn classify(entry: &fs::DirEntry) -> io::Result<EntryKind> {
    let file_type = entry.file_type()?;

    // A link to a directory is listed as one but the walk never follows it.
    let is_dir = file_type.is_dir()
        || (file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir()));

    Ok(if is_dir {
        EntryKind::Directory
    } else {
        EntryKind::File
    })
}

/// Pre-order walk of `root` that never enters hidden entries below the root.
fn walk(root: &Path, order: TraversalOrder) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    let mut walker = WalkDir::new(root);
    if order == TraversalOrder::Sorted {
        walker = walker.sort_by(compare_entries);
    }

    walker
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
}

/// List the non-hidden children of `dir`.
///
/// # Errors
///
/// Returns an error if the directory or any of its entries cannot be read.
pub fn list_children(dir: &Path) -> io::Result<Children> {
    let mut children = Children::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        if is_hidden(&file_name) {
            continue;
        }

        let child = ChildEntry {
            name: file_name.to_string_lossy().into_owned(),
            path: entry.path(),
            kind: classify(&entry)?,
        };

        match child.kind {
            EntryKind::Directory => children.directories.push(child),
            EntryKind::File => children.files.push(child),
        }
    }

    children
        .directories
        .sort_by(|a, b| compare_names(&a.name, &b.name));
    children.files.sort_by(|a, b| compare_names(&a.name, &b.name));

    Ok(children)
}

/// Walks a directory tree and prints per-file fork sizes.
#[derive(Debug)]
pub struct Weigher<P> {
    options: WeighOptions,
    forks: P,
}

impl<P: ForkReader> Weigher<P> {
    /// Create a weigher that reads resource fork sizes through `forks`.
    #[must_use]
    pub const fn new(options: WeighOptions, forks: P) -> Self {
        Self { options, forks }
    }

    /// Weigh the tree under `root`, writing the full report to `out`.
    ///
    /// Writes the header, then one block per directory in pre-order, then the
    /// separator and the `Total` row.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or not a directory, if any
    /// directory cannot be listed, if any file cannot be measured, or if
    /// writing to `out` fails. Whatever was written before the failure stays
    /// written.
    pub fn weigh<W: Write>(&self, root: &Path, out: &mut W) -> Result<WeighReport> {
        let metadata =
            fs::metadata(root).with_context(|| format!("Cannot access {}", root.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", root.display());
        }

        writeln!(out, "{HEADER}")?;
        writeln!(out, "{SEPARATOR}")?;

        let mut report = WeighReport::default();

        for entry in walk(root, self.options.order) {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if !entry.file_type().is_dir() {
                continue;
            }

            self.weigh_directory(entry.path(), entry.depth(), &mut report, out)?;
        }

        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "{}", format_row(TOTAL_LABEL, &report.totals))?;

        if self.options.verbose {
            eprintln!(
                "{} {} files in {} directories ({})",
                "Weighed".green(),
                report.files,
                report.directories,
                format_size(report.totals.combined, DECIMAL)
            );
        }

        Ok(report)
    }

    /// Measure one file's data and resource forks.
    ///
    /// The data fork size comes from `lstat`, so a symbolic link is measured
    /// as the link itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be stat'ed or its resource fork
    /// cannot be inspected.
    pub fn file_sizes(&self, path: &Path) -> Result<FileSizes> {
        let primary = fs::symlink_metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        let auxiliary = self
            .forks
            .auxiliary_size(path)
            .with_context(|| format!("Failed to read resource fork of {}", path.display()))?;

        FileSizes::new(primary, auxiliary).with_context(|| path.display().to_string())
    }

    fn weigh_directory<W: Write>(
        &self,
        dir: &Path,
        depth: usize,
        report: &mut WeighReport,
        out: &mut W,
    ) -> Result<()> {
        if self.options.verbose {
            eprintln!("{} {}", "Weighing".dimmed(), dir.display());
        }

        let children =
            list_children(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

        let glyph = if depth > 0 { DIR_GLYPH } else { ROOT_GLYPH };
        writeln!(
            out,
            "{}{glyph} {} contains {} items",
            indent(depth),
            display_name(&directory_label(dir)),
            children.len()
        )?;

        let child_indent = indent(depth + 1);
        for child in children.display_order() {
            match child.kind {
                EntryKind::Directory if self.options.preview_subdirs => {
                    // Skips hidden entries, unlike a raw glob of the subdirectory.
                    let count = list_children(&child.path)
                        .with_context(|| format!("Failed to list {}", child.path.display()))?
                        .len();
                    writeln!(
                        out,
                        "{child_indent}{DIR_GLYPH} {} contains {count} items",
                        display_name(&child.name)
                    )?;
                }
                EntryKind::Directory => {}
                EntryKind::File => {
                    let sizes = self.file_sizes(&child.path)?;
                    report
                        .totals
                        .add_file(&sizes)
                        .with_context(|| child.path.display().to_string())?;
                    report.files += 1;

                    writeln!(
                        out,
                        "{child_indent}{FILE_GLYPH} {}\t{}\t{}\t{}",
                        display_name(&child.name),
                        group_digits(sizes.primary()),
                        group_digits(sizes.auxiliary()),
                        group_digits(sizes.combined())
                    )?;
                }
            }
        }

        writeln!(out)?;
        report.directories += 1;

        Ok(())
    }
}
