//! Command-line interface definition and argument parsing for `weigh-dirs`.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use fork_sizes::config::{FileConfig, TraversalOrder, WeighOptions};

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser)]
#[command(name = "weigh-dirs")]
#[command(
    about = "List every file under a directory with its data fork, resource fork and combined size"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory to weigh
    root: Option<PathBuf>,

    /// Order in which subdirectories are descended into
    ///
    /// Children are always listed sorted case-insensitively. `sorted` also
    /// recurses in that order; `listing` recurses in the order the file system
    /// returns directories.
    #[arg(long, value_enum)]
    order: Option<TraversalOrder>,

    /// Don't print a `contains N items` preview line for each subdirectory
    /// inside its parent's listing
    #[arg(long)]
    no_preview: bool,

    /// Report progress on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// The directory to weigh, if one was given.
    #[must_use]
    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    /// Extract weigh options from CLI args and config file.
    ///
    /// - **order**: CLI > config > `sorted`
    /// - **`preview_subdirs`**: `--no-preview` turns it off, otherwise config > `true`
    /// - **verbose**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn weigh_options(&self, config: &FileConfig) -> WeighOptions {
        WeighOptions {
            order: self
                .order
                .or_else(|| {
                    config
                        .weigh
                        .order
                        .as_ref()
                        .and_then(|s| TraversalOrder::from_str(s, true).ok())
                })
                .unwrap_or_default(),
            preview_subdirs: !self.no_preview && config.weigh.preview_subdirs.unwrap_or(true),
            verbose: self.verbose || config.weigh.verbose.unwrap_or(false),
        }
    }
}
