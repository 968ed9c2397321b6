//! # weigh-dirs
//!
//! Walk a directory tree and report, for every file, the size of its data
//! fork, the size of its resource fork, and their sum.
//!
//! ## Usage
//!
//! ```bash
//! # Weigh a directory
//! weigh-dirs ~/Documents
//!
//! # Keep only the file rows and total them
//! weigh-dirs ~/Documents | grep '📄' | total-sizes
//! ```

mod cli;

use std::{fs, io, path::Path, process::exit};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use fork_sizes::{
    config::FileConfig,
    fork::platform_reader,
    weigher::Weigher,
};

/// Entry point for the weigh-dirs application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err:#}", "Error:".red());

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// # Errors
///
/// Returns errors from config handling, from walking the tree, or from
/// writing to stdout.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let Some(root) = args.root() else {
        bail!("a directory to weigh is required (see --help)");
    };

    let file_config = load_config();
    let options = args.weigh_options(&file_config);
    let weigher = Weigher::new(options, platform_reader());

    let mut stdout = io::stdout().lock();
    weigher.weigh(root, &mut stdout)?;

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# fork-sizes configuration
# All values shown are their defaults. Uncomment and change as needed.

[weigh]
# Order in which subdirectories are descended into: "sorted" or "listing"
# order = "sorted"

# Print a "contains N items" line for each subdirectory inside its parent
# preview_subdirs = true

# Report progress on stderr
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    match cmd {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => show_config(&path)?,
        ConfigCommand::Init => init_config(&path)?,
    }
    Ok(())
}

/// Print the settings the weigher would run with when no flags are given.
fn show_config(path: &Path) -> Result<()> {
    let config = if path.exists() {
        println!("Config file: {} (found)", path.display());
        FileConfig::load()?
    } else {
        println!("Config file: {} (not found - showing defaults)", path.display());
        FileConfig::default()
    };

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let order = config
        .weigh
        .order
        .as_deref()
        .map_or_else(|| "\"sorted\"  (default)".to_string(), |v| format!("\"{v}\""));

    format!(
        "\
[weigh]
order           = {order}
preview_subdirs = {preview_subdirs}
verbose         = {verbose}",
        preview_subdirs = show_bool(config.weigh.preview_subdirs, true),
        verbose = show_bool(config.weigh.verbose, false),
    )
}

/// Write [`CONFIG_TEMPLATE`] to `path`, leaving an existing file untouched.
fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
