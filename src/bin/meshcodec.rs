// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Meshcodec CLI
//!
//! Command-line tool for mesh interchange files.
//!
//! ## Usage
//!
//! ```sh
//! # Show header, sections and group counts
//! meshcodec inspect summary model.mli2
//!
//! # List named groups
//! meshcodec inspect groups model.mli
//!
//! # Convert between formats, keeping only nodes and faces
//! meshcodec convert model.mli model.mli2 --kinds NF --compact
//!
//! # Show supported formats and default configuration
//! meshcodec info --json
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ConvertCmd, InfoCmd, InspectCmd};
use common::Result;

/// Meshcodec - mesh interchange toolkit
///
/// Read, inspect and convert `.mli` and `.mli2` mesh files.
/// The format is always chosen by file suffix.
#[derive(Parser, Clone)]
#[command(name = "meshcodec")]
#[command(about = "Mesh interchange toolkit for .mli and .mli2 files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect file contents (summary, groups)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Convert a mesh file to another file, format chosen by suffix
    Convert(ConvertCmd),

    /// Show supported formats and default configuration
    Info(InfoCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Convert(cmd) => cmd.run(),
        Commands::Info(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        common::log_failure(&e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
