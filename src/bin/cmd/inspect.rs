// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show file summary and named groups.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_unit, load_mesh, Result};
use meshcodec::{GroupKind, KindMask};

/// Inspect file contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show format, header, per-kind sections and group counts
    Summary {
        /// Input file (.mli or .mli2)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List named groups with their member counts
    Groups {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only groups whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Summary { input, json } => cmd_summary(input, json),
            InspectCmd::Groups { input, filter } => cmd_groups(input, filter),
        }
    }
}

/// Cmd: Show file summary
fn cmd_summary(input: PathBuf, json: bool) -> Result<()> {
    let summary = meshcodec::inspect(&input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== {} ===", input.display());
    println!("Format: {}", summary.format);
    println!("Length unit: {}", format_unit(summary.header.length_unit));
    println!("Dimension: {}", summary.header.dimension);

    println!();
    println!("Sections:");
    if summary.sections.is_empty() {
        println!("  (none)");
    }
    for section in &summary.sections {
        println!(
            "  {:<7} count={} min_id={} contiguous={}",
            section.kind, section.info.count, section.info.min_id, section.info.contiguous
        );
    }

    println!();
    println!("Groups:");
    for kind in GroupKind::ALL {
        println!("  {:<8} {}", kind, summary.groups[kind.index()]);
    }

    Ok(())
}

/// Cmd: List groups
fn cmd_groups(input: PathBuf, filter: Option<String>) -> Result<()> {
    let (mesh, _) = load_mesh(&input, KindMask::all())?;

    println!("=== Groups in {} ===", input.display());
    println!();

    let mut shown = 0usize;
    for kind in GroupKind::ALL {
        for group in mesh.groups(kind) {
            if let Some(ref pattern) = filter {
                if !group.name().contains(pattern.as_str()) {
                    continue;
                }
            }
            println!("{} {:?}: {} members", kind, group.name(), group.len());
            shown += 1;
        }
    }

    if shown == 0 {
        println!("No groups found.");
    }

    Ok(())
}
