// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Convert command - read a mesh file and write it back out.

use std::path::PathBuf;

use clap::Args;

use crate::common::{load_mesh, parse_kinds, Result};
use meshcodec::{KindMask, WriterBuilder};

/// Convert a mesh file. Input and output formats follow the file suffixes.
#[derive(Args, Clone, Debug)]
pub struct ConvertCmd {
    /// Input file (.mli or .mli2)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (.mli or .mli2)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Element kinds to carry over, as letters N, E, F, R
    #[arg(short, long, default_value = "NEFR", value_parser = parse_kinds)]
    kinds: KindMask,

    /// Renumber file ids densely per kind
    #[arg(long)]
    compact: bool,

    /// Records per chunk in the output file
    #[arg(long, value_name = "N")]
    chunk_capacity: Option<usize>,

    /// Override the length unit of the output file
    #[arg(long, value_name = "UNIT")]
    length_unit: Option<f64>,
}

impl ConvertCmd {
    pub fn run(self) -> Result<()> {
        let (mesh, reader) = load_mesh(&self.input, self.kinds)?;

        let mut builder = WriterBuilder::new()
            .path(&self.output)
            .length_unit(self.length_unit.unwrap_or_else(|| reader.length_unit()));
        if let Some(capacity) = self.chunk_capacity {
            builder = builder.chunk_capacity(capacity);
        }
        let mut writer = builder.build()?;
        let counts = writer.write(&mesh, self.kinds, self.compact)?;

        println!(
            "Converted {} ({}) -> {} ({})",
            self.input.display(),
            reader.format(),
            self.output.display(),
            writer.format()
        );
        println!(
            "  {} nodes, {} edges, {} faces, {} regions, {} groups",
            counts.nodes,
            counts.edges,
            counts.faces,
            counts.regions,
            counts.groups.iter().sum::<u64>()
        );

        Ok(())
    }
}
