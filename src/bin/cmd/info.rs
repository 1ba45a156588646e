// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Info command - supported formats and default configuration.

use clap::Args;
use serde::Serialize;

use crate::common::Result;
use meshcodec::codec::MAX_NODES_PER_ELEMENT;
use meshcodec::{FileFormat, ReaderConfig, WriterConfig};

/// Show supported formats and default configuration.
#[derive(Args, Clone, Debug)]
pub struct InfoCmd {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FormatEntry {
    format: FileFormat,
    extension: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
struct Info {
    version: &'static str,
    formats: Vec<FormatEntry>,
    max_nodes_per_element: usize,
    writer: WriterConfig,
    reader: ReaderConfig,
}

impl InfoCmd {
    pub fn run(self) -> Result<()> {
        let info = Info {
            version: env!("CARGO_PKG_VERSION"),
            formats: FileFormat::ALL
                .iter()
                .map(|&format| FormatEntry {
                    format,
                    extension: format.extension(),
                    description: format.description(),
                })
                .collect(),
            max_nodes_per_element: MAX_NODES_PER_ELEMENT,
            writer: WriterConfig::default(),
            reader: ReaderConfig::default(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }

        println!("meshcodec {}", info.version);
        println!();
        println!("Formats:");
        for entry in &info.formats {
            println!("  .{:<5} {}", entry.extension, entry.description);
        }
        println!();
        println!("Max nodes per element: {}", info.max_nodes_per_element);
        println!(
            "Writer defaults: chunk_capacity={} length_unit={}",
            info.writer.chunk_capacity, info.writer.length_unit
        );
        println!(
            "Reader defaults: chunk_capacity={} verify_checksums={}",
            info.reader.chunk_capacity, info.reader.verify_checksums
        );

        Ok(())
    }
}
