// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for mesh interchange files.
//!
//! This module provides format detection, the record vocabulary shared by
//! both file formats, and the reader/writer entry points.

pub mod detection;
pub mod formats;
pub mod metadata;
pub mod records;

// Re-exports
pub use detection::{detect_format, is_mesh_file};
pub use metadata::{FileFormat, FileSummary, SectionSummary};
pub use records::{FileHeader, SectionInfo};

// Record-level seams between the codec and the formats
pub mod traits;
pub use traits::{RecordSink, RecordSource};

// Format-dispatching reader/writer
pub mod reader;
pub mod writer;
pub use reader::{inspect, read, MeshReader, ReaderBuilder, ReaderConfig};
pub use writer::{write, MeshWriter, WriterBuilder, WriterConfig};
