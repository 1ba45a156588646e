// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Meshcodec
//!
//! Reads and writes polytope meshes to 1-based mesh interchange files.
//!
//! A mesh holds nodes, edges, faces and regions in 0-based arenas, plus
//! named groups of each kind (clouds, lines, surfaces, volumes). The codec
//! translates between those ids and the file's 1-based ids, classifies
//! faces and regions by vertex count, and streams element data in bounded
//! chunks.
//!
//! ## Architecture
//!
//! - `core/` - Errors, element kinds and kind masks
//! - `mesh/` - The in-memory mesh container
//! - `codec/` - Id remapping, shape classification, chunking and the
//!   topology reader/writer state machines
//! - `io/` - Format detection, the `.mli` and `.mli2` record formats, and
//!   the reader/writer entry points
//!
//! ## Example: Round trip
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use meshcodec::{KindMask, Mesh};
//!
//! let mut mesh = Mesh::default();
//! let a = mesh.new_node([0.0, 0.0, 0.0]);
//! let b = mesh.new_node([1.0, 0.0, 0.0]);
//! let c = mesh.new_node([0.0, 1.0, 0.0]);
//! mesh.new_triangle([a, b, c]);
//!
//! meshcodec::write(&mesh, "triangle.mli2", KindMask::all(), false)?;
//!
//! let mut copy = Mesh::default();
//! let counts = meshcodec::read(&mut copy, "triangle.mli2", KindMask::all())?;
//! assert_eq!(counts.faces, 1);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    CodecError, Dimension, Direction, ElementKind, GroupKind, KindMask, Result, Section, Stage,
};

// Mesh container
pub mod mesh;

pub use mesh::{CellId, FaceShape, Group, Mesh, MeshCounts, MeshModel, RegionShape};

// Remapping, classification and the topology state machines
pub mod codec;

// Formats and entry points
pub mod io;

pub use io::{
    detect_format, inspect, read, write, FileFormat, FileSummary, MeshReader, MeshWriter,
    ReaderBuilder, ReaderConfig, WriterBuilder, WriterConfig,
};
