// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format-independent codec core.
//!
//! This module turns a [`Mesh`](crate::Mesh) into a stream of file records
//! and back. It knows nothing about byte layouts; those live behind the
//! [`RecordSink`](crate::io::traits::RecordSink) and
//! [`RecordSource`](crate::io::traits::RecordSource) traits.

pub mod chunk;
pub mod groups;
pub mod reader;
pub mod remap;
pub mod shape;
pub mod writer;

pub use chunk::{ChunkRecord, ChunkedStream, StreamStats, DEFAULT_CHUNK_CAPACITY};
pub use reader::{read_mesh, ReadOptions, ReadOutcome};
pub use remap::{scan_contiguity, ContiguityScan, IdBase, RemapTable};
pub use shape::{classify, classify_face, classify_region, ElementShape, MAX_NODES_PER_ELEMENT};
pub use writer::{write_mesh, WriteOptions};
