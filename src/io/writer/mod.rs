// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Mesh writer with format selection by suffix.
//!
//! # Example
//!
//! ```rust,no_run
//! use meshcodec::io::MeshWriter;
//! use meshcodec::{KindMask, Mesh};
//!
//! let mut mesh = Mesh::default();
//! let a = mesh.new_node([0.0, 0.0, 0.0]);
//! let b = mesh.new_node([1.0, 0.0, 0.0]);
//! mesh.new_edge([a, b]);
//!
//! let mut writer = MeshWriter::create("segment.mli2")?;
//! writer.write(&mesh, KindMask::all(), false)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;

pub use builder::{WriterBuilder, WriterConfig};

use std::path::Path;

use crate::codec::{write_mesh, WriteOptions};
use crate::io::formats::create_sink;
use crate::io::metadata::FileFormat;
use crate::mesh::{Mesh, MeshCounts};
use crate::{KindMask, Result, Section, Stage};

/// Writes meshes to one target path.
///
/// Each [`write`](Self::write) call produces a complete file; the target
/// only appears once the write has succeeded.
#[derive(Debug, Clone)]
pub struct MeshWriter {
    path: std::path::PathBuf,
    format: FileFormat,
    config: WriterConfig,
}

impl MeshWriter {
    /// Create a writer for `path` with default configuration.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        WriterBuilder::new().path(path).build()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Length unit for subsequent writes. The last value set wins.
    pub fn set_length_unit(&mut self, unit: f64) {
        self.config.length_unit = unit;
    }

    pub fn length_unit(&self) -> f64 {
        self.config.length_unit
    }

    /// Record a compression request.
    ///
    /// Compression is not supported by either format; files are always
    /// written uncompressed.
    pub fn activate_compression(&mut self) {
        self.config.compression = true;
        tracing::warn!(
            context = "mesh_writer",
            "Compression requested for {} but not supported, writing uncompressed",
            self.path.display()
        );
    }

    /// Write the kinds of `mesh` selected by `kinds` and its capability set.
    ///
    /// With `compact` set, file ids are renumbered `1..=n` per kind;
    /// otherwise each file id is the mesh id plus one. On failure no file
    /// is left at the target path.
    pub fn write(&mut self, mesh: &Mesh, kinds: KindMask, compact: bool) -> Result<MeshCounts> {
        let mut sink = create_sink(self.format, &self.path)
            .map_err(|e| e.in_stage(Stage::write(Section::Header)))?;
        let options = WriteOptions {
            kinds,
            compact,
            chunk_capacity: self.config.chunk_capacity,
            length_unit: self.config.length_unit,
        };

        let result = write_mesh(mesh, sink.as_mut(), &options).and_then(|counts| {
            sink.finish()
                .map_err(|e| e.in_stage(Stage::write(Section::Finish)))?;
            Ok(counts)
        });

        match result {
            Ok(counts) => {
                tracing::info!(
                    "Wrote {} ({}): {} nodes, {} edges, {} faces, {} regions",
                    self.path.display(),
                    self.format,
                    counts.nodes,
                    counts.edges,
                    counts.faces,
                    counts.regions
                );
                Ok(counts)
            }
            Err(e) => {
                sink.abort();
                tracing::warn!(
                    context = "mesh_writer",
                    stage = ?e.stage(),
                    "Write to {} failed: {e}",
                    self.path.display()
                );
                Err(e)
            }
        }
    }
}

/// Write `mesh` to `path`, choosing the format by suffix.
pub fn write<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    kinds: KindMask,
    compact: bool,
) -> Result<MeshCounts> {
    MeshWriter::create(path)?.write(mesh, kinds, compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::partial_path;
    use crate::CodecError;

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mli2");

        let mut mesh = Mesh::default();
        let nodes: Vec<_> = (0..16).map(|i| mesh.new_node([i as f64, 0.0, 0.0])).collect();
        mesh.new_polygon(&nodes[..5]).unwrap();
        // The polygon now refers to a node that no longer exists.
        mesh.remove_node(nodes[0]);
        let mut writer = MeshWriter::create(&path).unwrap();

        let err = writer.write(&mesh, KindMask::all(), false).unwrap_err();
        assert!(matches!(err.root(), CodecError::DanglingReference { .. }));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_compression_is_recorded_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packed.mli2");
        let mut writer = MeshWriter::create(&path).unwrap();
        writer.activate_compression();
        assert!(writer.config().compression);

        let mut mesh = Mesh::default();
        mesh.new_node([0.0; 3]);
        writer.write(&mesh, KindMask::all(), false).unwrap();
        // Preamble byte 10 is the compression code.
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[10], 0);
    }

    #[test]
    fn test_set_length_unit_last_wins() {
        let mut writer = MeshWriter::create("unused.mli").unwrap();
        writer.set_length_unit(0.1);
        writer.set_length_unit(0.001);
        assert_eq!(writer.length_unit(), 0.001);
    }
}
