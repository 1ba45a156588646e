// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Mesh reader with format selection by suffix.
//!
//! # Example
//!
//! ```rust,no_run
//! use meshcodec::io::MeshReader;
//! use meshcodec::{KindMask, Mesh};
//!
//! let mut reader = MeshReader::open("model.mli2")?;
//! let mut mesh = Mesh::default();
//! let counts = reader.read(&mut mesh, KindMask::all())?;
//! println!("{} nodes, length unit {}", counts.nodes, reader.length_unit());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;

pub use builder::{ReaderBuilder, ReaderConfig};

use std::path::Path;

use crate::codec::{read_mesh, ReadOptions};
use crate::io::metadata::{FileFormat, FileSummary, SectionSummary};
use crate::io::traits::RecordSource;
use crate::mesh::{Mesh, MeshCounts};
use crate::{Dimension, ElementKind, GroupKind, KindMask, Result};

/// Reads meshes from one opened file.
pub struct MeshReader {
    format: FileFormat,
    config: ReaderConfig,
    source: Box<dyn RecordSource>,
}

impl MeshReader {
    /// Open `path` with default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ReaderBuilder::new().path(path).build()
    }

    pub fn path(&self) -> &Path {
        self.source.path()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Length unit stored in the file header.
    pub fn length_unit(&self) -> f64 {
        self.source.header().length_unit
    }

    pub fn dimension(&self) -> Dimension {
        self.source.header().dimension
    }

    /// Populate `mesh` with the kinds selected by `kinds` and the mesh's
    /// capability set. Nodes are always read.
    ///
    /// On failure the mesh may hold part of the file and should be
    /// discarded.
    pub fn read(&mut self, mesh: &mut Mesh, kinds: KindMask) -> Result<MeshCounts> {
        let outcome = read_mesh(mesh, self.source.as_ref(), &ReadOptions { kinds })
            .inspect_err(|e| {
                tracing::warn!(
                    context = "mesh_reader",
                    stage = ?e.stage(),
                    "Read of {} failed: {e}",
                    self.source.path().display()
                );
            })?;
        tracing::info!(
            "Read {} ({}): {} nodes, {} edges, {} faces, {} regions",
            self.source.path().display(),
            self.format,
            outcome.counts.nodes,
            outcome.counts.edges,
            outcome.counts.faces,
            outcome.counts.regions
        );
        Ok(outcome.counts)
    }

    /// Header, section and group information without building a mesh.
    pub fn summary(&self) -> FileSummary {
        let sections = ElementKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.source
                    .section(kind)
                    .map(|info| SectionSummary { kind, info })
            })
            .collect();
        FileSummary {
            path: self.source.path().to_path_buf(),
            format: self.format,
            header: *self.source.header(),
            sections,
            groups: GroupKind::ALL.map(|kind| self.source.group_count(kind)),
        }
    }
}

impl std::fmt::Debug for MeshReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshReader")
            .field("path", &self.source.path())
            .field("format", &self.format)
            .field("config", &self.config)
            .finish()
    }
}

/// Read `path` into `mesh`, choosing the format by suffix.
pub fn read<P: AsRef<Path>>(mesh: &mut Mesh, path: P, kinds: KindMask) -> Result<MeshCounts> {
    MeshReader::open(path)?.read(mesh, kinds)
}

/// Summarize the file at `path`.
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<FileSummary> {
    Ok(MeshReader::open(path)?.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writer::WriterBuilder;

    #[test]
    fn test_summary_reports_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.mli2");

        let mut mesh = Mesh::default();
        let a = mesh.new_node([0.0, 0.0, 0.0]);
        let b = mesh.new_node([1.0, 0.0, 0.0]);
        let c = mesh.new_node([0.0, 1.0, 0.0]);
        mesh.new_triangle([a, b, c]);
        let g = mesh.new_group(GroupKind::Cloud, "corners");
        if let Some(group) = mesh.group_mut(GroupKind::Cloud, g) {
            group.extend([a, b, c]);
        }

        WriterBuilder::new()
            .path(&path)
            .length_unit(0.5)
            .build()
            .unwrap()
            .write(&mesh, KindMask::NODES | KindMask::FACES, false)
            .unwrap();

        let summary = inspect(&path).unwrap();
        assert_eq!(summary.format, FileFormat::Chunked);
        assert_eq!(summary.header.length_unit, 0.5);
        let kinds: Vec<_> = summary.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ElementKind::Node, ElementKind::Face]);
        assert_eq!(summary.sections[0].info.count, 3);
        assert_eq!(summary.groups, [1, 0, 0, 0]);
    }

    #[test]
    fn test_read_reports_length_unit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.mli");

        let mut mesh = Mesh::default();
        mesh.new_node([1.0, 2.0, 3.0]);
        let mut writer = crate::io::writer::MeshWriter::create(&path).unwrap();
        writer.set_length_unit(0.001);
        writer.write(&mesh, KindMask::all(), false).unwrap();

        let mut reader = MeshReader::open(&path).unwrap();
        let mut copy = Mesh::default();
        let counts = reader.read(&mut copy, KindMask::all()).unwrap();
        assert_eq!(counts.nodes, 1);
        assert_eq!(reader.length_unit(), 0.001);
        assert_eq!(reader.dimension(), Dimension::D3);
    }
}
