// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::codec::chunk::{ChunkRecord, ChunkedStream};
use crate::codec::shape::check_capacity;
use crate::io::records::{
    CellRecord, EdgeChunk, FaceChunk, FileHeader, GroupEvent, NodeChunk, RegionChunk,
    RegionRecord, SectionInfo,
};
use crate::io::traits::{ChunkVisitor, RecordSource};
use crate::{CodecError, ElementKind, GroupKind, Result};

use super::{LegacyCell, LegacyDocument, LEGACY_FORMAT_TAG, LEGACY_VERSION};

/// Reader for `.mli` files.
///
/// The document is loaded whole and replayed in chunks of
/// `chunk_capacity` records.
#[derive(Debug)]
pub struct LegacySource {
    path: PathBuf,
    document: LegacyDocument,
    chunk_capacity: usize,
}

impl LegacySource {
    pub fn open<P: AsRef<Path>>(path: P, chunk_capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| CodecError::io(format!("failed to open {}", path.display()), e))?;
        let document: LegacyDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CodecError::corrupt(path.display().to_string(), e.to_string()))?;
        Self::from_document(path, document, chunk_capacity)
    }

    /// Serve an already parsed document.
    pub fn from_document(
        path: impl Into<PathBuf>,
        document: LegacyDocument,
        chunk_capacity: usize,
    ) -> Result<Self> {
        let path = path.into();
        if document.format != LEGACY_FORMAT_TAG {
            return Err(CodecError::corrupt(
                path.display().to_string(),
                format!("format tag '{}' is not '{LEGACY_FORMAT_TAG}'", document.format),
            ));
        }
        if document.version != LEGACY_VERSION {
            return Err(CodecError::corrupt(
                path.display().to_string(),
                format!("unsupported legacy document version {}", document.version),
            ));
        }
        if chunk_capacity == 0 {
            return Err(CodecError::invalid_config("chunk capacity must be at least 1"));
        }
        Ok(Self {
            path,
            document,
            chunk_capacity,
        })
    }

    pub fn document(&self) -> &LegacyDocument {
        &self.document
    }

    fn replay<'d, C, I>(&self, items: I, visit: ChunkVisitor<'_, C>) -> Result<()>
    where
        C: ChunkRecord,
        I: Iterator<Item = C::Item<'d>>,
    {
        let mut stream = ChunkedStream::<C>::new(self.chunk_capacity)?;
        for item in items {
            stream.push(item, |chunk| visit(chunk))?;
        }
        stream.finish(|chunk| visit(chunk))?;
        Ok(())
    }
}

/// Binary chunks store vertex counts in one byte, so oversized cells must
/// be rejected before they are replayed.
fn check_cells(kind: ElementKind, cells: &[LegacyCell]) -> Result<()> {
    cells
        .iter()
        .try_for_each(|cell| check_capacity(kind, cell.id, cell.nodes.len()))
}

impl RecordSource for LegacySource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn header(&self) -> &FileHeader {
        &self.document.header
    }

    fn section(&self, kind: ElementKind) -> Option<SectionInfo> {
        self.document.section(kind)
    }

    fn group_count(&self, kind: GroupKind) -> u64 {
        self.document.groups_of(kind).count() as u64
    }

    fn visit_nodes(&self, visit: ChunkVisitor<'_, NodeChunk>) -> Result<()> {
        self.replay::<NodeChunk, _>(self.document.nodes.iter().copied(), visit)
    }

    fn visit_edges(&self, visit: ChunkVisitor<'_, EdgeChunk>) -> Result<()> {
        self.replay::<EdgeChunk, _>(self.document.edges.iter().copied(), visit)
    }

    fn visit_faces(&self, visit: ChunkVisitor<'_, FaceChunk>) -> Result<()> {
        check_cells(ElementKind::Face, &self.document.faces)?;
        let cells = self.document.faces.iter().map(|cell| CellRecord {
            id: cell.id,
            nodes: &cell.nodes,
        });
        self.replay::<FaceChunk, _>(cells, visit)
    }

    fn visit_regions(&self, visit: ChunkVisitor<'_, RegionChunk>) -> Result<()> {
        check_cells(ElementKind::Region, &self.document.regions)?;
        let mut missing = None;
        let cells = self.document.regions.iter().map(|cell| {
            if cell.shape.is_none() && missing.is_none() {
                missing = Some(cell.id);
            }
            RegionRecord {
                id: cell.id,
                shape_tag: cell.shape.unwrap_or(0),
                nodes: &cell.nodes,
            }
        });
        self.replay::<RegionChunk, _>(cells, visit)?;
        match missing {
            Some(id) => Err(CodecError::corrupt(
                self.path.display().to_string(),
                format!("region {id} has no shape tag"),
            )),
            None => Ok(()),
        }
    }

    fn visit_groups(
        &self,
        kind: GroupKind,
        visit: &mut dyn FnMut(GroupEvent<'_>) -> Result<()>,
    ) -> Result<()> {
        for group in self.document.groups_of(kind) {
            visit(GroupEvent::Begin {
                name: &group.name,
                size: group.size,
            })?;
            for members in group.members.chunks(self.chunk_capacity) {
                visit(GroupEvent::Members(members))?;
            }
        }
        Ok(())
    }
}
