// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::io::formats::{commit_partial, discard_partial, partial_path};
use crate::io::records::{
    EdgeChunk, FaceChunk, FileHeader, MemberChunk, NodeChunk, RegionChunk, SectionInfo,
};
use crate::io::traits::RecordSink;
use crate::{CodecError, ElementKind, GroupKind, Result};

use super::{LegacyCell, LegacyDocument, LegacyGroup, LegacySection};

/// Writer for `.mli` files.
///
/// Records are collected into a [`LegacyDocument`]; the JSON text is
/// written to `<path>.partial` and renamed into place by `finish()`.
pub struct LegacySink {
    path: PathBuf,
    partial: PathBuf,
    file: Option<File>,
    document: LegacyDocument,
    open_group: Option<usize>,
}

impl LegacySink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let partial = partial_path(&path);
        let file = File::create(&partial).map_err(|e| {
            CodecError::io(format!("failed to create {}", partial.display()), e)
        })?;

        Ok(Self {
            path,
            partial,
            file: Some(file),
            document: LegacyDocument::default(),
            open_group: None,
        })
    }

    /// The document collected so far.
    pub fn document(&self) -> &LegacyDocument {
        &self.document
    }

    fn current_group(&mut self, kind: GroupKind) -> Result<&mut LegacyGroup> {
        let group = self
            .open_group
            .and_then(|index| self.document.groups.get_mut(index))
            .ok_or_else(|| {
                CodecError::corrupt("legacy writer", "group members written before a group header")
            })?;
        if group.kind != kind {
            return Err(CodecError::corrupt(
                "legacy writer",
                format!("{kind} members written into a {} group", group.kind),
            ));
        }
        Ok(group)
    }
}

impl RecordSink for LegacySink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&mut self, header: &FileHeader) -> Result<()> {
        self.document.header = *header;
        Ok(())
    }

    fn write_section(&mut self, kind: ElementKind, info: &SectionInfo) -> Result<()> {
        self.document.sections.push(LegacySection { kind, info: *info });
        Ok(())
    }

    fn write_nodes(&mut self, chunk: &NodeChunk) -> Result<()> {
        self.document.nodes.extend(chunk.records());
        Ok(())
    }

    fn write_edges(&mut self, chunk: &EdgeChunk) -> Result<()> {
        self.document.edges.extend(chunk.records());
        Ok(())
    }

    fn write_faces(&mut self, chunk: &FaceChunk) -> Result<()> {
        self.document
            .faces
            .extend(chunk.records().map(|record| LegacyCell {
                id: record.id,
                shape: None,
                nodes: record.nodes.to_vec(),
            }));
        Ok(())
    }

    fn write_regions(&mut self, chunk: &RegionChunk) -> Result<()> {
        self.document
            .regions
            .extend(chunk.records().map(|record| LegacyCell {
                id: record.id,
                shape: Some(record.shape_tag),
                nodes: record.nodes.to_vec(),
            }));
        Ok(())
    }

    fn write_group_section(&mut self, _kind: GroupKind, _group_count: u64) -> Result<()> {
        // The document stores groups in one list; counts are derived on read.
        self.open_group = None;
        Ok(())
    }

    fn write_group_header(&mut self, kind: GroupKind, name: &str, size: u64) -> Result<()> {
        self.document.groups.push(LegacyGroup {
            kind,
            name: name.to_string(),
            size,
            members: Vec::new(),
        });
        self.open_group = Some(self.document.groups.len() - 1);
        Ok(())
    }

    fn write_group_members(&mut self, kind: GroupKind, chunk: &MemberChunk) -> Result<()> {
        self.current_group(kind)?.members.extend_from_slice(&chunk.ids);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let file = self
            .file
            .take()
            .ok_or_else(|| CodecError::corrupt("legacy writer", "file already finished"))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.document)?;
        writer
            .flush()
            .map_err(|e| CodecError::io(format!("failed to flush {}", self.partial.display()), e))?;
        drop(writer);

        commit_partial(&self.partial, &self.path)?;
        tracing::debug!(
            "Legacy mesh file written: {} ({} nodes, {} groups)",
            self.path.display(),
            self.document.nodes.len(),
            self.document.groups.len()
        );
        Ok(())
    }

    fn abort(&mut self) {
        // Also covers a finish() that failed after closing the file.
        self.file = None;
        discard_partial(&self.partial);
    }
}

impl Drop for LegacySink {
    fn drop(&mut self) {
        if self.file.is_some() {
            tracing::warn!(
                context = "legacy_writer",
                "LegacySink dropped without finish(), discarding {}",
                self.partial.display()
            );
            self.abort();
        }
    }
}
