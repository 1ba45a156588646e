// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record-level traits implemented by each interchange format.
//!
//! The codec talks to a file only through these two traits. A format
//! back end decides how records are laid out on disk; the codec decides
//! which records are emitted and in which order.

use std::path::Path;

use crate::io::records::{
    EdgeChunk, FaceChunk, FileHeader, GroupEvent, MemberChunk, NodeChunk, RegionChunk,
    SectionInfo,
};
use crate::{ElementKind, GroupKind, Result};

/// Write side of an interchange file.
///
/// Records arrive in file order: header, then for each written kind a
/// section record followed by its chunks, then group sections. Nothing is
/// visible under the target path until [`finish`](RecordSink::finish)
/// succeeds.
pub trait RecordSink {
    /// Target path of the file.
    fn path(&self) -> &Path;

    fn write_header(&mut self, header: &FileHeader) -> Result<()>;

    /// Per-kind `(isContiguous, count, minID)` header.
    fn write_section(&mut self, kind: ElementKind, info: &SectionInfo) -> Result<()>;

    fn write_nodes(&mut self, chunk: &NodeChunk) -> Result<()>;

    fn write_edges(&mut self, chunk: &EdgeChunk) -> Result<()>;

    fn write_faces(&mut self, chunk: &FaceChunk) -> Result<()>;

    fn write_regions(&mut self, chunk: &RegionChunk) -> Result<()>;

    /// Announce the number of groups of one kind.
    fn write_group_section(&mut self, kind: GroupKind, group_count: u64) -> Result<()>;

    /// Start a group: `(name, size)`.
    fn write_group_header(&mut self, kind: GroupKind, name: &str, size: u64) -> Result<()>;

    /// A chunk of member ids of the group started last.
    fn write_group_members(&mut self, kind: GroupKind, chunk: &MemberChunk) -> Result<()>;

    /// Finalize the file and move it to its target path.
    fn finish(&mut self) -> Result<()>;

    /// Discard everything written so far.
    fn abort(&mut self);
}

/// Callback receiving one decoded chunk at a time.
pub type ChunkVisitor<'a, C> = &'a mut dyn FnMut(&C) -> Result<()>;

/// Read side of an interchange file.
///
/// Chunk visits can be repeated; the codec scans each kind twice (measure,
/// then populate).
pub trait RecordSource {
    fn path(&self) -> &Path;

    fn header(&self) -> &FileHeader;

    /// Section header of a kind, `None` if the file has no such section.
    fn section(&self, kind: ElementKind) -> Option<SectionInfo>;

    /// Number of groups of one kind stored in the file.
    fn group_count(&self, kind: GroupKind) -> u64;

    fn visit_nodes(&self, visit: ChunkVisitor<'_, NodeChunk>) -> Result<()>;

    fn visit_edges(&self, visit: ChunkVisitor<'_, EdgeChunk>) -> Result<()>;

    fn visit_faces(&self, visit: ChunkVisitor<'_, FaceChunk>) -> Result<()>;

    fn visit_regions(&self, visit: ChunkVisitor<'_, RegionChunk>) -> Result<()>;

    /// Stream the group records of one kind.
    fn visit_groups(
        &self,
        kind: GroupKind,
        visit: &mut dyn FnMut(GroupEvent<'_>) -> Result<()>,
    ) -> Result<()>;
}
