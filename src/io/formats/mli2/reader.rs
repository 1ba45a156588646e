// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::fs::File;
use std::ops::Range;
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};

use crate::io::records::{
    EdgeChunk, FaceChunk, FileHeader, GroupEvent, MemberChunk, NodeChunk, RegionChunk, SectionInfo,
};
use crate::io::traits::{ChunkVisitor, RecordSource};
use crate::{CodecError, ElementKind, GroupKind, Result};

use super::constants::{
    op_name, COMPRESSION_NONE, FORMAT_VERSION, MLI2_MAGIC, OP_EDGE_CHUNK, OP_FACE_CHUNK,
    OP_FOOTER, OP_GROUP_HEADER, OP_GROUP_MEMBERS, OP_GROUP_SECTION, OP_HEADER, OP_NODE_CHUNK,
    OP_REGION_CHUNK, OP_SECTION, PREAMBLE_LEN, RECORD_CRC_LEN, RECORD_PREFIX_LEN,
};
use super::layout;

/// Location of one record payload inside the mapped file.
#[derive(Debug, Clone)]
struct RecordRef {
    op: u8,
    payload: Range<usize>,
}

/// Memory-mapped reader for `.mli2` files.
///
/// `open()` walks the record framing once, checks it and builds an index
/// of chunk records per kind. Chunk payloads are decoded lazily while the
/// caller visits them, one reusable chunk buffer at a time.
pub struct ChunkedSource {
    path: PathBuf,
    mmap: memmap2::Mmap,
    header: FileHeader,
    sections: [Option<SectionInfo>; 4],
    chunks: [Vec<RecordRef>; 4],
    /// Group headers and member chunks per group kind, in file order
    groups: [Vec<RecordRef>; 4],
    group_counts: [Option<u64>; 4],
}

impl ChunkedSource {
    pub fn open<P: AsRef<Path>>(path: P, verify_checksums: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let context = path.display().to_string();

        let file = File::open(&path)
            .map_err(|e| CodecError::io(format!("failed to open {}", path.display()), e))?;
        let file_size = file
            .metadata()
            .map_err(|e| CodecError::io(format!("failed to stat {}", path.display()), e))?
            .len();
        if file_size < PREAMBLE_LEN as u64 {
            return Err(CodecError::corrupt(
                context,
                format!("file is {file_size} bytes, too short for an mli2 preamble"),
            ));
        }

        // The map is only read while `self` is alive.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| CodecError::io(format!("failed to mmap {}", path.display()), e))?;

        check_preamble(&context, &mmap)?;
        let index = RecordIndex::build(&context, &mmap, verify_checksums)?;

        tracing::debug!(
            "Indexed mli2 file {}: {} node, {} edge, {} face, {} region chunks",
            context,
            index.chunks[0].len(),
            index.chunks[1].len(),
            index.chunks[2].len(),
            index.chunks[3].len()
        );
        Ok(Self {
            path,
            mmap,
            header: index.header,
            sections: index.sections,
            chunks: index.chunks,
            groups: index.groups,
            group_counts: index.group_counts,
        })
    }

    fn visit_chunks<C: Default>(
        &self,
        kind: ElementKind,
        decode: fn(&mut std::io::Cursor<&[u8]>, &mut C) -> std::io::Result<()>,
        visit: ChunkVisitor<'_, C>,
    ) -> Result<()> {
        let context = format!("{} {kind} chunk", self.path.display());
        let mut chunk = C::default();
        for record in &self.chunks[kind.code() as usize] {
            layout::decode(&context, &self.mmap[record.payload.clone()], |cursor| {
                decode(cursor, &mut chunk)
            })?;
            visit(&chunk)?;
        }
        Ok(())
    }
}

/// Record locations collected by one pass over the file.
#[derive(Default)]
struct RecordIndex {
    header: FileHeader,
    sections: [Option<SectionInfo>; 4],
    chunks: [Vec<RecordRef>; 4],
    groups: [Vec<RecordRef>; 4],
    group_counts: [Option<u64>; 4],
}

impl RecordIndex {
    /// Walk every record, validating framing and checksums.
    fn build(context: &str, data: &[u8], verify_checksums: bool) -> Result<Self> {
        let mut index = Self::default();
        let mut pos = PREAMBLE_LEN;
        let mut records = 0u64;
        let mut header = None;
        let mut footer = None;

        while pos < data.len() {
            if footer.is_some() {
                return Err(CodecError::corrupt(
                    context,
                    format!("data after footer at offset {pos}"),
                ));
            }
            if data.len() - pos < RECORD_PREFIX_LEN {
                return Err(truncated(context, pos));
            }
            let op = data[pos];
            let len = LittleEndian::read_u64(&data[pos + 1..pos + RECORD_PREFIX_LEN]);
            let start = pos + RECORD_PREFIX_LEN;
            let end = usize::try_from(len)
                .ok()
                .and_then(|len| start.checked_add(len))
                .filter(|&end| {
                    end.checked_add(RECORD_CRC_LEN)
                        .is_some_and(|crc_end| crc_end <= data.len())
                })
                .ok_or_else(|| truncated(context, pos))?;

            if verify_checksums {
                let stored = LittleEndian::read_u32(&data[end..end + RECORD_CRC_LEN]);
                let actual = crc32fast::hash(&data[start..end]);
                if stored != actual {
                    return Err(CodecError::corrupt(
                        context,
                        format!(
                            "checksum mismatch in {} record at offset {pos}: stored {stored:#010x}, computed {actual:#010x}",
                            op_name(op)
                        ),
                    ));
                }
            }

            let record = RecordRef {
                op,
                payload: start..end,
            };
            let payload = &data[start..end];
            match op {
                OP_HEADER => {
                    if header.is_some() {
                        return Err(CodecError::corrupt(context, "duplicate header record"));
                    }
                    header = Some(layout::decode(context, payload, layout::decode_header)?);
                }
                OP_SECTION => {
                    let (kind, info) = layout::decode(context, payload, layout::decode_section)?;
                    let slot = &mut index.sections[kind.code() as usize];
                    if slot.is_some() {
                        return Err(CodecError::corrupt(
                            context,
                            format!("duplicate {kind} section"),
                        ));
                    }
                    *slot = Some(info);
                }
                OP_NODE_CHUNK | OP_EDGE_CHUNK | OP_FACE_CHUNK | OP_REGION_CHUNK => {
                    let kind = chunk_kind(op);
                    if index.sections[kind.code() as usize].is_none() {
                        return Err(CodecError::corrupt(
                            context,
                            format!("{} before the {kind} section header", op_name(op)),
                        ));
                    }
                    index.chunks[kind.code() as usize].push(record);
                }
                OP_GROUP_SECTION => {
                    let (kind, count) =
                        layout::decode(context, payload, layout::decode_group_section)?;
                    let slot = &mut index.group_counts[kind.index()];
                    if slot.is_some() {
                        return Err(CodecError::corrupt(
                            context,
                            format!("duplicate {kind} group section"),
                        ));
                    }
                    *slot = Some(count);
                }
                OP_GROUP_HEADER | OP_GROUP_MEMBERS => {
                    let code = payload.first().copied().unwrap_or(u8::MAX);
                    let kind = GroupKind::from_code(code).ok_or_else(|| {
                        CodecError::corrupt(
                            context,
                            format!("{} with unknown group kind {code}", op_name(op)),
                        )
                    })?;
                    index.groups[kind.index()].push(record);
                }
                OP_FOOTER => {
                    footer = Some(layout::decode(context, payload, layout::decode_footer)?);
                }
                other => {
                    return Err(CodecError::corrupt(
                        context,
                        format!("unknown record opcode {other:#04x} at offset {pos}"),
                    ));
                }
            }
            if op != OP_FOOTER {
                records += 1;
            }
            pos = end + RECORD_CRC_LEN;
        }

        match footer {
            None => {
                return Err(CodecError::corrupt(
                    context,
                    "missing footer, the file was not finalized",
                ))
            }
            Some(expected) if expected != records => {
                return Err(CodecError::corrupt(
                    context,
                    format!("footer announces {expected} records, found {records}"),
                ))
            }
            Some(_) => {}
        }
        index.header =
            header.ok_or_else(|| CodecError::corrupt(context, "missing header record"))?;
        Ok(index)
    }
}

fn check_preamble(context: &str, data: &[u8]) -> Result<()> {
    if data[..MLI2_MAGIC.len()] != MLI2_MAGIC {
        return Err(CodecError::corrupt(context, "bad magic, not an mli2 file"));
    }
    let version = LittleEndian::read_u16(&data[MLI2_MAGIC.len()..MLI2_MAGIC.len() + 2]);
    if version != FORMAT_VERSION {
        return Err(CodecError::corrupt(
            context,
            format!("unsupported mli2 version {version}"),
        ));
    }
    let compression = data[MLI2_MAGIC.len() + 2];
    if compression != COMPRESSION_NONE {
        return Err(CodecError::not_implemented(format!(
            "compressed mli2 files (compression {compression})"
        )));
    }
    Ok(())
}

fn chunk_kind(op: u8) -> ElementKind {
    match op {
        OP_NODE_CHUNK => ElementKind::Node,
        OP_EDGE_CHUNK => ElementKind::Edge,
        OP_FACE_CHUNK => ElementKind::Face,
        _ => ElementKind::Region,
    }
}

fn truncated(context: &str, offset: usize) -> CodecError {
    CodecError::corrupt(context, format!("truncated record at offset {offset}"))
}

impl RecordSource for ChunkedSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn header(&self) -> &FileHeader {
        &self.header
    }

    fn section(&self, kind: ElementKind) -> Option<SectionInfo> {
        self.sections[kind.code() as usize]
    }

    fn group_count(&self, kind: GroupKind) -> u64 {
        self.group_counts[kind.index()].unwrap_or(0)
    }

    fn visit_nodes(&self, visit: ChunkVisitor<'_, NodeChunk>) -> Result<()> {
        self.visit_chunks(ElementKind::Node, layout::decode_nodes, visit)
    }

    fn visit_edges(&self, visit: ChunkVisitor<'_, EdgeChunk>) -> Result<()> {
        self.visit_chunks(ElementKind::Edge, layout::decode_edges, visit)
    }

    fn visit_faces(&self, visit: ChunkVisitor<'_, FaceChunk>) -> Result<()> {
        self.visit_chunks(ElementKind::Face, layout::decode_faces, visit)
    }

    fn visit_regions(&self, visit: ChunkVisitor<'_, RegionChunk>) -> Result<()> {
        self.visit_chunks(ElementKind::Region, layout::decode_regions, visit)
    }

    fn visit_groups(
        &self,
        kind: GroupKind,
        visit: &mut dyn FnMut(GroupEvent<'_>) -> Result<()>,
    ) -> Result<()> {
        let context = format!("{} {kind} groups", self.path.display());
        let mut name = String::new();
        let mut members = MemberChunk::default();
        for record in &self.groups[kind.index()] {
            let payload = &self.mmap[record.payload.clone()];
            match record.op {
                OP_GROUP_HEADER => {
                    let (_, size) = layout::decode(&context, payload, |cursor| {
                        layout::decode_group_header(cursor, &mut name)
                    })?;
                    visit(GroupEvent::Begin { name: &name, size })?;
                }
                _ => {
                    layout::decode(&context, payload, |cursor| {
                        layout::decode_group_members(cursor, &mut members)
                    })?;
                    visit(GroupEvent::Members(&members.ids))?;
                }
            }
        }
        Ok(())
    }
}
