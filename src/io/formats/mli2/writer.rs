// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::io::formats::{commit_partial, discard_partial, partial_path};
use crate::io::records::{
    EdgeChunk, FaceChunk, FileHeader, MemberChunk, NodeChunk, RegionChunk, SectionInfo,
};
use crate::io::traits::RecordSink;
use crate::{CodecError, ElementKind, GroupKind, Result};

use super::constants::{
    op_name, COMPRESSION_NONE, FORMAT_VERSION, MLI2_MAGIC, OP_EDGE_CHUNK, OP_FACE_CHUNK,
    OP_FOOTER, OP_GROUP_HEADER, OP_GROUP_MEMBERS, OP_GROUP_SECTION, OP_HEADER, OP_NODE_CHUNK,
    OP_REGION_CHUNK, OP_SECTION,
};
use super::layout;

/// Streaming writer for `.mli2` files.
///
/// Every chunk handed to the sink becomes one framed record and goes
/// straight to disk, so memory use is bounded by the chunk capacity.
pub struct ChunkedSink {
    path: PathBuf,
    partial: PathBuf,
    writer: Option<BufWriter<File>>,
    /// Reused payload buffer
    payload: Vec<u8>,
    records: u64,
    bytes: u64,
}

impl ChunkedSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let partial = partial_path(&path);
        let file = File::create(&partial).map_err(|e| {
            CodecError::io(format!("failed to create {}", partial.display()), e)
        })?;

        let mut writer = BufWriter::new(file);
        let preamble = (|| -> io::Result<()> {
            writer.write_all(&MLI2_MAGIC)?;
            writer.write_u16::<LittleEndian>(FORMAT_VERSION)?;
            writer.write_u8(COMPRESSION_NONE)
        })();
        if let Err(e) = preamble {
            drop(writer);
            discard_partial(&partial);
            return Err(CodecError::io("failed to write mli2 preamble", e));
        }

        tracing::debug!("Created mli2 staging file {}", partial.display());
        Ok(Self {
            path,
            partial,
            writer: Some(writer),
            payload: Vec::with_capacity(64 * 1024),
            records: 0,
            bytes: (MLI2_MAGIC.len() + 3) as u64,
        })
    }

    /// Number of records written so far, footer excluded.
    pub fn records_written(&self) -> u64 {
        self.records
    }

    /// Encode one payload with `encode` and write it as an `op` record.
    fn emit(
        &mut self,
        op: u8,
        encode: impl FnOnce(&mut Vec<u8>) -> io::Result<()>,
    ) -> Result<()> {
        self.payload.clear();
        encode(&mut self.payload).map_err(|e| {
            CodecError::corrupt("mli2 writer", format!("cannot encode {}: {e}", op_name(op)))
        })?;

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| CodecError::corrupt("mli2 writer", "file already finished"))?;
        let crc = crc32fast::hash(&self.payload);
        let payload = &self.payload;
        (|| -> io::Result<()> {
            writer.write_u8(op)?;
            writer.write_u64::<LittleEndian>(payload.len() as u64)?;
            writer.write_all(payload)?;
            writer.write_u32::<LittleEndian>(crc)
        })()
        .map_err(|e| CodecError::io(format!("failed to write {} record", op_name(op)), e))?;

        self.bytes += (1 + 8 + payload.len() + 4) as u64;
        if op != OP_FOOTER {
            self.records += 1;
        }
        Ok(())
    }
}

impl RecordSink for ChunkedSink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&mut self, header: &FileHeader) -> Result<()> {
        self.emit(OP_HEADER, |buf| layout::encode_header(buf, header))
    }

    fn write_section(&mut self, kind: ElementKind, info: &SectionInfo) -> Result<()> {
        self.emit(OP_SECTION, |buf| layout::encode_section(buf, kind, info))
    }

    fn write_nodes(&mut self, chunk: &NodeChunk) -> Result<()> {
        self.emit(OP_NODE_CHUNK, |buf| layout::encode_nodes(buf, chunk))
    }

    fn write_edges(&mut self, chunk: &EdgeChunk) -> Result<()> {
        self.emit(OP_EDGE_CHUNK, |buf| layout::encode_edges(buf, chunk))
    }

    fn write_faces(&mut self, chunk: &FaceChunk) -> Result<()> {
        self.emit(OP_FACE_CHUNK, |buf| layout::encode_faces(buf, chunk))
    }

    fn write_regions(&mut self, chunk: &RegionChunk) -> Result<()> {
        self.emit(OP_REGION_CHUNK, |buf| layout::encode_regions(buf, chunk))
    }

    fn write_group_section(&mut self, kind: GroupKind, group_count: u64) -> Result<()> {
        self.emit(OP_GROUP_SECTION, |buf| {
            layout::encode_group_section(buf, kind, group_count)
        })
    }

    fn write_group_header(&mut self, kind: GroupKind, name: &str, size: u64) -> Result<()> {
        self.emit(OP_GROUP_HEADER, |buf| {
            layout::encode_group_header(buf, kind, name, size)
        })
    }

    fn write_group_members(&mut self, kind: GroupKind, chunk: &MemberChunk) -> Result<()> {
        self.emit(OP_GROUP_MEMBERS, |buf| {
            layout::encode_group_members(buf, kind, chunk)
        })
    }

    fn finish(&mut self) -> Result<()> {
        let records = self.records;
        self.emit(OP_FOOTER, |buf| layout::encode_footer(buf, records))?;

        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| CodecError::corrupt("mli2 writer", "file already finished"))?;
        writer
            .flush()
            .map_err(|e| CodecError::io(format!("failed to flush {}", self.partial.display()), e))?;
        drop(writer);

        commit_partial(&self.partial, &self.path)?;
        tracing::debug!(
            "Mli2 mesh file written: {} ({} records, {} bytes)",
            self.path.display(),
            self.records,
            self.bytes
        );
        Ok(())
    }

    fn abort(&mut self) {
        // Also covers a finish() that failed after closing the file.
        self.writer = None;
        discard_partial(&self.partial);
    }
}

impl Drop for ChunkedSink {
    fn drop(&mut self) {
        if self.writer.is_some() {
            tracing::warn!(
                context = "mli2_writer",
                "ChunkedSink dropped without finish(), discarding {}",
                self.partial.display()
            );
            self.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_renames_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.mli2");

        let mut sink = ChunkedSink::create(&path).unwrap();
        assert!(partial_path(&path).exists());
        sink.write_header(&FileHeader::default()).unwrap();
        sink.finish().unwrap();

        assert!(path.exists());
        assert!(!partial_path(&path).exists());
        assert_eq!(sink.records_written(), 1);
    }

    #[test]
    fn test_drop_discards_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.mli2");
        {
            let mut sink = ChunkedSink::create(&path).unwrap();
            sink.write_header(&FileHeader::default()).unwrap();
        }
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_write_after_finish_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ChunkedSink::create(dir.path().join("mesh.mli2")).unwrap();
        sink.finish().unwrap();
        assert!(sink.write_header(&FileHeader::default()).is_err());
    }
}
