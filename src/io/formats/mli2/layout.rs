// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload encoding of `.mli2` records.
//!
//! Encoders append to a payload buffer, decoders read from a payload slice
//! into reusable chunk buffers. Array lengths are `u32` element counts.

use std::io::{self, Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::io::records::{
    EdgeChunk, FaceChunk, FileHeader, MemberChunk, NodeChunk, RegionChunk, SectionInfo,
};
use crate::{CodecError, Dimension, ElementKind, GroupKind, Result};

fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

fn len_u32(len: usize) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| invalid(format!("array of {len} entries is too long")))
}

fn put_u64s(buf: &mut Vec<u8>, values: &[u64]) -> io::Result<()> {
    for &value in values {
        buf.write_u64::<LittleEndian>(value)?;
    }
    Ok(())
}

fn put_f64s(buf: &mut Vec<u8>, values: &[f64]) -> io::Result<()> {
    for &value in values {
        buf.write_f64::<LittleEndian>(value)?;
    }
    Ok(())
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len().saturating_sub(cursor.position() as usize)
}

fn take_u64s(cursor: &mut Cursor<&[u8]>, n: usize, out: &mut Vec<u64>) -> io::Result<()> {
    out.clear();
    out.reserve(n.min(remaining(cursor) / 8));
    for _ in 0..n {
        out.push(cursor.read_u64::<LittleEndian>()?);
    }
    Ok(())
}

fn take_f64s(cursor: &mut Cursor<&[u8]>, n: usize, out: &mut Vec<f64>) -> io::Result<()> {
    out.clear();
    out.reserve(n.min(remaining(cursor) / 8));
    for _ in 0..n {
        out.push(cursor.read_f64::<LittleEndian>()?);
    }
    Ok(())
}

fn take_bytes(cursor: &mut Cursor<&[u8]>, n: usize, out: &mut Vec<u8>) -> io::Result<()> {
    if n > remaining(cursor) {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "byte array runs past the record",
        ));
    }
    out.clear();
    out.resize(n, 0);
    cursor.read_exact(out)
}

/// Decode a whole payload; leftover bytes are an error.
pub fn decode<T>(
    context: &str,
    payload: &[u8],
    f: impl FnOnce(&mut Cursor<&[u8]>) -> io::Result<T>,
) -> Result<T> {
    let mut cursor = Cursor::new(payload);
    let value = f(&mut cursor).map_err(|e| CodecError::corrupt(context, e.to_string()))?;
    if remaining(&cursor) != 0 {
        return Err(CodecError::corrupt(
            context,
            format!("{} trailing bytes in record", remaining(&cursor)),
        ));
    }
    Ok(value)
}

// =============================================================================
// Header and sections
// =============================================================================

pub fn encode_header(buf: &mut Vec<u8>, header: &FileHeader) -> io::Result<()> {
    buf.write_f64::<LittleEndian>(header.length_unit)?;
    buf.write_u8(header.dimension.as_u8())
}

pub fn decode_header(cursor: &mut Cursor<&[u8]>) -> io::Result<FileHeader> {
    let length_unit = cursor.read_f64::<LittleEndian>()?;
    let code = cursor.read_u8()?;
    let dimension =
        Dimension::from_u8(code).ok_or_else(|| invalid(format!("unknown dimension tag {code}")))?;
    Ok(FileHeader {
        length_unit,
        dimension,
    })
}

pub fn encode_section(buf: &mut Vec<u8>, kind: ElementKind, info: &SectionInfo) -> io::Result<()> {
    buf.write_u8(kind.code())?;
    buf.write_u8(u8::from(info.contiguous))?;
    buf.write_u64::<LittleEndian>(info.count)?;
    buf.write_u64::<LittleEndian>(info.min_id)
}

pub fn decode_section(cursor: &mut Cursor<&[u8]>) -> io::Result<(ElementKind, SectionInfo)> {
    let kind = decode_element_kind(cursor)?;
    let contiguous = match cursor.read_u8()? {
        0 => false,
        1 => true,
        other => return Err(invalid(format!("contiguity flag {other} is not 0 or 1"))),
    };
    let count = cursor.read_u64::<LittleEndian>()?;
    let min_id = cursor.read_u64::<LittleEndian>()?;
    Ok((
        kind,
        SectionInfo {
            contiguous,
            count,
            min_id,
        },
    ))
}

fn decode_element_kind(cursor: &mut Cursor<&[u8]>) -> io::Result<ElementKind> {
    let code = cursor.read_u8()?;
    ElementKind::from_code(code).ok_or_else(|| invalid(format!("unknown element kind {code}")))
}

pub fn decode_group_kind(cursor: &mut Cursor<&[u8]>) -> io::Result<GroupKind> {
    let code = cursor.read_u8()?;
    GroupKind::from_code(code).ok_or_else(|| invalid(format!("unknown group kind {code}")))
}

// =============================================================================
// Element chunks
// =============================================================================

pub fn encode_nodes(buf: &mut Vec<u8>, chunk: &NodeChunk) -> io::Result<()> {
    buf.write_u32::<LittleEndian>(len_u32(chunk.ids.len())?)?;
    put_u64s(buf, &chunk.ids)?;
    put_f64s(buf, &chunk.xs)?;
    put_f64s(buf, &chunk.ys)?;
    put_f64s(buf, &chunk.zs)
}

pub fn decode_nodes(cursor: &mut Cursor<&[u8]>, chunk: &mut NodeChunk) -> io::Result<()> {
    let n = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, n, &mut chunk.ids)?;
    take_f64s(cursor, n, &mut chunk.xs)?;
    take_f64s(cursor, n, &mut chunk.ys)?;
    take_f64s(cursor, n, &mut chunk.zs)
}

pub fn encode_edges(buf: &mut Vec<u8>, chunk: &EdgeChunk) -> io::Result<()> {
    buf.write_u32::<LittleEndian>(len_u32(chunk.ids.len())?)?;
    put_u64s(buf, &chunk.ids)?;
    put_u64s(buf, &chunk.connectivity)
}

pub fn decode_edges(cursor: &mut Cursor<&[u8]>, chunk: &mut EdgeChunk) -> io::Result<()> {
    let n = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, n, &mut chunk.ids)?;
    take_u64s(cursor, n * 2, &mut chunk.connectivity)
}

pub fn encode_faces(buf: &mut Vec<u8>, chunk: &FaceChunk) -> io::Result<()> {
    buf.write_u32::<LittleEndian>(len_u32(chunk.ids.len())?)?;
    put_u64s(buf, &chunk.ids)?;
    buf.extend_from_slice(&chunk.vertex_counts);
    buf.write_u32::<LittleEndian>(len_u32(chunk.connectivity.len())?)?;
    put_u64s(buf, &chunk.connectivity)
}

pub fn decode_faces(cursor: &mut Cursor<&[u8]>, chunk: &mut FaceChunk) -> io::Result<()> {
    let n = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, n, &mut chunk.ids)?;
    take_bytes(cursor, n, &mut chunk.vertex_counts)?;
    let connectivity = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, connectivity, &mut chunk.connectivity)
}

pub fn encode_regions(buf: &mut Vec<u8>, chunk: &RegionChunk) -> io::Result<()> {
    buf.write_u32::<LittleEndian>(len_u32(chunk.ids.len())?)?;
    put_u64s(buf, &chunk.ids)?;
    buf.extend_from_slice(&chunk.vertex_counts);
    buf.extend_from_slice(&chunk.shape_tags);
    buf.write_u32::<LittleEndian>(len_u32(chunk.connectivity.len())?)?;
    put_u64s(buf, &chunk.connectivity)
}

pub fn decode_regions(cursor: &mut Cursor<&[u8]>, chunk: &mut RegionChunk) -> io::Result<()> {
    let n = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, n, &mut chunk.ids)?;
    take_bytes(cursor, n, &mut chunk.vertex_counts)?;
    take_bytes(cursor, n, &mut chunk.shape_tags)?;
    let connectivity = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, connectivity, &mut chunk.connectivity)
}

// =============================================================================
// Groups
// =============================================================================

pub fn encode_group_section(buf: &mut Vec<u8>, kind: GroupKind, count: u64) -> io::Result<()> {
    buf.write_u8(kind.code())?;
    buf.write_u64::<LittleEndian>(count)
}

pub fn decode_group_section(cursor: &mut Cursor<&[u8]>) -> io::Result<(GroupKind, u64)> {
    let kind = decode_group_kind(cursor)?;
    Ok((kind, cursor.read_u64::<LittleEndian>()?))
}

pub fn encode_group_header(
    buf: &mut Vec<u8>,
    kind: GroupKind,
    name: &str,
    size: u64,
) -> io::Result<()> {
    buf.write_u8(kind.code())?;
    buf.write_u32::<LittleEndian>(len_u32(name.len())?)?;
    buf.extend_from_slice(name.as_bytes());
    buf.write_u64::<LittleEndian>(size)
}

pub fn decode_group_header(
    cursor: &mut Cursor<&[u8]>,
    name: &mut String,
) -> io::Result<(GroupKind, u64)> {
    let kind = decode_group_kind(cursor)?;
    let len = cursor.read_u32::<LittleEndian>()? as usize;
    let mut bytes = Vec::new();
    take_bytes(cursor, len, &mut bytes)?;
    *name = String::from_utf8(bytes).map_err(|_| invalid("group name is not valid UTF-8"))?;
    let size = cursor.read_u64::<LittleEndian>()?;
    Ok((kind, size))
}

pub fn encode_group_members(
    buf: &mut Vec<u8>,
    kind: GroupKind,
    chunk: &MemberChunk,
) -> io::Result<()> {
    buf.write_u8(kind.code())?;
    buf.write_u32::<LittleEndian>(len_u32(chunk.ids.len())?)?;
    put_u64s(buf, &chunk.ids)
}

pub fn decode_group_members(
    cursor: &mut Cursor<&[u8]>,
    chunk: &mut MemberChunk,
) -> io::Result<GroupKind> {
    let kind = decode_group_kind(cursor)?;
    let n = cursor.read_u32::<LittleEndian>()? as usize;
    take_u64s(cursor, n, &mut chunk.ids)?;
    Ok(kind)
}

// =============================================================================
// Footer
// =============================================================================

pub fn encode_footer(buf: &mut Vec<u8>, record_count: u64) -> io::Result<()> {
    buf.write_u64::<LittleEndian>(record_count)
}

pub fn decode_footer(cursor: &mut Cursor<&[u8]>) -> io::Result<u64> {
    cursor.read_u64::<LittleEndian>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_payload_layout() {
        let chunk = FaceChunk {
            ids: vec![1, 2],
            vertex_counts: vec![3, 4],
            connectivity: vec![1, 2, 3, 1, 2, 3, 4],
        };
        let mut buf = Vec::new();
        encode_faces(&mut buf, &chunk).unwrap();
        // n + ids + counts + connectivity length + connectivity
        assert_eq!(buf.len(), 4 + 2 * 8 + 2 + 4 + 7 * 8);

        let mut decoded = FaceChunk::default();
        decode("faces", &buf, |c| decode_faces(c, &mut decoded)).unwrap();
        assert_eq!(decoded, chunk);
    }

    #[test]
    fn test_truncated_payload_is_corrupt() {
        let chunk = NodeChunk {
            ids: vec![1, 2],
            xs: vec![0.0, 1.0],
            ys: vec![0.0, 1.0],
            zs: vec![0.0, 1.0],
        };
        let mut buf = Vec::new();
        encode_nodes(&mut buf, &chunk).unwrap();
        buf.truncate(buf.len() - 3);

        let mut decoded = NodeChunk::default();
        let err = decode("nodes", &buf, |c| decode_nodes(c, &mut decoded)).unwrap_err();
        assert!(matches!(err, CodecError::Corrupt { .. }));
    }

    #[test]
    fn test_trailing_bytes_are_corrupt() {
        let mut buf = Vec::new();
        encode_footer(&mut buf, 3).unwrap();
        buf.push(0);
        assert!(decode("footer", &buf, decode_footer).is_err());
    }

    #[test]
    fn test_huge_announced_length_does_not_allocate() {
        // n = u32::MAX with no data behind it.
        let buf = u32::MAX.to_le_bytes().to_vec();
        let mut decoded = MemberChunk::default();
        let mut payload = vec![GroupKind::Cloud.code()];
        payload.extend_from_slice(&buf);
        let err = decode("members", &payload, |c| decode_group_members(c, &mut decoded));
        assert!(err.is_err());
    }

    #[test]
    fn test_group_header() {
        let mut buf = Vec::new();
        encode_group_header(&mut buf, GroupKind::Surface, "wall", 12).unwrap();
        let mut name = String::new();
        let (kind, size) =
            decode("group header", &buf, |c| decode_group_header(c, &mut name)).unwrap();
        assert_eq!((kind, name.as_str(), size), (GroupKind::Surface, "wall", 12));
    }

    #[test]
    fn test_section_rejects_bad_flag() {
        let mut buf = vec![ElementKind::Node.code(), 7];
        buf.extend_from_slice(&[0; 16]);
        assert!(decode("section", &buf, decode_section).is_err());
    }
}
