// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.mli2` format constants.
//!
//! File layout:
//!
//! ```text
//! magic (8) | version u16 | compression u8
//! record*   : op u8 | payload length u64 | payload | crc32(payload) u32
//! ```
//!
//! All integers are little-endian. The last record is always the footer;
//! a file without it was never finalized.

/// Magic bytes at the start of every `.mli2` file.
pub const MLI2_MAGIC: [u8; 8] = [0x89, b'M', b'L', b'I', b'2', 0x0D, 0x0A, 0x1A];

/// Layout version written by this crate.
pub const FORMAT_VERSION: u16 = 1;

/// Compression byte for uncompressed files, the only value written.
pub const COMPRESSION_NONE: u8 = 0;

/// Magic, version and compression byte.
pub const PREAMBLE_LEN: usize = 8 + 2 + 1;

/// Opcode and payload length in front of every payload.
pub const RECORD_PREFIX_LEN: usize = 1 + 8;

/// Trailing CRC32 of every payload.
pub const RECORD_CRC_LEN: usize = 4;

/// Global header: length unit, dimension.
pub const OP_HEADER: u8 = 0x01;
/// Section header of one element kind.
pub const OP_SECTION: u8 = 0x02;
pub const OP_NODE_CHUNK: u8 = 0x03;
pub const OP_EDGE_CHUNK: u8 = 0x04;
pub const OP_FACE_CHUNK: u8 = 0x05;
pub const OP_REGION_CHUNK: u8 = 0x06;
/// Number of groups of one group kind.
pub const OP_GROUP_SECTION: u8 = 0x07;
/// Group name and announced size.
pub const OP_GROUP_HEADER: u8 = 0x08;
/// A chunk of member ids of the current group.
pub const OP_GROUP_MEMBERS: u8 = 0x09;
/// Record count of the file, written last.
pub const OP_FOOTER: u8 = 0x0A;

/// Readable name of an opcode, for error messages.
pub fn op_name(op: u8) -> &'static str {
    match op {
        OP_HEADER => "header",
        OP_SECTION => "section",
        OP_NODE_CHUNK => "node chunk",
        OP_EDGE_CHUNK => "edge chunk",
        OP_FACE_CHUNK => "face chunk",
        OP_REGION_CHUNK => "region chunk",
        OP_GROUP_SECTION => "group section",
        OP_GROUP_HEADER => "group header",
        OP_GROUP_MEMBERS => "group members",
        OP_FOOTER => "footer",
        _ => "unknown",
    }
}
