// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.mli2` chunked binary format.
//!
//! A preamble followed by framed, checksummed records. Element and group
//! member records each carry one chunk, so both directions stream with
//! memory bounded by the chunk capacity.

pub mod constants;
mod layout;
mod reader;
mod writer;

pub use reader::ChunkedSource;
pub use writer::ChunkedSink;
