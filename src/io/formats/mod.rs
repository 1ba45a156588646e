// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format-specific record sinks and sources.
//!
//! Each [`FileFormat`] maps to exactly one sink/source pair:
//! - `.mli`: [`mli::LegacySink`] / [`mli::LegacySource`]
//! - `.mli2`: [`mli2::ChunkedSink`] / [`mli2::ChunkedSource`]

pub mod mli;
pub mod mli2;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::io::metadata::FileFormat;
use crate::io::reader::ReaderConfig;
use crate::io::traits::{RecordSink, RecordSource};
use crate::{CodecError, Result};

/// Create the record sink for `format`, writing towards `path`.
pub fn create_sink(format: FileFormat, path: &Path) -> Result<Box<dyn RecordSink>> {
    Ok(match format {
        FileFormat::Legacy => Box::new(mli::LegacySink::create(path)?),
        FileFormat::Chunked => Box::new(mli2::ChunkedSink::create(path)?),
    })
}

/// Open the record source for `format` at `path`.
pub fn open_source(
    format: FileFormat,
    path: &Path,
    config: &ReaderConfig,
) -> Result<Box<dyn RecordSource>> {
    Ok(match format {
        FileFormat::Legacy => Box::new(mli::LegacySource::open(path, config.chunk_capacity)?),
        FileFormat::Chunked => Box::new(mli2::ChunkedSource::open(
            path,
            config.verify_checksums,
        )?),
    })
}

/// Staging path used while a file is being written: `<path>.partial`.
pub(crate) fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Move a completed staging file to its final path.
pub(crate) fn commit_partial(partial: &Path, path: &Path) -> Result<()> {
    std::fs::rename(partial, path).map_err(|e| {
        CodecError::io(
            format!("failed to move {} to {}", partial.display(), path.display()),
            e,
        )
    })
}

/// Remove a staging file after a failed write.
pub(crate) fn discard_partial(partial: &Path) {
    if let Err(e) = std::fs::remove_file(partial) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                context = "mesh_writer",
                "Failed to remove partial file {}: {e}",
                partial.display()
            );
        }
    }
}
