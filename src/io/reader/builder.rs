// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating mesh readers.
//!
//! The `ReaderBuilder` provides a fluent API for configuring and opening
//! readers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::DEFAULT_CHUNK_CAPACITY;
use crate::io::detection::detect_format;
use crate::io::formats::open_source;
use crate::{CodecError, Result, Section, Stage};

use super::MeshReader;

/// Configuration for opening a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Records per replayed chunk for the legacy format
    pub chunk_capacity: usize,
    /// Check the CRC of every `.mli2` record while indexing
    pub verify_checksums: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            verify_checksums: true,
        }
    }
}

/// Builder for opening mesh readers.
///
/// # Example
///
/// ```rust,no_run
/// use meshcodec::io::ReaderBuilder;
///
/// let reader = ReaderBuilder::new()
///     .path("model.mli2")
///     .verify_checksums(false)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    path: PathBuf,
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the file.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chunk_capacity(mut self, capacity: usize) -> Self {
        self.config.chunk_capacity = capacity;
        self
    }

    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.config.verify_checksums = verify;
        self
    }

    /// Open the reader.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is not set
    /// - The file doesn't exist
    /// - The path has no recognized mesh suffix
    /// - The file header cannot be parsed
    pub fn build(self) -> Result<MeshReader> {
        let path = &self.path;

        if path.as_os_str().is_empty() {
            return Err(CodecError::invalid_config("ReaderBuilder: path is not set"));
        }
        let format = detect_format(path)?;

        if !path.exists() {
            return Err(CodecError::io(
                format!("file not found: {}", path.display()),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }

        let source = open_source(format, path, &self.config)
            .map_err(|e| e.in_stage(Stage::read(Section::Header)))?;
        tracing::debug!("Opened {} as {}", path.display(), format);

        Ok(MeshReader {
            format,
            config: self.config,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = ReaderBuilder::new();
        assert_eq!(builder.config.chunk_capacity, 10_000);
        assert!(builder.config.verify_checksums);
    }

    #[test]
    fn test_builder_fluent() {
        let builder = ReaderBuilder::new()
            .path("model.mli")
            .chunk_capacity(64)
            .verify_checksums(false);

        assert_eq!(builder.path, PathBuf::from("model.mli"));
        assert_eq!(builder.config.chunk_capacity, 64);
        assert!(!builder.config.verify_checksums);
    }

    #[test]
    fn test_builder_missing_path() {
        let result = ReaderBuilder::new().build();
        assert!(matches!(result, Err(CodecError::InvalidConfig { .. })));
    }

    #[test]
    fn test_builder_file_not_found() {
        let result = ReaderBuilder::new().path("/nonexistent/file.mli2").build();
        assert!(matches!(result, Err(CodecError::Io { .. })));
    }

    #[test]
    fn test_builder_unknown_suffix_before_existence() {
        let result = ReaderBuilder::new().path("/nonexistent/file.obj").build();
        assert!(matches!(result, Err(CodecError::UnknownFormat { .. })));
    }
}
