// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating mesh writers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::DEFAULT_CHUNK_CAPACITY;
use crate::io::detection::detect_format;
use crate::{CodecError, Result};

use super::MeshWriter;

/// Configuration for creating a writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Records per chunk for elements and group members
    pub chunk_capacity: usize,
    /// Length unit stored in the global header
    pub length_unit: f64,
    /// Compression was requested; output is never compressed
    pub compression: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            length_unit: 1.0,
            compression: false,
        }
    }
}

/// Builder for creating mesh writers.
///
/// # Example
///
/// ```rust,no_run
/// use meshcodec::io::WriterBuilder;
///
/// let writer = WriterBuilder::new()
///     .path("model.mli2")
///     .length_unit(0.001)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    path: PathBuf,
    config: WriterConfig,
}

impl WriterBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the output file.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of records per chunk.
    pub fn chunk_capacity(mut self, capacity: usize) -> Self {
        self.config.chunk_capacity = capacity;
        self
    }

    pub fn length_unit(mut self, unit: f64) -> Self {
        self.config.length_unit = unit;
        self
    }

    /// Request compression. See [`MeshWriter::activate_compression`].
    pub fn compression(mut self, enabled: bool) -> Self {
        self.config.compression = enabled;
        self
    }

    /// Build the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is not set
    /// - The chunk capacity is zero
    /// - The path has no recognized mesh suffix
    pub fn build(self) -> Result<MeshWriter> {
        if self.path.as_os_str().is_empty() {
            return Err(CodecError::invalid_config("WriterBuilder: path is not set"));
        }
        if self.config.chunk_capacity == 0 {
            return Err(CodecError::invalid_config(
                "WriterBuilder: chunk capacity must be at least 1",
            ));
        }

        // New files are identified by suffix alone.
        let format = detect_format(&self.path)?;
        let compression = self.config.compression;

        let mut writer = MeshWriter {
            path: self.path,
            format,
            config: WriterConfig {
                compression: false,
                ..self.config
            },
        };
        if compression {
            writer.activate_compression();
        }
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::metadata::FileFormat;

    #[test]
    fn test_builder_default() {
        let builder = WriterBuilder::new();
        assert_eq!(builder.config.chunk_capacity, 10_000);
        assert_eq!(builder.config.length_unit, 1.0);
        assert!(!builder.config.compression);
    }

    #[test]
    fn test_builder_fluent() {
        let writer = WriterBuilder::new()
            .path("output.MLI2")
            .chunk_capacity(128)
            .length_unit(0.01)
            .build()
            .unwrap();

        assert_eq!(writer.format(), FileFormat::Chunked);
        assert_eq!(writer.config().chunk_capacity, 128);
        assert_eq!(writer.length_unit(), 0.01);
    }

    #[test]
    fn test_builder_missing_path() {
        let err = WriterBuilder::new().build().err().unwrap();
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builder_zero_capacity() {
        let result = WriterBuilder::new()
            .path("out.mli")
            .chunk_capacity(0)
            .build();
        assert!(matches!(result, Err(CodecError::InvalidConfig { .. })));
    }

    #[test]
    fn test_builder_unknown_suffix() {
        let result = WriterBuilder::new().path("out.stl").build();
        assert!(matches!(result, Err(CodecError::UnknownFormat { .. })));
    }
}
