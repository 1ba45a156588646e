// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for meshcodec.
//!
//! Every failure of a read or write call surfaces as a single [`CodecError`].
//! The variants follow the failure classes of the codec:
//! - Format dispatch
//! - Dangling connectivity or group references
//! - Unsupported and not-yet-implemented shapes
//! - Per-record capacity limits
//! - Underlying file access and corrupt records
//!
//! Failures raised inside a read or write pass are wrapped in
//! [`CodecError::Failed`], which records the [`Stage`] that was in progress.

use std::fmt;
use std::io;

use super::kind::ElementKind;

/// Direction of a conversion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Read,
    Write,
}

/// Section of the interchange file a pass works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Nodes,
    Edges,
    Faces,
    Regions,
    Clouds,
    Lines,
    Surfaces,
    Volumes,
    Finish,
}

impl Section {
    /// Human-readable section name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Nodes => "nodes",
            Section::Edges => "edges",
            Section::Faces => "faces",
            Section::Regions => "regions",
            Section::Clouds => "clouds",
            Section::Lines => "lines",
            Section::Surfaces => "surfaces",
            Section::Volumes => "volumes",
            Section::Finish => "file footer",
        }
    }
}

/// The stage of a read or write call in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stage {
    pub direction: Direction,
    pub section: Section,
}

impl Stage {
    pub const fn read(section: Section) -> Self {
        Self {
            direction: Direction::Read,
            section,
        }
    }

    pub const fn write(section: Section) -> Self {
        Self {
            direction: Direction::Write,
            section,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.direction {
            Direction::Read => "reading",
            Direction::Write => "writing",
        };
        write!(f, "{verb} {}", self.section.as_str())
    }
}

/// Errors that can occur while reading or writing a mesh file.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The path suffix does not name a known mesh format.
    #[error("unknown mesh file format for '{path}' (expected a .mli or .mli2 suffix)")]
    UnknownFormat { path: String },

    /// A connectivity or group member id has no entry in the remap table.
    #[error("dangling {kind} reference: id {id} was never defined ({context})")]
    DanglingReference {
        kind: ElementKind,
        id: u64,
        context: String,
    },

    /// Vertex count outside the classifier's known set.
    #[error("unsupported {kind} shape with {vertex_count} vertices")]
    UnsupportedShape {
        kind: ElementKind,
        vertex_count: usize,
    },

    /// A reserved shape that the codec does not handle yet.
    #[error("{shape} elements are not yet implemented")]
    NotImplemented { shape: String },

    /// An element has more vertices than a single record can hold.
    #[error("{kind} {id} has {vertex_count} vertices, a record holds at most {limit}")]
    CapacityExceeded {
        kind: ElementKind,
        id: u64,
        vertex_count: usize,
        limit: usize,
    },

    /// File access failed below the codec.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Truncated, malformed or unfinalized file content.
    #[error("corrupt mesh file ({context}): {message}")]
    Corrupt { context: String, message: String },

    /// Serialization of a document failed.
    #[error("failed to serialize {context}: {message}")]
    Serialization { context: String, message: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A lower-level failure annotated with the stage that was in progress.
    #[error("{stage} failed: {source}")]
    Failed {
        stage: Stage,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Create an unknown format error.
    pub fn unknown_format(path: impl AsRef<std::path::Path>) -> Self {
        CodecError::UnknownFormat {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a dangling reference error.
    pub fn dangling(kind: ElementKind, id: u64, context: impl Into<String>) -> Self {
        CodecError::DanglingReference {
            kind,
            id,
            context: context.into(),
        }
    }

    /// Create a not-implemented error for a reserved shape.
    pub fn not_implemented(shape: impl Into<String>) -> Self {
        CodecError::NotImplemented {
            shape: shape.into(),
        }
    }

    /// Wrap an I/O error with the operation that caused it.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        CodecError::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a corrupt file error.
    pub fn corrupt(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Corrupt {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CodecError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach stage context. Errors that already carry a stage are returned unchanged.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            CodecError::Failed { .. } => self,
            other => CodecError::Failed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage recorded on this error, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CodecError::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The innermost error, with stage wrappers removed.
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::Failed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::UnknownFormat { path } => vec![("path", path.clone())],
            CodecError::DanglingReference { kind, id, context } => vec![
                ("kind", kind.to_string()),
                ("id", id.to_string()),
                ("context", context.clone()),
            ],
            CodecError::UnsupportedShape { kind, vertex_count } => vec![
                ("kind", kind.to_string()),
                ("vertex_count", vertex_count.to_string()),
            ],
            CodecError::NotImplemented { shape } => vec![("shape", shape.clone())],
            CodecError::CapacityExceeded {
                kind,
                id,
                vertex_count,
                limit,
            } => vec![
                ("kind", kind.to_string()),
                ("id", id.to_string()),
                ("vertex_count", vertex_count.to_string()),
                ("limit", limit.to_string()),
            ],
            CodecError::Io { context, source } => {
                vec![("context", context.clone()), ("io_error", source.to_string())]
            }
            CodecError::Corrupt { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::Serialization { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::InvalidConfig { message } => vec![("message", message.clone())],
            CodecError::Failed { stage, source } => {
                let mut fields = vec![("stage", stage.to_string())];
                fields.extend(source.log_fields());
                fields
            }
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        CodecError::io("file access", err)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serialization {
            context: "legacy mesh document".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for meshcodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::read(Section::Nodes).to_string(), "reading nodes");
        assert_eq!(Stage::write(Section::Volumes).to_string(), "writing volumes");
        assert_eq!(Stage::write(Section::Finish).to_string(), "writing file footer");
    }

    #[test]
    fn test_dangling_reference_display() {
        let err = CodecError::dangling(ElementKind::Node, 999, "cloud 'inlet'");
        assert_eq!(
            err.to_string(),
            "dangling node reference: id 999 was never defined (cloud 'inlet')"
        );
    }

    #[test]
    fn test_unsupported_shape_display() {
        let err = CodecError::UnsupportedShape {
            kind: ElementKind::Face,
            vertex_count: 7,
        };
        assert_eq!(err.to_string(), "unsupported face shape with 7 vertices");
    }

    #[test]
    fn test_capacity_display() {
        let err = CodecError::CapacityExceeded {
            kind: ElementKind::Region,
            id: 3,
            vertex_count: 16,
            limit: 15,
        };
        assert_eq!(
            err.to_string(),
            "region 3 has 16 vertices, a record holds at most 15"
        );
    }

    #[test]
    fn test_in_stage_wraps_once() {
        let err = CodecError::corrupt("node chunk", "truncated")
            .in_stage(Stage::read(Section::Nodes))
            .in_stage(Stage::read(Section::Clouds));
        assert_eq!(err.stage(), Some(Stage::read(Section::Nodes)));
        assert!(matches!(err.root(), CodecError::Corrupt { .. }));
        assert_eq!(
            err.to_string(),
            "reading nodes failed: corrupt mesh file (node chunk): truncated"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: CodecError = io_err.into();
        assert!(matches!(err, CodecError::Io { .. }));
        assert_eq!(err.to_string(), "file access: missing");
    }

    #[test]
    fn test_log_fields_include_stage() {
        let err = CodecError::not_implemented("pentagonal prism")
            .in_stage(Stage::write(Section::Regions));
        let fields = err.log_fields();
        assert_eq!(fields[0], ("stage", "writing regions".to_string()));
        assert_eq!(fields[1], ("shape", "pentagonal prism".to_string()));
    }
}
