// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared metadata types for the mesh file formats.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::io::records::{FileHeader, SectionInfo};
use crate::ElementKind;

/// Interchange format variants, selected by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// `.mli`: one JSON document, written in full at finish.
    Legacy,
    /// `.mli2`: chunked binary records, streamed.
    Chunked,
}

impl FileFormat {
    pub const ALL: [FileFormat; 2] = [FileFormat::Legacy, FileFormat::Chunked];

    pub const fn extension(self) -> &'static str {
        match self {
            FileFormat::Legacy => "mli",
            FileFormat::Chunked => "mli2",
        }
    }

    /// Match a suffix, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    pub const fn description(self) -> &'static str {
        match self {
            FileFormat::Legacy => "legacy whole-document format",
            FileFormat::Chunked => "chunked streaming format",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{} ({})", self.extension(), self.description())
    }
}

/// Section header of one element kind, as stored in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub kind: ElementKind,
    #[serde(flatten)]
    pub info: SectionInfo,
}

/// Summary of a mesh file, read without building a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub format: FileFormat,
    pub header: FileHeader,
    pub sections: Vec<SectionSummary>,
    /// Group counts indexed by [`GroupKind::index`](crate::GroupKind::index).
    pub groups: [u64; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup_ignores_case() {
        assert_eq!(FileFormat::from_extension("MLI"), Some(FileFormat::Legacy));
        assert_eq!(FileFormat::from_extension("mli2"), Some(FileFormat::Chunked));
        assert_eq!(FileFormat::from_extension("vtk"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FileFormat::Chunked.to_string(),
            ".mli2 (chunked streaming format)"
        );
    }
}
