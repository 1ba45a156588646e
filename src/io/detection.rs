// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection by file suffix.
//!
//! Detection looks at the path only, never at file content, so the same
//! rule selects the writer for a new file and the reader for an old one.
//! An unknown or missing suffix is an error; no default format is assumed.
//!
//! # Example
//!
//! ```rust
//! use meshcodec::io::detection::detect_format;
//! use meshcodec::io::metadata::FileFormat;
//!
//! assert_eq!(detect_format("wing.mli2")?, FileFormat::Chunked);
//! assert!(detect_format("wing.vtk").is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use crate::{CodecError, Result};

use super::metadata::FileFormat;

/// Select the format variant for `path` from its suffix.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<FileFormat> {
    let path = path.as_ref();
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileFormat::from_extension)
        .ok_or_else(|| CodecError::unknown_format(path))
}

/// Check whether `path` carries a known mesh suffix.
pub fn is_mesh_file<P: AsRef<Path>>(path: P) -> bool {
    detect_format(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_legacy() {
        assert_eq!(detect_format("out/mesh.mli").unwrap(), FileFormat::Legacy);
        assert_eq!(detect_format("MESH.MLI").unwrap(), FileFormat::Legacy);
    }

    #[test]
    fn test_detect_chunked() {
        assert_eq!(detect_format("mesh.mli2").unwrap(), FileFormat::Chunked);
    }

    #[test]
    fn test_detection_does_not_need_the_file() {
        let path = std::env::temp_dir().join(format!(
            "meshcodec_test_detect_{}_missing.mli2",
            std::process::id()
        ));
        assert!(!path.exists());
        assert_eq!(detect_format(&path).unwrap(), FileFormat::Chunked);
    }

    #[test]
    fn test_unknown_suffix_fails_closed() {
        for path in ["mesh.vtk", "mesh", "mesh.mli.bak", ".mli2x"] {
            let err = detect_format(path).unwrap_err();
            assert!(matches!(err, CodecError::UnknownFormat { .. }), "{path}");
        }
    }

    #[test]
    fn test_is_mesh_file() {
        assert!(is_mesh_file("a.mli"));
        assert!(!is_mesh_file("a.txt"));
    }
}
