// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use meshcodec::{CodecError, KindMask, Mesh, MeshModel};
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) -> Result {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.to_lowercase())
            .map_err(|e| anyhow::anyhow!("Invalid log level '{level}': {e}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Emit the structured fields of a codec failure at debug level.
pub fn log_failure(error: &anyhow::Error) {
    if let Some(codec) = error.downcast_ref::<CodecError>() {
        let root = codec.root();
        for (key, value) in root.log_fields() {
            tracing::debug!(stage = ?codec.stage(), key, value = %value, "failure detail");
        }
    }
}

/// Parse a kind mask such as `NEFR` or `nf`.
pub fn parse_kinds(s: &str) -> CliResult<KindMask> {
    Ok(s.parse::<KindMask>()?)
}

/// Read `path` into a fresh full-capability 3D mesh.
pub fn load_mesh(path: &Path, kinds: KindMask) -> Result<(Mesh, meshcodec::MeshReader)> {
    let mut reader = meshcodec::MeshReader::open(path)?;
    let mut mesh = Mesh::new(MeshModel::full_3d());
    reader.read(&mut mesh, kinds)?;
    Ok((mesh, reader))
}

/// Format a float without trailing noise: `0.001`, `1`, `2.5e-7`.
pub fn format_unit(value: f64) -> String {
    if value != 0.0 && (value.abs() < 1e-4 || value.abs() >= 1e6) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(parse_kinds("nf").unwrap(), KindMask::NODES | KindMask::FACES);
        assert!(parse_kinds("NX").is_err());
    }

    #[test]
    fn test_format_unit() {
        assert_eq!(format_unit(1.0), "1");
        assert_eq!(format_unit(0.001), "0.001");
        assert_eq!(format_unit(2.5e-7), "2.5e-7");
    }
}
