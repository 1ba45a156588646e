// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record vocabulary shared by every interchange format.
//!
//! All ids in these records are file-local and 1-based. Element data moves
//! in chunks of parallel arrays; faces and regions use a flattened
//! variable-stride connectivity array with a per-element vertex count.

use serde::{Deserialize, Serialize};

use crate::{CodecError, Dimension, Result};

/// Global header: length unit and dimensionality tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    pub length_unit: f64,
    pub dimension: Dimension,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            length_unit: 1.0,
            dimension: Dimension::D3,
        }
    }
}

/// Per-kind section header `(isContiguous, count, minID)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub contiguous: bool,
    pub count: u64,
    pub min_id: u64,
}

/// One node record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    pub xyz: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: u64,
    pub nodes: [u64; 2],
}

/// A face borrowed out of a [`FaceChunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRecord<'a> {
    pub id: u64,
    pub nodes: &'a [u64],
}

/// A region borrowed out of a [`RegionChunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRecord<'a> {
    pub id: u64,
    pub shape_tag: u8,
    pub nodes: &'a [u64],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeChunk {
    pub ids: Vec<u64>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl NodeChunk {
    pub fn records(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        self.ids.iter().enumerate().map(move |(i, &id)| NodeRecord {
            id,
            xyz: [self.xs[i], self.ys[i], self.zs[i]],
        })
    }

    pub fn validate(&self, context: &str) -> Result<()> {
        let n = self.ids.len();
        if self.xs.len() != n || self.ys.len() != n || self.zs.len() != n {
            return Err(CodecError::corrupt(
                context,
                format!(
                    "node chunk arrays disagree: {} ids, {}/{}/{} coordinates",
                    n,
                    self.xs.len(),
                    self.ys.len(),
                    self.zs.len()
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeChunk {
    pub ids: Vec<u64>,
    /// Two node ids per edge.
    pub connectivity: Vec<u64>,
}

impl EdgeChunk {
    pub fn records(&self) -> impl Iterator<Item = EdgeRecord> + '_ {
        self.ids
            .iter()
            .zip(self.connectivity.chunks_exact(2))
            .map(|(&id, pair)| EdgeRecord {
                id,
                nodes: [pair[0], pair[1]],
            })
    }

    pub fn validate(&self, context: &str) -> Result<()> {
        if self.connectivity.len() != self.ids.len() * 2 {
            return Err(CodecError::corrupt(
                context,
                format!(
                    "edge chunk has {} ids but {} connectivity entries",
                    self.ids.len(),
                    self.connectivity.len()
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceChunk {
    pub ids: Vec<u64>,
    pub vertex_counts: Vec<u8>,
    pub connectivity: Vec<u64>,
}

impl FaceChunk {
    pub fn records(&self) -> impl Iterator<Item = CellRecord<'_>> + '_ {
        let mut offset = 0usize;
        self.ids
            .iter()
            .zip(&self.vertex_counts)
            .map(move |(&id, &count)| {
                let start = offset;
                offset += count as usize;
                CellRecord {
                    id,
                    nodes: &self.connectivity[start..offset],
                }
            })
    }

    pub fn validate(&self, context: &str) -> Result<()> {
        validate_cells(
            context,
            self.ids.len(),
            &self.vertex_counts,
            self.connectivity.len(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionChunk {
    pub ids: Vec<u64>,
    pub vertex_counts: Vec<u8>,
    pub shape_tags: Vec<u8>,
    pub connectivity: Vec<u64>,
}

impl RegionChunk {
    pub fn records(&self) -> impl Iterator<Item = RegionRecord<'_>> + '_ {
        let mut offset = 0usize;
        self.ids
            .iter()
            .zip(&self.vertex_counts)
            .zip(&self.shape_tags)
            .map(move |((&id, &count), &shape_tag)| {
                let start = offset;
                offset += count as usize;
                RegionRecord {
                    id,
                    shape_tag,
                    nodes: &self.connectivity[start..offset],
                }
            })
    }

    pub fn validate(&self, context: &str) -> Result<()> {
        if self.shape_tags.len() != self.ids.len() {
            return Err(CodecError::corrupt(
                context,
                format!(
                    "region chunk has {} ids but {} shape tags",
                    self.ids.len(),
                    self.shape_tags.len()
                ),
            ));
        }
        validate_cells(
            context,
            self.ids.len(),
            &self.vertex_counts,
            self.connectivity.len(),
        )
    }
}

fn validate_cells(context: &str, ids: usize, counts: &[u8], connectivity: usize) -> Result<()> {
    if counts.len() != ids {
        return Err(CodecError::corrupt(
            context,
            format!("{ids} ids but {} vertex counts", counts.len()),
        ));
    }
    let expected: usize = counts.iter().map(|&c| c as usize).sum();
    if expected != connectivity {
        return Err(CodecError::corrupt(
            context,
            format!("vertex counts sum to {expected} but connectivity holds {connectivity}"),
        ));
    }
    Ok(())
}

/// A chunk of group member ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChunk {
    pub ids: Vec<u64>,
}

/// Group records as they are streamed out of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEvent<'a> {
    /// Start of a group: name and announced member count.
    Begin { name: &'a str, size: u64 },
    /// A chunk of member ids of the current group.
    Members(&'a [u64]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_chunk_records_walk_offsets() {
        let chunk = FaceChunk {
            ids: vec![1, 2],
            vertex_counts: vec![3, 4],
            connectivity: vec![1, 2, 3, 2, 3, 4, 5],
        };
        chunk.validate("faces").unwrap();

        let records: Vec<_> = chunk.records().collect();
        assert_eq!(records[0].nodes, &[1, 2, 3]);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].nodes, &[2, 3, 4, 5]);
    }

    #[test]
    fn test_face_chunk_rejects_short_connectivity() {
        let chunk = FaceChunk {
            ids: vec![1],
            vertex_counts: vec![4],
            connectivity: vec![1, 2, 3],
        };
        assert!(matches!(
            chunk.validate("faces"),
            Err(CodecError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_region_chunk_requires_shape_tags() {
        let chunk = RegionChunk {
            ids: vec![1],
            vertex_counts: vec![4],
            shape_tags: vec![],
            connectivity: vec![1, 2, 3, 4],
        };
        assert!(chunk.validate("regions").is_err());
    }

    #[test]
    fn test_node_chunk_records() {
        let chunk = NodeChunk {
            ids: vec![7],
            xs: vec![1.0],
            ys: vec![2.0],
            zs: vec![3.0],
        };
        let record = chunk.records().next().unwrap();
        assert_eq!(record, NodeRecord { id: 7, xyz: [1.0, 2.0, 3.0] });
    }
}
