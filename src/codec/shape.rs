// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Vertex-count to shape classification.
//!
//! Both directions of the codec call into this module, so a shape that can
//! be written can always be read back, and vice versa.

use crate::mesh::{FaceShape, RegionShape};
use crate::{CodecError, ElementKind, Result};

/// Largest vertex count a single face or region record can hold.
pub const MAX_NODES_PER_ELEMENT: usize = 15;

/// Shape assigned to an element by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementShape {
    Vertex,
    Segment,
    Face(FaceShape),
    Region(RegionShape),
}

/// Map `(kind, vertex_count)` to a concrete shape.
pub fn classify(kind: ElementKind, vertex_count: usize) -> Result<ElementShape> {
    match kind {
        ElementKind::Node if vertex_count == 1 => Ok(ElementShape::Vertex),
        ElementKind::Edge if vertex_count == 2 => Ok(ElementShape::Segment),
        ElementKind::Face => classify_face(vertex_count).map(ElementShape::Face),
        ElementKind::Region => classify_region(vertex_count).map(ElementShape::Region),
        _ => Err(CodecError::UnsupportedShape { kind, vertex_count }),
    }
}

pub fn classify_face(vertex_count: usize) -> Result<FaceShape> {
    match vertex_count {
        3 => Ok(FaceShape::Triangle),
        4 => Ok(FaceShape::Quad),
        5 | 6 => Ok(FaceShape::Polygon(vertex_count)),
        _ => Err(CodecError::UnsupportedShape {
            kind: ElementKind::Face,
            vertex_count,
        }),
    }
}

pub fn classify_region(vertex_count: usize) -> Result<RegionShape> {
    match vertex_count {
        4 => Ok(RegionShape::Tetrahedron),
        5 => Ok(RegionShape::Pyramid),
        6 => Ok(RegionShape::TriangularPrism),
        8 => Ok(RegionShape::Hexahedron),
        10 => Err(CodecError::not_implemented(RegionShape::PentagonalPrism.as_str())),
        12 => Err(CodecError::not_implemented(RegionShape::HexagonalPrism.as_str())),
        _ => Err(CodecError::UnsupportedShape {
            kind: ElementKind::Region,
            vertex_count,
        }),
    }
}

// Region shape tags as stored in region chunks.
pub const TAG_TETRAHEDRON: u8 = 1;
pub const TAG_PYRAMID: u8 = 2;
pub const TAG_TRIANGULAR_PRISM: u8 = 3;
pub const TAG_HEXAHEDRON: u8 = 4;
pub const TAG_PENTAGONAL_PRISM: u8 = 5;
pub const TAG_HEXAGONAL_PRISM: u8 = 6;

pub fn region_tag(shape: RegionShape) -> u8 {
    match shape {
        RegionShape::Tetrahedron => TAG_TETRAHEDRON,
        RegionShape::Pyramid => TAG_PYRAMID,
        RegionShape::TriangularPrism => TAG_TRIANGULAR_PRISM,
        RegionShape::Hexahedron => TAG_HEXAHEDRON,
        RegionShape::PentagonalPrism => TAG_PENTAGONAL_PRISM,
        RegionShape::HexagonalPrism => TAG_HEXAGONAL_PRISM,
    }
}

/// Decode a stored shape tag. Reserved prism tags fail as not implemented.
pub fn region_from_tag(tag: u8) -> Result<RegionShape> {
    match tag {
        TAG_TETRAHEDRON => Ok(RegionShape::Tetrahedron),
        TAG_PYRAMID => Ok(RegionShape::Pyramid),
        TAG_TRIANGULAR_PRISM => Ok(RegionShape::TriangularPrism),
        TAG_HEXAHEDRON => Ok(RegionShape::Hexahedron),
        TAG_PENTAGONAL_PRISM => Err(CodecError::not_implemented(
            RegionShape::PentagonalPrism.as_str(),
        )),
        TAG_HEXAGONAL_PRISM => Err(CodecError::not_implemented(
            RegionShape::HexagonalPrism.as_str(),
        )),
        other => Err(CodecError::corrupt(
            "region shape tag",
            format!("unknown shape tag {other}"),
        )),
    }
}

/// Reject elements that do not fit in one record.
pub fn check_capacity(kind: ElementKind, id: u64, vertex_count: usize) -> Result<()> {
    if vertex_count > MAX_NODES_PER_ELEMENT {
        return Err(CodecError::CapacityExceeded {
            kind,
            id,
            vertex_count,
            limit: MAX_NODES_PER_ELEMENT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_classification() {
        assert_eq!(
            classify(ElementKind::Face, 3).unwrap(),
            ElementShape::Face(FaceShape::Triangle)
        );
        assert_eq!(
            classify(ElementKind::Face, 4).unwrap(),
            ElementShape::Face(FaceShape::Quad)
        );
        assert_eq!(
            classify(ElementKind::Face, 5).unwrap(),
            ElementShape::Face(FaceShape::Polygon(5))
        );
        assert_eq!(
            classify(ElementKind::Face, 6).unwrap(),
            ElementShape::Face(FaceShape::Polygon(6))
        );
    }

    #[test]
    fn test_face_unsupported_counts() {
        for count in [0, 1, 2, 7, 15] {
            let err = classify(ElementKind::Face, count).unwrap_err();
            assert!(
                matches!(err, CodecError::UnsupportedShape { vertex_count, .. } if vertex_count == count)
            );
        }
    }

    #[test]
    fn test_region_classification() {
        assert_eq!(
            classify(ElementKind::Region, 4).unwrap(),
            ElementShape::Region(RegionShape::Tetrahedron)
        );
        assert_eq!(classify_region(5).unwrap(), RegionShape::Pyramid);
        assert_eq!(classify_region(6).unwrap(), RegionShape::TriangularPrism);
        assert_eq!(
            classify(ElementKind::Region, 8).unwrap(),
            ElementShape::Region(RegionShape::Hexahedron)
        );
    }

    #[test]
    fn test_reserved_prisms_not_implemented() {
        for count in [10, 12] {
            let err = classify(ElementKind::Region, count).unwrap_err();
            assert!(matches!(err, CodecError::NotImplemented { .. }));
        }
        assert!(matches!(
            classify(ElementKind::Region, 7),
            Err(CodecError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_edges_and_nodes() {
        assert_eq!(classify(ElementKind::Edge, 2).unwrap(), ElementShape::Segment);
        assert_eq!(classify(ElementKind::Node, 1).unwrap(), ElementShape::Vertex);
        assert!(classify(ElementKind::Edge, 3).is_err());
    }

    #[test]
    fn test_region_tags() {
        for count in [4, 5, 6, 8] {
            let shape = classify_region(count).unwrap();
            assert_eq!(region_from_tag(region_tag(shape)).unwrap(), shape);
        }
        assert!(matches!(
            region_from_tag(TAG_PENTAGONAL_PRISM),
            Err(CodecError::NotImplemented { .. })
        ));
        assert!(matches!(region_from_tag(0), Err(CodecError::Corrupt { .. })));
    }

    #[test]
    fn test_capacity_limit() {
        assert!(check_capacity(ElementKind::Face, 1, MAX_NODES_PER_ELEMENT).is_ok());
        assert!(matches!(
            check_capacity(ElementKind::Face, 1, MAX_NODES_PER_ELEMENT + 1),
            Err(CodecError::CapacityExceeded { limit: 15, .. })
        ));
    }
}
