// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Mesh elements and their shape tags.

use std::fmt;

use super::arena::CellId;

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub xyz: [f64; 3],
}

impl Node {
    pub fn x(&self) -> f64 {
        self.xyz[0]
    }

    pub fn y(&self) -> f64 {
        self.xyz[1]
    }

    pub fn z(&self) -> f64 {
        self.xyz[2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub nodes: [CellId; 2],
}

/// Face shapes. Polygons keep their explicit vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceShape {
    Triangle,
    Quad,
    Polygon(usize),
}

impl FaceShape {
    pub const fn vertex_count(self) -> usize {
        match self {
            FaceShape::Triangle => 3,
            FaceShape::Quad => 4,
            FaceShape::Polygon(n) => n,
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceShape::Triangle => f.write_str("triangle"),
            FaceShape::Quad => f.write_str("quad"),
            FaceShape::Polygon(n) => write!(f, "polygon({n})"),
        }
    }
}

/// Region shapes. The pentagonal and hexagonal prisms are stored by the
/// mesh but have no file representation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionShape {
    Tetrahedron,
    Pyramid,
    TriangularPrism,
    Hexahedron,
    PentagonalPrism,
    HexagonalPrism,
}

impl RegionShape {
    pub const fn vertex_count(self) -> usize {
        match self {
            RegionShape::Tetrahedron => 4,
            RegionShape::Pyramid => 5,
            RegionShape::TriangularPrism => 6,
            RegionShape::Hexahedron => 8,
            RegionShape::PentagonalPrism => 10,
            RegionShape::HexagonalPrism => 12,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RegionShape::Tetrahedron => "tetrahedron",
            RegionShape::Pyramid => "pyramid",
            RegionShape::TriangularPrism => "triangular prism",
            RegionShape::Hexahedron => "hexahedron",
            RegionShape::PentagonalPrism => "pentagonal prism",
            RegionShape::HexagonalPrism => "hexagonal prism",
        }
    }
}

impl fmt::Display for RegionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub shape: FaceShape,
    pub nodes: Vec<CellId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub shape: RegionShape,
    pub nodes: Vec<CellId>,
}
