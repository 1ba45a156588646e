// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory polytope mesh.
//!
//! A [`Mesh`] stores nodes, edges, faces and regions in per-kind slot arenas
//! with zero-based ids, plus four collections of named groups. Enumeration
//! is always in ascending id order, so two passes over the same kind see the
//! same sequence. Lookup by id is O(1).
//!
//! The mesh declares a capability set in its [`MeshModel`]; the codec only
//! reads or writes kinds that are in both the capability set and the
//! caller's mask. Element constructors do not check capability or node
//! references, the codec reports those when it translates ids.
//!
//! # Example
//!
//! ```rust
//! use meshcodec::{Dimension, GroupKind, KindMask, Mesh, MeshModel};
//!
//! let mut mesh = Mesh::new(MeshModel::new(Dimension::D2, KindMask::NODES | KindMask::FACES));
//! let a = mesh.new_node([0.0, 0.0, 0.0]);
//! let b = mesh.new_node([1.0, 0.0, 0.0]);
//! let c = mesh.new_node([0.0, 1.0, 0.0]);
//! let t = mesh.new_triangle([a, b, c]);
//!
//! let wall = mesh.new_group(GroupKind::Surface, "wall");
//! mesh.group_mut(GroupKind::Surface, wall).unwrap().add(t);
//! assert_eq!(mesh.counts().faces, 1);
//! ```

pub mod arena;
pub mod element;
pub mod group;

pub use arena::{CellId, SlotArena};
pub use element::{Edge, Face, FaceShape, Node, Region, RegionShape};
pub use group::Group;

use serde::{Deserialize, Serialize};

use crate::{CodecError, Dimension, ElementKind, GroupKind, KindMask, Result};

/// Declared capability set of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshModel {
    pub dimension: Dimension,
    pub kinds: KindMask,
}

impl MeshModel {
    pub fn new(dimension: Dimension, kinds: KindMask) -> Self {
        Self { dimension, kinds }
    }

    /// A 3D model holding every element kind.
    pub fn full_3d() -> Self {
        Self::new(Dimension::D3, KindMask::all())
    }
}

impl Default for MeshModel {
    fn default() -> Self {
        Self::full_3d()
    }
}

/// Element and group counts of a mesh, or of one read/write pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshCounts {
    pub nodes: u64,
    pub edges: u64,
    pub faces: u64,
    pub regions: u64,
    /// Group counts indexed by [`GroupKind::index`].
    pub groups: [u64; 4],
}

impl MeshCounts {
    pub fn elements(&self, kind: ElementKind) -> u64 {
        match kind {
            ElementKind::Node => self.nodes,
            ElementKind::Edge => self.edges,
            ElementKind::Face => self.faces,
            ElementKind::Region => self.regions,
        }
    }

    pub fn set_elements(&mut self, kind: ElementKind, count: u64) {
        match kind {
            ElementKind::Node => self.nodes = count,
            ElementKind::Edge => self.edges = count,
            ElementKind::Face => self.faces = count,
            ElementKind::Region => self.regions = count,
        }
    }

    pub fn groups(&self, kind: GroupKind) -> u64 {
        self.groups[kind.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    model: MeshModel,
    nodes: SlotArena<Node>,
    edges: SlotArena<Edge>,
    faces: SlotArena<Face>,
    regions: SlotArena<Region>,
    groups: [Vec<Group>; 4],
}

impl Mesh {
    pub fn new(model: MeshModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn model(&self) -> MeshModel {
        self.model
    }

    // =========================================================================
    // Element creation
    // =========================================================================

    pub fn new_node(&mut self, xyz: [f64; 3]) -> CellId {
        self.nodes.insert(Node { xyz })
    }

    pub fn new_edge(&mut self, nodes: [CellId; 2]) -> CellId {
        self.edges.insert(Edge { nodes })
    }

    pub fn new_triangle(&mut self, nodes: [CellId; 3]) -> CellId {
        self.insert_face(FaceShape::Triangle, nodes.to_vec())
    }

    pub fn new_quad(&mut self, nodes: [CellId; 4]) -> CellId {
        self.insert_face(FaceShape::Quad, nodes.to_vec())
    }

    /// Create a polygon with an explicit vertex list.
    pub fn new_polygon(&mut self, nodes: &[CellId]) -> Result<CellId> {
        self.new_face(FaceShape::Polygon(nodes.len()), nodes)
    }

    /// Create a face of the given shape; the vertex count must match the shape.
    pub fn new_face(&mut self, shape: FaceShape, nodes: &[CellId]) -> Result<CellId> {
        if nodes.len() < 3 || shape.vertex_count() != nodes.len() {
            return Err(CodecError::UnsupportedShape {
                kind: ElementKind::Face,
                vertex_count: nodes.len(),
            });
        }
        Ok(self.insert_face(shape, nodes.to_vec()))
    }

    pub fn new_tet(&mut self, nodes: [CellId; 4]) -> CellId {
        self.insert_region(RegionShape::Tetrahedron, nodes.to_vec())
    }

    pub fn new_pyramid(&mut self, nodes: [CellId; 5]) -> CellId {
        self.insert_region(RegionShape::Pyramid, nodes.to_vec())
    }

    pub fn new_prism3(&mut self, nodes: [CellId; 6]) -> CellId {
        self.insert_region(RegionShape::TriangularPrism, nodes.to_vec())
    }

    pub fn new_hex(&mut self, nodes: [CellId; 8]) -> CellId {
        self.insert_region(RegionShape::Hexahedron, nodes.to_vec())
    }

    pub fn new_prism5(&mut self, nodes: [CellId; 10]) -> CellId {
        self.insert_region(RegionShape::PentagonalPrism, nodes.to_vec())
    }

    pub fn new_prism6(&mut self, nodes: [CellId; 12]) -> CellId {
        self.insert_region(RegionShape::HexagonalPrism, nodes.to_vec())
    }

    /// Create a region of the given shape; the vertex count must match the shape.
    pub fn new_region(&mut self, shape: RegionShape, nodes: &[CellId]) -> Result<CellId> {
        if shape.vertex_count() != nodes.len() {
            return Err(CodecError::UnsupportedShape {
                kind: ElementKind::Region,
                vertex_count: nodes.len(),
            });
        }
        Ok(self.insert_region(shape, nodes.to_vec()))
    }

    fn insert_face(&mut self, shape: FaceShape, nodes: Vec<CellId>) -> CellId {
        self.faces.insert(Face { shape, nodes })
    }

    fn insert_region(&mut self, shape: RegionShape, nodes: Vec<CellId>) -> CellId {
        self.regions.insert(Region { shape, nodes })
    }

    // =========================================================================
    // Removal (leaves holes in the id space)
    // =========================================================================

    pub fn remove_node(&mut self, id: CellId) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub fn remove_edge(&mut self, id: CellId) -> Option<Edge> {
        self.edges.remove(id)
    }

    pub fn remove_face(&mut self, id: CellId) -> Option<Face> {
        self.faces.remove(id)
    }

    pub fn remove_region(&mut self, id: CellId) -> Option<Region> {
        self.regions.remove(id)
    }

    // =========================================================================
    // Lookup and enumeration
    // =========================================================================

    pub fn node(&self, id: CellId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: CellId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn face(&self, id: CellId) -> Option<&Face> {
        self.faces.get(id)
    }

    pub fn region(&self, id: CellId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn nodes(&self) -> &SlotArena<Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &SlotArena<Edge> {
        &self.edges
    }

    pub fn faces(&self) -> &SlotArena<Face> {
        &self.faces
    }

    pub fn regions(&self) -> &SlotArena<Region> {
        &self.regions
    }

    /// Live ids of one element kind, ascending.
    pub fn ids(&self, kind: ElementKind) -> Box<dyn Iterator<Item = CellId> + '_> {
        match kind {
            ElementKind::Node => Box::new(self.nodes.ids()),
            ElementKind::Edge => Box::new(self.edges.ids()),
            ElementKind::Face => Box::new(self.faces.ids()),
            ElementKind::Region => Box::new(self.regions.ids()),
        }
    }

    /// One past the largest id handed out for a kind.
    pub fn id_bound(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Node => self.nodes.id_bound(),
            ElementKind::Edge => self.edges.id_bound(),
            ElementKind::Face => self.faces.id_bound(),
            ElementKind::Region => self.regions.id_bound(),
        }
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Node => self.nodes.len(),
            ElementKind::Edge => self.edges.len(),
            ElementKind::Face => self.faces.len(),
            ElementKind::Region => self.regions.len(),
        }
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Create an empty named group and return its index within `kind`.
    pub fn new_group(&mut self, kind: GroupKind, name: impl Into<String>) -> usize {
        let groups = &mut self.groups[kind.index()];
        groups.push(Group::new(name));
        groups.len() - 1
    }

    pub fn groups(&self, kind: GroupKind) -> &[Group] {
        &self.groups[kind.index()]
    }

    pub fn group_mut(&mut self, kind: GroupKind, index: usize) -> Option<&mut Group> {
        self.groups[kind.index()].get_mut(index)
    }

    /// First group of `kind` with the given name.
    pub fn find_group(&self, kind: GroupKind, name: &str) -> Option<&Group> {
        self.groups(kind).iter().find(|g| g.name() == name)
    }

    pub fn counts(&self) -> MeshCounts {
        MeshCounts {
            nodes: self.nodes.len() as u64,
            edges: self.edges.len() as u64,
            faces: self.faces.len() as u64,
            regions: self.regions.len() as u64,
            groups: GroupKind::ALL.map(|kind| self.groups(kind).len() as u64),
        }
    }
}
