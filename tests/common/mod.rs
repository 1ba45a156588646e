// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use meshcodec::{CellId, GroupKind, Mesh, MeshModel};

// ============================================================================
// Mesh Fixtures
// ============================================================================

/// A mesh using every supported element shape and every group kind.
///
/// 14 nodes, 3 edges, 4 faces (tri, quad, pentagon, hexagon),
/// 4 regions (tet, pyramid, triangular prism, hex), 5 groups.
pub fn mixed_mesh() -> Mesh {
    let mut mesh = Mesh::new(MeshModel::full_3d());
    let n: Vec<CellId> = (0..14)
        .map(|i| {
            let i = i as f64;
            mesh.new_node([i, i * 0.5, -i * 0.25])
        })
        .collect();

    let e0 = mesh.new_edge([n[0], n[1]]);
    let e1 = mesh.new_edge([n[1], n[2]]);
    mesh.new_edge([n[12], n[13]]);

    let tri = mesh.new_triangle([n[0], n[1], n[2]]);
    let quad = mesh.new_quad([n[0], n[1], n[2], n[3]]);
    mesh.new_polygon(&n[0..5]).expect("pentagon");
    mesh.new_polygon(&n[0..6]).expect("hexagon");

    let tet = mesh.new_tet([n[0], n[1], n[2], n[3]]);
    mesh.new_pyramid([n[0], n[1], n[2], n[3], n[4]]);
    mesh.new_prism3([n[0], n[1], n[2], n[3], n[4], n[5]]);
    let hex = mesh.new_hex([n[6], n[7], n[8], n[9], n[10], n[11], n[12], n[13]]);

    add_group(&mut mesh, GroupKind::Cloud, "inlet", &n[0..4]);
    add_group(&mut mesh, GroupKind::Cloud, "outlet", &n[10..14]);
    add_group(&mut mesh, GroupKind::Line, "rim", &[e0, e1]);
    add_group(&mut mesh, GroupKind::Surface, "walls", &[tri, quad]);
    add_group(&mut mesh, GroupKind::Volume, "solid", &[tet, hex]);
    mesh
}

/// [`mixed_mesh`] with holes punched into the node and face id ranges.
///
/// Removes elements that nothing else references, so the mesh stays
/// consistent while its ids become non-contiguous.
pub fn sparse_mesh() -> Mesh {
    let mut mesh = Mesh::new(MeshModel::full_3d());
    let n: Vec<CellId> = (0..10).map(|i| mesh.new_node([i as f64, 0.0, 0.0])).collect();
    // Nodes 3 and 7 are never referenced.
    mesh.remove_node(n[3]);
    mesh.remove_node(n[7]);

    let f0 = mesh.new_triangle([n[0], n[1], n[2]]);
    let f1 = mesh.new_triangle([n[4], n[5], n[6]]);
    let f2 = mesh.new_quad([n[0], n[2], n[8], n[9]]);
    mesh.remove_face(f1);

    add_group(&mut mesh, GroupKind::Cloud, "ends", &[n[0], n[9]]);
    add_group(&mut mesh, GroupKind::Surface, "kept", &[f0, f2]);
    mesh
}

/// `count` nodes on a line plus one cloud holding all of them.
pub fn node_line(count: usize) -> Mesh {
    let mut mesh = Mesh::new(MeshModel::full_3d());
    let ids: Vec<CellId> = (0..count)
        .map(|i| mesh.new_node([i as f64 * 0.1, 0.0, 0.0]))
        .collect();
    add_group(&mut mesh, GroupKind::Cloud, "all", &ids);
    mesh
}

pub fn add_group(mesh: &mut Mesh, kind: GroupKind, name: &str, members: &[CellId]) {
    let index = mesh.new_group(kind, name);
    mesh.group_mut(kind, index)
        .expect("group just created")
        .extend(members.iter().copied());
}

// ============================================================================
// Files
// ============================================================================

/// Both supported suffixes, for tests that run against each format.
pub const SUFFIXES: [&str; 2] = ["mli", "mli2"];

/// Path `name.suffix` inside `dir`.
pub fn file_in(dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{name}.{suffix}"))
}

/// The staging file a writer uses before finalizing `path`.
pub fn partial_of(path: &Path) -> PathBuf {
    let mut name = path.file_name().expect("file name").to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

// ============================================================================
// Assertions
// ============================================================================

/// Coordinates of each node of an element, in element order.
fn coords(mesh: &Mesh, nodes: &[CellId]) -> Vec<[f64; 3]> {
    nodes
        .iter()
        .map(|&id| mesh.node(id).expect("live node").xyz)
        .collect()
}

/// Assert `actual` holds the same topology as `expected`.
///
/// Ids may differ; elements are matched by enumeration order and their
/// connectivity is compared through node coordinates.
pub fn assert_same_topology(expected: &Mesh, actual: &Mesh) {
    assert_eq!(expected.counts(), actual.counts(), "element and group counts");

    let expected_nodes: Vec<_> = expected.nodes().iter().map(|(_, n)| n.xyz).collect();
    let actual_nodes: Vec<_> = actual.nodes().iter().map(|(_, n)| n.xyz).collect();
    assert_eq!(expected_nodes, actual_nodes, "node coordinates");

    for ((_, a), (_, b)) in expected.edges().iter().zip(actual.edges().iter()) {
        assert_eq!(coords(expected, &a.nodes), coords(actual, &b.nodes));
    }
    for ((_, a), (_, b)) in expected.faces().iter().zip(actual.faces().iter()) {
        assert_eq!(a.shape, b.shape);
        assert_eq!(coords(expected, &a.nodes), coords(actual, &b.nodes));
    }
    for ((_, a), (_, b)) in expected.regions().iter().zip(actual.regions().iter()) {
        assert_eq!(a.shape, b.shape);
        assert_eq!(coords(expected, &a.nodes), coords(actual, &b.nodes));
    }

    for kind in GroupKind::ALL {
        let a = expected.groups(kind);
        let b = actual.groups(kind);
        assert_eq!(a.len(), b.len(), "{kind} group count");
        for (ga, gb) in a.iter().zip(b) {
            assert_eq!(ga.name(), gb.name());
            assert_eq!(ga.len(), gb.len(), "members of {kind} group {}", ga.name());
        }
    }
}
