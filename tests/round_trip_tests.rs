// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip integration tests.
//!
//! Tests cover:
//! - Writing and reading back every supported shape in both formats
//! - Non-contiguous ids with and without compact renumbering
//! - Kind masks and mesh capability sets in both directions
//! - Header values (length unit, dimension) and file-to-file conversion

mod common;

use common::{
    assert_same_topology, file_in, mixed_mesh, node_line, partial_of, sparse_mesh, SUFFIXES,
};
use meshcodec::io::formats::mli::LegacyDocument;
use meshcodec::{
    read, write, Dimension, ElementKind, GroupKind, KindMask, Mesh, MeshModel, MeshReader,
    MeshWriter, WriterBuilder,
};

// ============================================================================
// Full Round Trips
// ============================================================================

#[test]
fn test_mixed_mesh_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = mixed_mesh();

    for suffix in SUFFIXES {
        let path = file_in(dir.path(), "mixed", suffix);
        let written = write(&mesh, &path, KindMask::all(), false).unwrap();
        assert_eq!(written, mesh.counts(), "{suffix}");
        assert!(!partial_of(&path).exists());

        let mut copy = Mesh::new(MeshModel::full_3d());
        let counts = read(&mut copy, &path, KindMask::all()).unwrap();
        assert_eq!(counts, mesh.counts(), "{suffix}");
        assert_same_topology(&mesh, &copy);
    }
}

#[test]
fn test_group_members_resolve_to_same_elements() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = mixed_mesh();
    let path = file_in(dir.path(), "groups", "mli2");
    write(&mesh, &path, KindMask::all(), false).unwrap();

    let mut copy = Mesh::default();
    read(&mut copy, &path, KindMask::all()).unwrap();

    let original = mesh.find_group(GroupKind::Volume, "solid").unwrap();
    let restored = copy.find_group(GroupKind::Volume, "solid").unwrap();
    let shapes = |m: &Mesh, ids: &[u32]| -> Vec<_> {
        ids.iter().map(|&id| m.region(id).unwrap().shape).collect()
    };
    assert_eq!(
        shapes(&mesh, original.members()),
        shapes(&copy, restored.members())
    );
}

#[test]
fn test_id_zero_is_written_as_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = file_in(dir.path(), "single", "mli");

    let mut mesh = Mesh::default();
    let first = mesh.new_node([4.0, 5.0, 6.0]);
    assert_eq!(first, 0);
    write(&mesh, &path, KindMask::all(), false).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let document: LegacyDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(document.nodes[0].id, 1);
    let section = document.section(ElementKind::Node).unwrap();
    assert!(section.contiguous);
    assert_eq!((section.count, section.min_id), (1, 1));

    let mut copy = Mesh::default();
    read(&mut copy, &path, KindMask::all()).unwrap();
    assert_eq!(copy.node(0).map(|n| n.xyz), Some([4.0, 5.0, 6.0]));
}

#[test]
fn test_empty_mesh_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    for suffix in SUFFIXES {
        let path = file_in(dir.path(), "empty", suffix);
        write(&Mesh::default(), &path, KindMask::all(), false).unwrap();

        let summary = meshcodec::inspect(&path).unwrap();
        for section in &summary.sections {
            assert!(section.info.contiguous, "{suffix}: {:?}", section.kind);
            assert_eq!(section.info.count, 0);
        }

        let mut copy = Mesh::default();
        let counts = read(&mut copy, &path, KindMask::all()).unwrap();
        assert_eq!(counts, Default::default());
    }
}

// ============================================================================
// Sparse Ids
// ============================================================================

#[test]
fn test_sparse_ids_keep_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = sparse_mesh();
    let path = file_in(dir.path(), "sparse", "mli2");
    write(&mesh, &path, KindMask::all(), false).unwrap();

    let summary = meshcodec::inspect(&path).unwrap();
    let nodes = summary.sections[0].info;
    assert!(!nodes.contiguous);
    assert_eq!((nodes.count, nodes.min_id), (8, 1));

    let mut copy = Mesh::default();
    read(&mut copy, &path, KindMask::all()).unwrap();
    assert_same_topology(&mesh, &copy);
}

#[test]
fn test_compact_write_is_contiguous() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = sparse_mesh();

    for suffix in SUFFIXES {
        let path = file_in(dir.path(), "compact", suffix);
        write(&mesh, &path, KindMask::all(), true).unwrap();

        let summary = meshcodec::inspect(&path).unwrap();
        for section in &summary.sections {
            assert!(section.info.contiguous, "{suffix}: {:?}", section.kind);
            if section.info.count > 0 {
                assert_eq!(section.info.min_id, 1);
            }
        }

        let mut copy = Mesh::default();
        read(&mut copy, &path, KindMask::all()).unwrap();
        assert_same_topology(&mesh, &copy);
    }
}

// ============================================================================
// Masks and Capabilities
// ============================================================================

#[test]
fn test_write_mask_drops_kinds_and_their_groups() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = mixed_mesh();
    let path = file_in(dir.path(), "surface", "mli2");

    let counts = write(&mesh, &path, KindMask::FACES, false).unwrap();
    assert_eq!(counts.nodes, 14);
    assert_eq!((counts.edges, counts.faces, counts.regions), (0, 4, 0));
    assert_eq!(counts.groups, [2, 0, 1, 0]);

    let mut copy = Mesh::default();
    let read_back = read(&mut copy, &path, KindMask::all()).unwrap();
    assert_eq!(read_back, counts);
    assert!(copy.groups(GroupKind::Volume).is_empty());
}

#[test]
fn test_read_mask_skips_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = mixed_mesh();
    let path = file_in(dir.path(), "all", "mli");
    write(&mesh, &path, KindMask::all(), false).unwrap();

    let mut copy = Mesh::default();
    let counts = read(&mut copy, &path, KindMask::EDGES).unwrap();
    assert_eq!(counts.nodes, 14);
    assert_eq!((counts.edges, counts.faces, counts.regions), (3, 0, 0));
    assert_eq!(counts.groups, [2, 1, 0, 0]);
}

#[test]
fn test_mesh_capability_limits_read() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = mixed_mesh();
    let path = file_in(dir.path(), "caps", "mli2");
    write(&mesh, &path, KindMask::all(), false).unwrap();

    let surface_model = MeshModel::new(Dimension::D2, KindMask::NODES | KindMask::FACES);
    let mut copy = Mesh::new(surface_model);
    let counts = read(&mut copy, &path, KindMask::all()).unwrap();
    assert_eq!((counts.edges, counts.faces, counts.regions), (0, 4, 0));
    assert_eq!(copy.count(ElementKind::Region), 0);
}

#[test]
fn test_mesh_capability_limits_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut mesh = Mesh::new(MeshModel::new(Dimension::D1, KindMask::NODES | KindMask::EDGES));
    let a = mesh.new_node([0.0, 0.0, 0.0]);
    let b = mesh.new_node([1.0, 0.0, 0.0]);
    let c = mesh.new_node([2.0, 0.0, 0.0]);
    mesh.new_edge([a, b]);
    // Not part of the model, so never written.
    mesh.new_triangle([a, b, c]);

    let path = file_in(dir.path(), "wire", "mli2");
    let counts = write(&mesh, &path, KindMask::all(), false).unwrap();
    assert_eq!((counts.edges, counts.faces), (1, 0));

    let reader = MeshReader::open(&path).unwrap();
    assert_eq!(reader.dimension(), Dimension::D1);
    assert!(reader.summary().sections.iter().all(|s| s.kind != ElementKind::Face));
}

// ============================================================================
// Header and Conversion
// ============================================================================

#[test]
fn test_length_unit_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    for suffix in SUFFIXES {
        let path = file_in(dir.path(), "unit", suffix);
        let mut writer = MeshWriter::create(&path).unwrap();
        writer.set_length_unit(0.0254);
        writer.write(&node_line(3), KindMask::all(), false).unwrap();

        let mut reader = MeshReader::open(&path).unwrap();
        reader.read(&mut Mesh::default(), KindMask::all()).unwrap();
        assert_eq!(reader.length_unit(), 0.0254, "{suffix}");
    }
}

#[test]
fn test_convert_legacy_to_chunked() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = mixed_mesh();
    let legacy = file_in(dir.path(), "model", "mli");
    let chunked = file_in(dir.path(), "model", "mli2");

    WriterBuilder::new()
        .path(&legacy)
        .length_unit(1e-3)
        .chunk_capacity(2)
        .build()
        .unwrap()
        .write(&mesh, KindMask::all(), false)
        .unwrap();

    let mut reader = MeshReader::open(&legacy).unwrap();
    let mut middle = Mesh::default();
    reader.read(&mut middle, KindMask::all()).unwrap();

    let mut writer = WriterBuilder::new()
        .path(&chunked)
        .length_unit(reader.length_unit())
        .chunk_capacity(3)
        .build()
        .unwrap();
    writer.write(&middle, KindMask::all(), false).unwrap();

    let mut last = Mesh::default();
    read(&mut last, &chunked, KindMask::all()).unwrap();
    assert_same_topology(&mesh, &last);
    assert_eq!(MeshReader::open(&chunked).unwrap().length_unit(), 1e-3);
}

#[test]
fn test_rewrite_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = file_in(dir.path(), "again", "mli2");

    write(&node_line(5), &path, KindMask::all(), false).unwrap();
    write(&node_line(2), &path, KindMask::all(), false).unwrap();

    let mut copy = Mesh::default();
    let counts = read(&mut copy, &path, KindMask::all()).unwrap();
    assert_eq!(counts.nodes, 2);
}
