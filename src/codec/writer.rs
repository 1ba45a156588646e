// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Topology writer: mesh elements to file records.
//!
//! For every kind enabled by both the mesh capability set and the caller's
//! mask, the writer assigns file ids, writes the section header and streams
//! element data in bounded chunks. Groups follow once all topology is out.
//!
//! File ids are `mesh id + 1`, or `1..=n` in enumeration order when the
//! write is compact. Every element is validated before it is pushed into a
//! chunk, so a failing element is never partially emitted.

use crate::codec::chunk::ChunkedStream;
use crate::codec::groups::write_groups;
use crate::codec::remap::{ContiguityScan, IdBase, RemapTable};
use crate::codec::shape::{
    check_capacity, classify_face, classify_region, region_tag, MAX_NODES_PER_ELEMENT,
};
use crate::io::records::{
    CellRecord, EdgeChunk, EdgeRecord, FaceChunk, FileHeader, NodeChunk, NodeRecord,
    RegionChunk, RegionRecord, SectionInfo,
};
use crate::io::traits::RecordSink;
use crate::mesh::{Mesh, MeshCounts};
use crate::{CodecError, ElementKind, GroupKind, KindMask, Result, Section, Stage};

/// Parameters of one write pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteOptions {
    pub kinds: KindMask,
    pub compact: bool,
    pub chunk_capacity: usize,
    pub length_unit: f64,
}

/// Write `mesh` through `sink`. The sink is not finished here.
pub fn write_mesh(
    mesh: &Mesh,
    sink: &mut dyn RecordSink,
    options: &WriteOptions,
) -> Result<MeshCounts> {
    let model = mesh.model();
    let enabled = KindMask::effective(model.kinds, options.kinds);
    tracing::debug!(
        "Writing mesh to {}: kinds {} (requested {}, capable {}), compact={}",
        sink.path().display(),
        enabled.letters(),
        options.kinds.letters(),
        model.kinds.letters(),
        options.compact
    );

    let header = FileHeader {
        length_unit: options.length_unit,
        dimension: model.dimension,
    };
    sink.write_header(&header)
        .map_err(|e| e.in_stage(Stage::write(Section::Header)))?;

    let mut counts = MeshCounts::default();
    let mut tables: [Option<RemapTable<u64>>; 4] = [None, None, None, None];

    for kind in ElementKind::ALL {
        if !enabled.has(kind) {
            continue;
        }
        let stage = Stage::write(kind.section());
        let (table, info) = assign_file_ids(mesh, kind, options.compact);
        sink.write_section(kind, &info)
            .map_err(|e| e.in_stage(stage))?;

        let written = match kind {
            ElementKind::Node => write_nodes(mesh, sink, &table, options.chunk_capacity),
            ElementKind::Edge => write_edges(mesh, sink, &table, node_table(&tables)?, options),
            ElementKind::Face => write_faces(mesh, sink, &table, node_table(&tables)?, options),
            ElementKind::Region => {
                write_regions(mesh, sink, &table, node_table(&tables)?, options)
            }
        }
        .map_err(|e| e.in_stage(stage))?;

        tracing::debug!(
            "Wrote {} {}s (contiguous={}, min id {})",
            written,
            kind,
            info.contiguous,
            info.min_id
        );
        counts.set_elements(kind, written);
        tables[kind as usize] = Some(table);
    }

    for group_kind in GroupKind::ALL {
        let Some(table) = &tables[group_kind.element_kind() as usize] else {
            if !mesh.groups(group_kind).is_empty() {
                tracing::warn!(
                    context = "topology_writer",
                    "Skipping {} {} groups: {}s are not written",
                    mesh.groups(group_kind).len(),
                    group_kind,
                    group_kind.element_kind()
                );
            }
            continue;
        };
        counts.groups[group_kind.index()] =
            write_groups(mesh, sink, group_kind, table, options.chunk_capacity)
                .map_err(|e| e.in_stage(Stage::write(group_kind.section())))?;
    }

    Ok(counts)
}

fn node_table(tables: &[Option<RemapTable<u64>>; 4]) -> Result<&RemapTable<u64>> {
    tables[ElementKind::Node as usize]
        .as_ref()
        .ok_or_else(|| CodecError::corrupt("topology writer", "node ids were not assigned"))
}

/// Build the mesh id to file id table of one kind and its section header.
pub(crate) fn assign_file_ids(
    mesh: &Mesh,
    kind: ElementKind,
    compact: bool,
) -> (RemapTable<u64>, SectionInfo) {
    let bound = mesh.id_bound(kind);
    let mut table = if bound == 0 {
        RemapTable::empty(kind, IdBase::Zero)
    } else {
        RemapTable::with_max_id(kind, IdBase::Zero, bound as u64 - 1)
    };
    let mut scan = ContiguityScan::new();

    for (position, id) in mesh.ids(kind).enumerate() {
        let file_id = if compact {
            position as u64 + 1
        } else {
            u64::from(id) + 1
        };
        // Mesh ids are unique and below the bound, so this cannot fail.
        if table.insert(u64::from(id), file_id).is_ok() {
            scan.observe(file_id);
        }
    }

    (table, scan.finish())
}

fn write_nodes(
    mesh: &Mesh,
    sink: &mut dyn RecordSink,
    table: &RemapTable<u64>,
    chunk_capacity: usize,
) -> Result<u64> {
    let mut stream = ChunkedStream::<NodeChunk>::new(chunk_capacity)?;
    for (id, node) in mesh.nodes().iter() {
        let record = NodeRecord {
            id: table.resolve(u64::from(id), "node enumeration")?,
            xyz: node.xyz,
        };
        stream.push(record, |chunk| sink.write_nodes(chunk))?;
    }
    Ok(stream.finish(|chunk| sink.write_nodes(chunk))?.items)
}

fn write_edges(
    mesh: &Mesh,
    sink: &mut dyn RecordSink,
    table: &RemapTable<u64>,
    nodes: &RemapTable<u64>,
    options: &WriteOptions,
) -> Result<u64> {
    let mut stream = ChunkedStream::<EdgeChunk>::new(options.chunk_capacity)?;
    for (id, edge) in mesh.edges().iter() {
        let record = EdgeRecord {
            id: table.resolve(u64::from(id), "edge enumeration")?,
            nodes: [
                nodes.resolve(u64::from(edge.nodes[0]), "edge connectivity")?,
                nodes.resolve(u64::from(edge.nodes[1]), "edge connectivity")?,
            ],
        };
        stream.push(record, |chunk| sink.write_edges(chunk))?;
    }
    Ok(stream.finish(|chunk| sink.write_edges(chunk))?.items)
}

fn write_faces(
    mesh: &Mesh,
    sink: &mut dyn RecordSink,
    table: &RemapTable<u64>,
    nodes: &RemapTable<u64>,
    options: &WriteOptions,
) -> Result<u64> {
    let mut stream = ChunkedStream::<FaceChunk>::new(options.chunk_capacity)?;
    let mut connectivity = Vec::with_capacity(MAX_NODES_PER_ELEMENT);

    for (id, face) in mesh.faces().iter() {
        check_capacity(ElementKind::Face, u64::from(id), face.nodes.len())?;
        classify_face(face.nodes.len())?;
        translate(&face.nodes, nodes, "face connectivity", &mut connectivity)?;

        let record = CellRecord {
            id: table.resolve(u64::from(id), "face enumeration")?,
            nodes: &connectivity,
        };
        stream.push(record, |chunk| sink.write_faces(chunk))?;
    }
    Ok(stream.finish(|chunk| sink.write_faces(chunk))?.items)
}

fn write_regions(
    mesh: &Mesh,
    sink: &mut dyn RecordSink,
    table: &RemapTable<u64>,
    nodes: &RemapTable<u64>,
    options: &WriteOptions,
) -> Result<u64> {
    let mut stream = ChunkedStream::<RegionChunk>::new(options.chunk_capacity)?;
    let mut connectivity = Vec::with_capacity(MAX_NODES_PER_ELEMENT);

    for (id, region) in mesh.regions().iter() {
        check_capacity(ElementKind::Region, u64::from(id), region.nodes.len())?;
        let shape = classify_region(region.nodes.len())?;
        translate(&region.nodes, nodes, "region connectivity", &mut connectivity)?;

        let record = RegionRecord {
            id: table.resolve(u64::from(id), "region enumeration")?,
            shape_tag: region_tag(shape),
            nodes: &connectivity,
        };
        stream.push(record, |chunk| sink.write_regions(chunk))?;
    }
    Ok(stream.finish(|chunk| sink.write_regions(chunk))?.items)
}

fn translate(
    mesh_nodes: &[u32],
    nodes: &RemapTable<u64>,
    context: &str,
    out: &mut Vec<u64>,
) -> Result<()> {
    out.clear();
    for &node in mesh_nodes {
        out.push(nodes.resolve(u64::from(node), context)?);
    }
    Ok(())
}
