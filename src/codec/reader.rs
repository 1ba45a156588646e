// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Topology reader: file records to mesh elements.
//!
//! Stages run strictly in order: nodes, edges, faces, regions, then the
//! groups of every kind that was read. Edges, faces and regions are skipped
//! when the mesh capability set or the caller's mask excludes them.
//!
//! Each kind is read in two passes over its chunks. The first pass
//! validates the chunks and measures the largest file id, the second
//! creates the mesh elements and fills a remap table sized from that
//! maximum. Later stages resolve their node (or member) references through
//! the tables built earlier.

use crate::codec::groups::read_groups;
use crate::codec::remap::{IdBase, RemapTable};
use crate::codec::shape::{
    check_capacity, classify_face, classify_region, region_from_tag, MAX_NODES_PER_ELEMENT,
};
use crate::io::records::FileHeader;
use crate::io::traits::RecordSource;
use crate::mesh::{CellId, Mesh, MeshCounts};
use crate::{CodecError, ElementKind, GroupKind, KindMask, Result, Section, Stage};

/// Parameters of one read pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub kinds: KindMask,
}

/// What a read pass produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadOutcome {
    pub header: FileHeader,
    pub counts: MeshCounts,
}

type Table = RemapTable<CellId>;

/// Populate `mesh` from `source`.
///
/// On failure the mesh may hold part of the file and should be discarded.
pub fn read_mesh(
    mesh: &mut Mesh,
    source: &dyn RecordSource,
    options: &ReadOptions,
) -> Result<ReadOutcome> {
    let model = mesh.model();
    let enabled = KindMask::effective(model.kinds, options.kinds);
    let header = *source.header();
    if header.dimension != model.dimension {
        tracing::debug!(
            "File {} is {} but the target mesh is {}",
            source.path().display(),
            header.dimension,
            model.dimension
        );
    }

    let mut counts = MeshCounts::default();
    let mut tables: [Option<Table>; 4] = [None, None, None, None];

    let nodes = read_nodes(mesh, source).map_err(|e| e.in_stage(Stage::read(Section::Nodes)))?;
    counts.nodes = nodes.len() as u64;
    tables[ElementKind::Node as usize] = Some(nodes);

    for kind in [ElementKind::Edge, ElementKind::Face, ElementKind::Region] {
        if !enabled.has(kind) {
            if source.section(kind).is_some_and(|info| info.count > 0) {
                tracing::warn!(
                    context = "topology_reader",
                    "Skipping {}s in {}: excluded by mask or mesh model",
                    kind,
                    source.path().display()
                );
            }
            continue;
        }
        let node_table = tables[ElementKind::Node as usize]
            .as_ref()
            .ok_or_else(|| CodecError::corrupt("topology reader", "nodes were not read"))?;
        let table = match kind {
            ElementKind::Edge => read_edges(mesh, source, node_table),
            ElementKind::Face => read_faces(mesh, source, node_table),
            _ => read_regions(mesh, source, node_table),
        }
        .map_err(|e| e.in_stage(Stage::read(kind.section())))?;

        counts.set_elements(kind, table.len() as u64);
        tables[kind as usize] = Some(table);
    }

    for group_kind in GroupKind::ALL {
        let Some(table) = &tables[group_kind.element_kind() as usize] else {
            continue;
        };
        counts.groups[group_kind.index()] = read_groups(mesh, source, group_kind, table)
            .map_err(|e| e.in_stage(Stage::read(group_kind.section())))?;
    }

    tracing::debug!(
        "Read {} nodes, {} edges, {} faces, {} regions from {}",
        counts.nodes,
        counts.edges,
        counts.faces,
        counts.regions,
        source.path().display()
    );

    Ok(ReadOutcome { header, counts })
}

/// Largest id and number of ids seen by the measuring pass.
#[derive(Debug, Default, Clone, Copy)]
struct Extent {
    max: u64,
    count: usize,
}

impl Extent {
    fn observe(&mut self, ids: &[u64]) {
        self.max = ids.iter().copied().fold(self.max, u64::max);
        self.count += ids.len();
    }
}

fn allocate(kind: ElementKind, extent: Extent) -> Result<Table> {
    let Extent { max, count } = extent;
    if max > u64::from(u32::MAX) {
        return Err(CodecError::corrupt(
            format!("{kind} section"),
            format!("{kind} id {max} exceeds the supported id range"),
        ));
    }
    RemapTable::try_with_max_id(kind, IdBase::One, max, count)
}

/// The section header, when present, must agree with the records read.
fn check_section_count(source: &dyn RecordSource, kind: ElementKind, read: usize) -> Result<()> {
    match source.section(kind) {
        Some(info) if info.count != read as u64 => Err(CodecError::corrupt(
            format!("{kind} section"),
            format!("header announces {} {kind}s but {read} were stored", info.count),
        )),
        _ => Ok(()),
    }
}

fn read_nodes(mesh: &mut Mesh, source: &dyn RecordSource) -> Result<Table> {
    let mut extent = Extent::default();
    source.visit_nodes(&mut |chunk| {
        chunk.validate("node chunk")?;
        extent.observe(&chunk.ids);
        Ok(())
    })?;

    let mut table = allocate(ElementKind::Node, extent)?;
    source.visit_nodes(&mut |chunk| {
        for record in chunk.records() {
            let handle = mesh.new_node(record.xyz);
            table.insert(record.id, handle)?;
        }
        Ok(())
    })?;

    check_section_count(source, ElementKind::Node, table.len())?;
    Ok(table)
}

fn read_edges(mesh: &mut Mesh, source: &dyn RecordSource, nodes: &Table) -> Result<Table> {
    let mut extent = Extent::default();
    source.visit_edges(&mut |chunk| {
        chunk.validate("edge chunk")?;
        extent.observe(&chunk.ids);
        Ok(())
    })?;

    let mut table = allocate(ElementKind::Edge, extent)?;
    source.visit_edges(&mut |chunk| {
        for record in chunk.records() {
            let a = nodes.resolve(record.nodes[0], "edge connectivity")?;
            let b = nodes.resolve(record.nodes[1], "edge connectivity")?;
            table.insert(record.id, mesh.new_edge([a, b]))?;
        }
        Ok(())
    })?;

    check_section_count(source, ElementKind::Edge, table.len())?;
    Ok(table)
}

fn read_faces(mesh: &mut Mesh, source: &dyn RecordSource, nodes: &Table) -> Result<Table> {
    let mut extent = Extent::default();
    source.visit_faces(&mut |chunk| {
        chunk.validate("face chunk")?;
        extent.observe(&chunk.ids);
        Ok(())
    })?;

    let mut table = allocate(ElementKind::Face, extent)?;
    let mut connectivity: Vec<CellId> = Vec::with_capacity(MAX_NODES_PER_ELEMENT);
    source.visit_faces(&mut |chunk| {
        for record in chunk.records() {
            check_capacity(ElementKind::Face, record.id, record.nodes.len())?;
            let shape = classify_face(record.nodes.len())?;
            resolve_all(record.nodes, nodes, "face connectivity", &mut connectivity)?;
            let handle = mesh.new_face(shape, &connectivity)?;
            table.insert(record.id, handle)?;
        }
        Ok(())
    })?;

    check_section_count(source, ElementKind::Face, table.len())?;
    Ok(table)
}

fn read_regions(mesh: &mut Mesh, source: &dyn RecordSource, nodes: &Table) -> Result<Table> {
    let mut extent = Extent::default();
    source.visit_regions(&mut |chunk| {
        chunk.validate("region chunk")?;
        extent.observe(&chunk.ids);
        Ok(())
    })?;

    let mut table = allocate(ElementKind::Region, extent)?;
    let mut connectivity: Vec<CellId> = Vec::with_capacity(MAX_NODES_PER_ELEMENT);
    source.visit_regions(&mut |chunk| {
        for record in chunk.records() {
            check_capacity(ElementKind::Region, record.id, record.nodes.len())?;
            let shape = classify_region(record.nodes.len())?;
            let tagged = region_from_tag(record.shape_tag)?;
            if tagged != shape {
                return Err(CodecError::corrupt(
                    "region chunk",
                    format!(
                        "region {} is tagged {} but has {} vertices",
                        record.id,
                        tagged,
                        record.nodes.len()
                    ),
                ));
            }
            resolve_all(record.nodes, nodes, "region connectivity", &mut connectivity)?;
            let handle = mesh.new_region(shape, &connectivity)?;
            table.insert(record.id, handle)?;
        }
        Ok(())
    })?;

    check_section_count(source, ElementKind::Region, table.len())?;
    Ok(table)
}

fn resolve_all(file_ids: &[u64], nodes: &Table, context: &str, out: &mut Vec<CellId>) -> Result<()> {
    out.clear();
    for &id in file_ids {
        out.push(nodes.resolve(id, context)?);
    }
    Ok(())
}
