// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Named group translation between mesh ids and file ids.
//!
//! The same two routines serve clouds, lines, surfaces and volumes; the
//! remap table of the group's element kind does the translation.

use crate::codec::chunk::ChunkedStream;
use crate::codec::remap::RemapTable;
use crate::io::records::{GroupEvent, MemberChunk};
use crate::io::traits::{RecordSink, RecordSource};
use crate::mesh::{CellId, Mesh};
use crate::{CodecError, GroupKind, Result};

/// Write every group of `kind` as a `(name, size)` header and member chunks.
pub fn write_groups(
    mesh: &Mesh,
    sink: &mut dyn RecordSink,
    kind: GroupKind,
    table: &RemapTable<u64>,
    chunk_capacity: usize,
) -> Result<u64> {
    let groups = mesh.groups(kind);
    sink.write_group_section(kind, groups.len() as u64)?;

    for group in groups {
        sink.write_group_header(kind, group.name(), group.len() as u64)?;
        let context = format!("{kind} group '{}'", group.name());

        let mut stream = ChunkedStream::<MemberChunk>::new(chunk_capacity)?;
        for &member in group.members() {
            let file_id = table.resolve(u64::from(member), &context)?;
            stream.push(file_id, |chunk| sink.write_group_members(kind, chunk))?;
        }
        stream.finish(|chunk| sink.write_group_members(kind, chunk))?;
    }

    Ok(groups.len() as u64)
}

struct OpenGroup {
    index: usize,
    context: String,
    announced: u64,
    received: u64,
}

impl OpenGroup {
    fn close(self) -> Result<()> {
        if self.received != self.announced {
            return Err(CodecError::corrupt(
                self.context,
                format!(
                    "group announced {} members but holds {}",
                    self.announced, self.received
                ),
            ));
        }
        Ok(())
    }
}

/// Recreate every group of `kind` stored in `source`.
pub fn read_groups(
    mesh: &mut Mesh,
    source: &dyn RecordSource,
    kind: GroupKind,
    table: &RemapTable<CellId>,
) -> Result<u64> {
    let mut open: Option<OpenGroup> = None;
    let mut created = 0u64;

    source.visit_groups(kind, &mut |event| match event {
        GroupEvent::Begin { name, size } => {
            if let Some(previous) = open.take() {
                previous.close()?;
            }
            open = Some(OpenGroup {
                index: mesh.new_group(kind, name),
                context: format!("{kind} group '{name}'"),
                announced: size,
                received: 0,
            });
            created += 1;
            Ok(())
        }
        GroupEvent::Members(ids) => {
            let current = open.as_mut().ok_or_else(|| {
                CodecError::corrupt(
                    format!("{kind} groups"),
                    "member ids before any group header",
                )
            })?;
            let group = mesh.group_mut(kind, current.index).ok_or_else(|| {
                CodecError::corrupt(current.context.clone(), "group vanished while reading")
            })?;
            for &id in ids {
                group.add(table.resolve(id, &current.context)?);
            }
            current.received += ids.len() as u64;
            Ok(())
        }
    })?;

    if let Some(last) = open {
        last.close()?;
    }
    let announced = source.group_count(kind);
    if created != announced {
        return Err(CodecError::corrupt(
            format!("{kind} groups"),
            format!("group section announces {announced} groups but {created} were stored"),
        ));
    }
    Ok(created)
}
