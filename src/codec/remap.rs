// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dense id remapping between mesh ids and file-local ids.
//!
//! A [`RemapTable`] is sized once from the largest id of a kind and filled
//! only at the ids actually present. It lives for one read or write call.
//! Ids read from a file are untrusted: when the largest id is far above the
//! number of ids measured, the table falls back to a hash map instead of
//! allocating a slot for every possible id.

use std::collections::HashMap;

use crate::io::records::SectionInfo;
use crate::{CodecError, ElementKind, Result};

/// Whether the ids indexing a table start at 0 (mesh ids) or 1 (file ids).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdBase {
    Zero,
    One,
}

/// Slots allowed per measured id before a table goes sparse.
const DENSE_SLOTS_PER_ID: usize = 4;

/// Tables this small always stay dense.
const DENSE_MIN_SLOTS: usize = 1024;

#[derive(Debug, Clone)]
enum Slots<T> {
    Dense(Vec<Option<T>>),
    Sparse { len: usize, map: HashMap<u64, T> },
}

#[derive(Debug, Clone)]
pub struct RemapTable<T> {
    kind: ElementKind,
    base: IdBase,
    slots: Slots<T>,
    filled: usize,
}

fn slot_count(base: IdBase, max_id: u64) -> Option<usize> {
    let size = match base {
        IdBase::Zero => max_id.checked_add(1)?,
        IdBase::One => max_id,
    };
    usize::try_from(size).ok()
}

impl<T: Copy> RemapTable<T> {
    /// Allocate a dense table able to hold every id up to and including `max_id`.
    ///
    /// For ids of in-memory elements, whose bound is already backed by storage.
    pub fn with_max_id(kind: ElementKind, base: IdBase, max_id: u64) -> Self {
        let size = slot_count(base, max_id).unwrap_or(usize::MAX);
        Self {
            kind,
            base,
            slots: Slots::Dense(vec![None; size]),
            filled: 0,
        }
    }

    /// Allocate a table for `expected` ids whose largest value is `max_id`.
    ///
    /// Stays dense while the id range is at most a few slots per expected id,
    /// otherwise stores ids sparsely. Allocation failure is an error.
    pub fn try_with_max_id(
        kind: ElementKind,
        base: IdBase,
        max_id: u64,
        expected: usize,
    ) -> Result<Self> {
        let dense_limit = expected
            .saturating_mul(DENSE_SLOTS_PER_ID)
            .max(DENSE_MIN_SLOTS);
        let slots = match slot_count(base, max_id) {
            Some(size) if size <= dense_limit => {
                let mut slots = Vec::new();
                slots
                    .try_reserve_exact(size)
                    .map_err(|e| out_of_memory(kind, size, e))?;
                slots.resize(size, None);
                Slots::Dense(slots)
            }
            size => {
                tracing::debug!(
                    "Sparse {} id table: max id {} for {} ids",
                    kind,
                    max_id,
                    expected
                );
                let mut map = HashMap::new();
                map.try_reserve(expected)
                    .map_err(|e| out_of_memory(kind, expected, e))?;
                Slots::Sparse {
                    len: size.unwrap_or(usize::MAX),
                    map,
                }
            }
        };
        Ok(Self {
            kind,
            base,
            slots,
            filled: 0,
        })
    }

    /// An empty table for a kind with no elements.
    pub fn empty(kind: ElementKind, base: IdBase) -> Self {
        Self {
            kind,
            base,
            slots: Slots::Dense(Vec::new()),
            filled: 0,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Zero-based position of `id`, if it lies inside the table's range.
    #[inline]
    fn slot(&self, id: u64) -> Option<usize> {
        let index = match self.base {
            IdBase::Zero => id,
            IdBase::One => id.checked_sub(1)?,
        };
        let index = usize::try_from(index).ok()?;
        (index < self.capacity()).then_some(index)
    }

    /// Record `value` for `id`. Ids outside the table or defined twice are corrupt input.
    pub fn insert(&mut self, id: u64, value: T) -> Result<()> {
        let Some(index) = self.slot(id) else {
            return Err(CodecError::corrupt(
                format!("{} id table", self.kind),
                format!("{} id {id} is outside the measured range", self.kind),
            ));
        };
        let vacant = match &mut self.slots {
            Slots::Dense(slots) => slots[index].replace(value).is_none(),
            Slots::Sparse { map, .. } => map.insert(index as u64, value).is_none(),
        };
        if !vacant {
            return Err(CodecError::corrupt(
                format!("{} id table", self.kind),
                format!("{} id {id} is defined twice", self.kind),
            ));
        }
        self.filled += 1;
        Ok(())
    }

    /// Look up `id`; a missing entry is a dangling reference.
    #[inline]
    pub fn resolve(&self, id: u64, context: &str) -> Result<T> {
        self.slot(id)
            .and_then(|index| match &self.slots {
                Slots::Dense(slots) => slots[index],
                Slots::Sparse { map, .. } => map.get(&(index as u64)).copied(),
            })
            .ok_or_else(|| CodecError::dangling(self.kind, id, context))
    }

    /// Number of ids present.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Number of ids the table can address.
    pub fn capacity(&self) -> usize {
        match &self.slots {
            Slots::Dense(slots) => slots.len(),
            Slots::Sparse { len, .. } => *len,
        }
    }

    /// Whether ids are stored in a hash map rather than one slot per id.
    pub fn is_sparse(&self) -> bool {
        matches!(self.slots, Slots::Sparse { .. })
    }
}

fn out_of_memory(
    kind: ElementKind,
    count: usize,
    err: std::collections::TryReserveError,
) -> CodecError {
    CodecError::io(
        format!("failed to allocate a {kind} id table of {count} entries"),
        std::io::Error::new(std::io::ErrorKind::OutOfMemory, err),
    )
}

/// Single forward scan computing the contiguity flag of a sequence of ids.
///
/// The sequence is contiguous when each id is the previous one plus one.
/// An empty sequence is contiguous with count 0.
#[derive(Debug, Clone, Copy)]
pub struct ContiguityScan {
    count: u64,
    min_id: u64,
    last: Option<u64>,
    contiguous: bool,
}

impl ContiguityScan {
    pub fn new() -> Self {
        Self {
            count: 0,
            min_id: 0,
            last: None,
            contiguous: true,
        }
    }

    #[inline]
    pub fn observe(&mut self, id: u64) {
        match self.last {
            None => self.min_id = id,
            Some(previous) => {
                if previous.checked_add(1) != Some(id) {
                    self.contiguous = false;
                }
                self.min_id = self.min_id.min(id);
            }
        }
        self.last = Some(id);
        self.count += 1;
    }

    pub fn finish(self) -> SectionInfo {
        SectionInfo {
            contiguous: self.contiguous,
            count: self.count,
            min_id: self.min_id,
        }
    }
}

impl Default for ContiguityScan {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan a whole id sequence at once.
pub fn scan_contiguity<I: IntoIterator<Item = u64>>(ids: I) -> SectionInfo {
    let mut scan = ContiguityScan::new();
    for id in ids {
        scan.observe(id);
    }
    scan.finish()
}
