// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bounded chunk buffering for record streams.
//!
//! A [`ChunkedStream`] owns one chunk buffer. Items are appended until the
//! buffer holds `capacity` items, at which point the flush callback receives
//! the full chunk and the buffer is cleared. [`ChunkedStream::finish`]
//! flushes whatever is left; an empty remainder is not flushed.

use crate::io::records::{
    CellRecord, EdgeChunk, EdgeRecord, FaceChunk, MemberChunk, NodeChunk, NodeRecord,
    RegionChunk, RegionRecord,
};
use crate::{CodecError, Result};

/// Historical number of elements per chunk record.
pub const DEFAULT_CHUNK_CAPACITY: usize = 10_000;

/// A chunk record that can be filled one item at a time.
pub trait ChunkRecord: Default {
    type Item<'a>;

    fn push(&mut self, item: Self::Item<'_>);

    /// Number of items in the chunk.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Reserve room for `additional` more items.
    fn reserve(&mut self, additional: usize);
}

impl ChunkRecord for NodeChunk {
    type Item<'a> = NodeRecord;

    fn push(&mut self, item: NodeRecord) {
        self.ids.push(item.id);
        self.xs.push(item.xyz[0]);
        self.ys.push(item.xyz[1]);
        self.zs.push(item.xyz[2]);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.xs.clear();
        self.ys.clear();
        self.zs.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.xs.reserve(additional);
        self.ys.reserve(additional);
        self.zs.reserve(additional);
    }
}

impl ChunkRecord for EdgeChunk {
    type Item<'a> = EdgeRecord;

    fn push(&mut self, item: EdgeRecord) {
        self.ids.push(item.id);
        self.connectivity.extend_from_slice(&item.nodes);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.connectivity.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.connectivity.reserve(additional * 2);
    }
}

impl ChunkRecord for FaceChunk {
    type Item<'a> = CellRecord<'a>;

    fn push(&mut self, item: CellRecord<'_>) {
        self.ids.push(item.id);
        // Callers check the record capacity before pushing.
        debug_assert!(item.nodes.len() <= usize::from(u8::MAX));
        self.vertex_counts.push(item.nodes.len() as u8);
        self.connectivity.extend_from_slice(item.nodes);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.vertex_counts.clear();
        self.connectivity.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.vertex_counts.reserve(additional);
        self.connectivity.reserve(additional * 4);
    }
}

impl ChunkRecord for RegionChunk {
    type Item<'a> = RegionRecord<'a>;

    fn push(&mut self, item: RegionRecord<'_>) {
        self.ids.push(item.id);
        debug_assert!(item.nodes.len() <= usize::from(u8::MAX));
        self.vertex_counts.push(item.nodes.len() as u8);
        self.shape_tags.push(item.shape_tag);
        self.connectivity.extend_from_slice(item.nodes);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.vertex_counts.clear();
        self.shape_tags.clear();
        self.connectivity.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.vertex_counts.reserve(additional);
        self.shape_tags.reserve(additional);
        self.connectivity.reserve(additional * 8);
    }
}

impl ChunkRecord for MemberChunk {
    type Item<'a> = u64;

    fn push(&mut self, id: u64) {
        self.ids.push(id);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn clear(&mut self) {
        self.ids.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
    }
}

/// Counters reported when a stream finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub items: u64,
    pub chunks: u64,
}

pub struct ChunkedStream<C: ChunkRecord> {
    buffer: C,
    capacity: usize,
    stats: StreamStats,
}

impl<C: ChunkRecord> ChunkedStream<C> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CodecError::invalid_config("chunk capacity must be at least 1"));
        }
        Ok(Self {
            buffer: C::default(),
            capacity,
            stats: StreamStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items waiting in the buffer.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Append one item, flushing the buffer once it reaches capacity.
    pub fn push<F>(&mut self, item: C::Item<'_>, flush: F) -> Result<()>
    where
        F: FnOnce(&C) -> Result<()>,
    {
        if self.buffer.is_empty() {
            self.buffer.reserve(self.capacity);
        }
        self.buffer.push(item);
        self.stats.items += 1;
        if self.buffer.len() >= self.capacity {
            self.flush(flush)?;
        }
        Ok(())
    }

    /// Flush the remainder and report totals.
    pub fn finish<F>(mut self, flush: F) -> Result<StreamStats>
    where
        F: FnOnce(&C) -> Result<()>,
    {
        self.flush(flush)?;
        Ok(self.stats)
    }

    fn flush<F>(&mut self, flush: F) -> Result<()>
    where
        F: FnOnce(&C) -> Result<()>,
    {
        if self.buffer.is_empty() {
            return Ok(());
        }
        flush(&self.buffer)?;
        self.stats.chunks += 1;
        self.buffer.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(capacity: usize, items: u64) -> (Vec<usize>, StreamStats) {
        let mut sizes = Vec::new();
        let mut stream = ChunkedStream::<MemberChunk>::new(capacity).unwrap();
        for id in 0..items {
            stream
                .push(id + 1, |chunk| {
                    sizes.push(chunk.len());
                    Ok(())
                })
                .unwrap();
        }
        let stats = stream
            .finish(|chunk| {
                sizes.push(chunk.len());
                Ok(())
            })
            .unwrap();
        (sizes, stats)
    }

    #[test]
    fn test_flush_on_full_and_on_end() {
        assert_eq!(run(4, 3).0, vec![3]);
        assert_eq!(run(4, 4).0, vec![4]);
        assert_eq!(run(4, 5).0, vec![4, 1]);
        assert_eq!(run(4, 9).0, vec![4, 4, 1]);
    }

    #[test]
    fn test_empty_stream_never_flushes() {
        let (sizes, stats) = run(4, 0);
        assert!(sizes.is_empty());
        assert_eq!(stats, StreamStats::default());
    }

    #[test]
    fn test_stats_count_items_and_chunks() {
        let (_, stats) = run(10, 25);
        assert_eq!(stats.items, 25);
        assert_eq!(stats.chunks, 3);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(ChunkedStream::<NodeChunk>::new(0).is_err());
    }

    #[test]
    fn test_flush_failure_aborts() {
        let mut stream = ChunkedStream::<MemberChunk>::new(1).unwrap();
        let err = stream
            .push(1, |_| Err(CodecError::corrupt("sink", "disk full")))
            .unwrap_err();
        assert!(matches!(err, CodecError::Corrupt { .. }));
    }

    #[test]
    fn test_face_chunk_items() {
        let mut stream = ChunkedStream::<FaceChunk>::new(2).unwrap();
        let mut flushed = Vec::new();
        let faces: Vec<(u64, Vec<u64>)> = vec![(1, vec![1, 2, 3]), (2, vec![2, 3, 4, 5])];
        for (id, nodes) in &faces {
            stream
                .push(CellRecord { id: *id, nodes }, |chunk| {
                    flushed.push(chunk.clone());
                    Ok(())
                })
                .unwrap();
        }
        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].vertex_counts, vec![3, 4]);
        assert_eq!(flushed[0].connectivity.len(), 7);
        assert_eq!(stream.pending(), 0);
    }
}
