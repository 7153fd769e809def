//! Segmented bump arena that owns every syntax node of a compilation unit.
//!
//! Values are appended to the newest segment and never move once placed.
//! A segment is a `Vec` created with a fixed capacity that is never pushed
//! past, so growing the arena chains a new segment instead of reallocating.
//! Individual values are never freed; [`Arena::reset`] drops everything at
//! once and restarts from the initial capacity.
//!
//! Accounting is in bytes, mirroring a raw bump allocator: each value
//! costs `size_of::<T>()` bytes (at least one) and each segment costs
//! its capacity plus a fixed header.

use std::fmt;
use std::mem;

use tracing::{debug, trace};

/// Bytes charged per segment on top of its capacity.
const SEGMENT_HEADER: usize = mem::size_of::<usize>();

/// Arena sizing, in bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ArenaConfig {
    /// Capacity of the first segment (and of the first segment after a reset).
    pub initial_capacity: usize,
    /// Upper bound for the capacity of a chained segment.
    ///
    /// A single request larger than this still succeeds; its segment is
    /// sized to exactly the request.
    pub maximum_segment_size: usize,
}

impl ArenaConfig {
    pub const DEFAULT_INITIAL_CAPACITY: usize = 4 * 1024;
    pub const DEFAULT_MAXIMUM_SEGMENT_SIZE: usize = 1024 * 1024;
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            maximum_segment_size: Self::DEFAULT_MAXIMUM_SEGMENT_SIZE,
        }
    }
}

struct Segment<T> {
    /// Index of the first value stored in this segment.
    base: u32,
    /// Capacity in bytes.
    capacity: usize,
    items: Vec<T>,
}

/// Typed bump arena addressed by `u32` indices.
pub struct Arena<T> {
    config: ArenaConfig,
    /// Oldest first; the last segment is the one being filled.
    segments: Vec<Segment<T>>,
    /// Bytes handed out so far.
    size: usize,
    /// Bytes used in the current segment.
    used: usize,
    /// Capacity of the current segment.
    current_capacity: usize,
    /// Bytes obtained for all segments, headers included.
    total_bytes: usize,
    len: u32,
}

impl<T> Arena<T> {
    /// Create an arena and its first segment.
    pub fn new(config: ArenaConfig) -> Self {
        let mut arena = Arena {
            config,
            segments: Vec::new(),
            size: 0,
            used: 0,
            current_capacity: 0,
            total_bytes: 0,
            len: 0,
        };
        arena.refill(config.initial_capacity);
        arena
    }

    #[inline]
    fn item_size() -> usize {
        mem::size_of::<T>().max(1)
    }

    fn refill(&mut self, capacity: usize) {
        let slots = capacity / Self::item_size();
        self.segments.push(Segment {
            base: self.len,
            capacity,
            items: Vec::with_capacity(slots),
        });
        self.current_capacity = capacity;
        self.used = 0;
        self.total_bytes += capacity + SEGMENT_HEADER;
        debug!(
            capacity,
            segments = self.segments.len(),
            "arena chained new segment"
        );
    }

    /// Place `value` in the arena and return its index.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` values are allocated.
    pub fn alloc(&mut self, value: T) -> u32 {
        let size = Self::item_size();
        if self.used + size > self.current_capacity {
            let mut capacity = self
                .current_capacity
                .saturating_mul(2)
                .min(self.config.maximum_segment_size);
            if capacity < size {
                capacity = size;
            }
            self.refill(capacity);
        }

        let index = self.len;
        assert!(index < u32::MAX - 1, "arena exceeded {} values", u32::MAX - 1);
        if let Some(segment) = self.segments.last_mut() {
            segment.items.push(value);
        }
        self.used += size;
        self.size += size;
        self.len += 1;
        index
    }

    fn segment_of(&self, index: u32) -> Option<&Segment<T>> {
        let pos = self.segments.partition_point(|s| s.base <= index);
        self.segments.get(pos.checked_sub(1)?)
    }

    /// Value at `index`, if it was allocated since the last reset.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&T> {
        let segment = self.segment_of(index)?;
        segment.items.get((index - segment.base) as usize)
    }

    /// Drop every value and segment, then start over with the initial capacity.
    pub fn reset(&mut self) {
        trace!(
            values = self.len,
            segments = self.segments.len(),
            "arena reset"
        );
        self.segments.clear();
        self.size = 0;
        self.used = 0;
        self.current_capacity = 0;
        self.total_bytes = 0;
        self.len = 0;
        self.refill(self.config.initial_capacity);
    }

    /// Bytes handed out since the last reset.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bytes obtained for segments, including per-segment overhead.
    #[inline]
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Capacity of every segment, oldest first.
    pub fn segment_capacities(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().map(|s| s.capacity)
    }

    /// Capacity of the segment currently being filled.
    #[inline]
    pub fn current_capacity(&self) -> usize {
        self.current_capacity
    }

    #[inline]
    pub fn config(&self) -> ArenaConfig {
        self.config
    }

    /// Number of values allocated.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Values in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.segments.iter().flat_map(|s| s.items.iter())
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("size", &self.size)
            .field("segments", &self.segments.len())
            .field("current_capacity", &self.current_capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests;
