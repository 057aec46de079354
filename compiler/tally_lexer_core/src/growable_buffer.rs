//! Append-only buffer with doubling growth and checked capacity math.
//!
//! Growth may move the whole storage region, so nothing outside the buffer
//! may hold an address into it across a [`push`](GrowableBuffer::push).
//! Callers keep indices instead; those stay valid forever because elements
//! are never removed or reordered.

use crate::LexError;

/// Largest element count whose byte size still fits a single allocation.
///
/// Allocations are limited to `isize::MAX` bytes. Zero-sized types never
/// allocate, so their limit is the full index range.
const fn max_capacity<T>() -> usize {
    let size = std::mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        (usize::MAX >> 1) / size
    }
}

/// Capacity to grow to when a buffer of `current` capacity is full.
///
/// Doubles, starting from 1. Clamps to `max` when doubling would pass it,
/// and returns `None` once `current` is already at the limit.
fn next_capacity(current: usize, max: usize) -> Option<usize> {
    if current >= max {
        return None;
    }
    if current == 0 {
        return Some(1);
    }
    Some(current.checked_mul(2).map_or(max, |doubled| doubled.min(max)))
}

/// Outcome of a successful [`GrowableBuffer::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Growth {
    /// The item went into spare capacity; storage did not move.
    InPlace,
    /// Capacity was raised before inserting; storage may have moved.
    Grown {
        old_capacity: usize,
        new_capacity: usize,
    },
}

impl Growth {
    /// Returns `true` if the push grew the buffer.
    #[inline]
    pub fn is_grown(self) -> bool {
        matches!(self, Growth::Grown { .. })
    }
}

/// Contiguous, append-only sequence of `T`.
///
/// # Invariant
///
/// `len() <= capacity()`, and elements `[0, len())` keep their values and
/// order across every growth. `capacity()` is the logical capacity tracked
/// by this type (the exact doubling sequence), independent of any slack the
/// allocator hands back.
#[derive(Clone, Debug)]
pub struct GrowableBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableBuffer<T> {
    /// Largest capacity a buffer of `T` may reach.
    pub const MAX_CAPACITY: usize = max_capacity::<T>();

    /// Create an empty buffer with zero capacity. Never allocates.
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Create an empty buffer with room for `initial` elements.
    pub fn with_capacity(initial: usize) -> Result<Self, LexError> {
        if initial > Self::MAX_CAPACITY {
            return Err(LexError::CapacityOverflow {
                requested: initial,
                max: Self::MAX_CAPACITY,
            });
        }

        let mut items = Vec::new();
        items
            .try_reserve_exact(initial)
            .map_err(|_| LexError::AllocationFailure { requested: initial })?;

        Ok(Self {
            items,
            capacity: initial,
        })
    }

    /// Append `item`, growing first if the buffer is full.
    ///
    /// On error the buffer is unchanged and `item` is dropped.
    pub fn push(&mut self, item: T) -> Result<Growth, LexError> {
        let growth = if self.items.len() == self.capacity {
            self.grow()?
        } else {
            Growth::InPlace
        };
        self.items.push(item);
        Ok(growth)
    }

    fn grow(&mut self) -> Result<Growth, LexError> {
        let old_capacity = self.capacity;
        let Some(new_capacity) = next_capacity(old_capacity, Self::MAX_CAPACITY) else {
            return Err(LexError::CapacityOverflow {
                requested: old_capacity.saturating_add(1),
                max: Self::MAX_CAPACITY,
            });
        };

        self.items
            .try_reserve_exact(new_capacity - self.items.len())
            .map_err(|_| LexError::AllocationFailure {
                requested: new_capacity,
            })?;
        self.capacity = new_capacity;

        Ok(Growth::Grown {
            old_capacity,
            new_capacity,
        })
    }

    /// Number of elements appended so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current logical capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// All elements in append order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
