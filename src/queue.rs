use crate::error::{CacheQueueError, Result};
use crate::iter::{IntoIter, Iter, IterMut};

use log::{debug, trace};

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// Fixed capacity double ended queue stored in an inline ring of `N` slots.
///
/// Logical index `0` is the front and `len() - 1` the back. Pushing into a full
/// queue evicts the element at the opposite end, so pushes never fail and the
/// queue never allocates.
///
/// Slots outside the logical range keep stale values until they are
/// overwritten; they are never reachable through this interface.
#[derive(Clone)]
pub struct CacheQueue<T, const N: usize> {
    entries: [T; N],
    head: usize,
    len: usize,
}

impl<T: Default, const N: usize> CacheQueue<T, N> {
    /// Creates an empty queue with every slot default initialized.
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| T::default()),
            head: 0,
            len: 0,
        }
    }

    /// Removes the front element, leaving a default value in its slot.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = mem::take(&mut self.entries[self.head]);
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(value)
    }

    /// Removes the back element, leaving a default value in its slot.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let index = self.back_offset();
        self.len -= 1;
        Some(mem::take(&mut self.entries[index]))
    }

    /// Pops elements from the back until at most `len` remain.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.pop_back();
        }
    }
}

impl<T: Clone + Default, const N: usize> CacheQueue<T, N> {
    /// Builds a queue holding a copy of `values`, front to back.
    ///
    /// Unlike collecting from an iterator this never drops elements: a slice
    /// longer than `N` is rejected.
    pub fn try_from_slice(values: &[T]) -> Result<Self> {
        if values.len() > N {
            debug!("Rejected slice of {} elements for cache queue of capacity {}", values.len(), N);
            return Err(CacheQueueError::CapacityExceeded {
                capacity: N,
                requested: values.len(),
            });
        }

        let mut queue = Self::new();
        queue.extend(values.iter().cloned());
        Ok(queue)
    }
}

impl<T, const N: usize> CacheQueue<T, N> {
    pub const CAPACITY: usize = N;

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A zero capacity queue is always both empty and full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Physical slot of logical index `offset`, reduced modulo `N`.
    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset % N) % N
    }

    /// Physical slot of the front element.
    #[inline]
    pub fn head_offset(&self) -> usize {
        self.head
    }

    /// Physical slot of the back element, `(head + len - 1) mod N`.
    ///
    /// On an empty queue this is the slot just before the head.
    pub fn back_offset(&self) -> usize {
        if N == 0 {
            return 0;
        }
        (self.head + self.len + N - 1) % N
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.entries[self.head])
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        Some(&mut self.entries[self.head])
    }

    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.entries[self.back_offset()])
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let index = self.back_offset();
        Some(&mut self.entries[index])
    }

    /// Returns the element at logical `index`, counting from the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(&self.entries[self.slot(index)])
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.slot(index);
        Some(&mut self.entries[slot])
    }

    /// Unchecked logical access: `index` is only reduced modulo `N`.
    ///
    /// Indices past `len()` alias other slots instead of failing. Those
    /// slots never hold what was last popped from them: pops leave
    /// `T::default()` behind, and partial rotation swaps elements, so a slot
    /// vacated by a rotation holds whatever the moved element displaced.
    ///
    /// # Panics
    ///
    /// Panics if the queue has zero capacity.
    pub fn get_wrapping(&self, index: usize) -> &T {
        &self.entries[self.slot(index)]
    }

    /// Mutable counterpart of [`get_wrapping`](Self::get_wrapping).
    pub fn get_wrapping_mut(&mut self, index: usize) -> &mut T {
        let slot = self.slot(index);
        &mut self.entries[slot]
    }

    /// Inserts `value` as the new front.
    ///
    /// If the queue was full the back element is evicted and returned.
    pub fn push_front(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return Some(value);
        }

        if self.is_empty() {
            self.head = 0;
            self.entries[0] = value;
            self.len = 1;
            return None;
        }

        // When full the slot before the head is the current back.
        self.head = (self.head + N - 1) % N;
        let previous = mem::replace(&mut self.entries[self.head], value);
        if self.is_full() {
            return Some(previous);
        }
        self.len += 1;
        None
    }

    /// Inserts `value` as the new back.
    ///
    /// If the queue was full the front element is evicted and returned.
    pub fn push_back(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return Some(value);
        }

        if self.is_empty() {
            self.head = 0;
            self.entries[0] = value;
            self.len = 1;
            return None;
        }

        if self.is_full() {
            let evicted = mem::replace(&mut self.entries[self.head], value);
            self.head = (self.head + 1) % N;
            return Some(evicted);
        }

        let slot = self.slot(self.len);
        self.entries[slot] = value;
        self.len += 1;
        None
    }

    /// Forgets every element in O(1). Storage is left untouched.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Rotates the backing storage so the front lives in slot 0.
    ///
    /// Length and logical order are unchanged. Calling it again is a no-op.
    pub fn reset(&mut self) {
        if self.head == 0 {
            return;
        }

        trace!("Resetting cache queue layout, head was at slot {}", self.head);
        self.entries.rotate_left(self.head);
        self.head = 0;
    }

    /// Resets the layout and returns the logical content as one slice.
    pub fn make_contiguous(&mut self) -> &mut [T] {
        self.reset();
        &mut self.entries[..self.len]
    }

    /// Moves the front `k` positions forward through the sequence.
    ///
    /// A positive `k` repeatedly moves the front element to the back, a
    /// negative `k` moves the back element to the front. The physical layout
    /// afterwards is the one produced by that pop then push sequence.
    pub fn rotate(&mut self, k: isize) {
        if k == 0 || self.is_empty() {
            return;
        }

        trace!("Rotating cache queue of length {} by {}", self.len, k);
        if self.is_full() {
            // A pop followed by a push writes the element back where it was.
            let shift = k.rem_euclid(N as isize) as usize;
            self.head = (self.head + shift) % N;
            return;
        }

        if k > 0 {
            for _ in 0..k.unsigned_abs() {
                self.rotate_forward_once();
            }
        } else {
            for _ in 0..k.unsigned_abs() {
                self.rotate_backward_once();
            }
        }
    }

    // Not full and not empty.
    fn rotate_forward_once(&mut self) {
        debug_assert!(self.len > 0 && self.len < N);
        if self.len == 1 {
            // The pop empties the queue and the push re-anchors it at slot 0.
            self.entries.swap(self.head, 0);
            self.head = 0;
            return;
        }

        let target = self.slot(self.len);
        self.entries.swap(self.head, target);
        self.head = (self.head + 1) % N;
    }

    // Not full and not empty.
    fn rotate_backward_once(&mut self) {
        debug_assert!(self.len > 0 && self.len < N);
        let back = self.back_offset();
        let target = if self.len == 1 { 0 } else { (self.head + N - 1) % N };
        self.entries.swap(back, target);
        self.head = target;
    }

    /// Swaps the elements at logical indices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len, "swap index {} out of bounds for length {}", i, self.len);
        assert!(j < self.len, "swap index {} out of bounds for length {}", j, self.len);
        let (a, b) = (self.slot(i), self.slot(j));
        self.entries.swap(a, b);
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|entry| entry == value)
    }

    /// Logical content as the part up to the end of storage and the part
    /// that wrapped around to its start.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let end = self.head + self.len;
        if end <= N {
            (&self.entries[self.head..end], &[])
        } else {
            (&self.entries[self.head..], &self.entries[..end - N])
        }
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let end = self.head + self.len;
        if end <= N {
            (&mut self.entries[self.head..end], Default::default())
        } else {
            let (wrapped, front) = self.entries.split_at_mut(self.head);
            (front, &mut wrapped[..end - N])
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slices())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slices())
    }
}

impl<T: Default, const N: usize> Default for CacheQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<usize> for CacheQueue<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", self.len, index),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for CacheQueue<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for CacheQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for CacheQueue<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for CacheQueue<T, N> {}

impl<T, const N: usize> Extend<T> for CacheQueue<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// Keeps only the last `N` items of the iterator.
impl<T: Default, const N: usize> FromIterator<T> for CacheQueue<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: Clone + Default, const N: usize> TryFrom<&[T]> for CacheQueue<T, N> {
    type Error = CacheQueueError;

    fn try_from(values: &[T]) -> Result<Self> {
        Self::try_from_slice(values)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a CacheQueue<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut CacheQueue<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: Default, const N: usize> IntoIterator for CacheQueue<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> IntoIter<T, N> {
        IntoIter::new(self)
    }
}
