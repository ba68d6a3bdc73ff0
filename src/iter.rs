use crate::queue::CacheQueue;

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// Iterator over the elements of a [`CacheQueue`], from front to back.
pub struct Iter<'a, T> {
    front: slice::Iter<'a, T>,
    wrapped: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new((front, wrapped): (&'a [T], &'a [T])) -> Self {
        Self {
            front: front.iter(),
            wrapped: wrapped.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.front.next().or_else(|| self.wrapped.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.wrapped.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.wrapped.next_back().or_else(|| self.front.next_back())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            wrapped: self.wrapped.clone(),
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator over the elements of a [`CacheQueue`], from front to back.
pub struct IterMut<'a, T> {
    front: slice::IterMut<'a, T>,
    wrapped: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new((front, wrapped): (&'a mut [T], &'a mut [T])) -> Self {
        Self {
            front: front.iter_mut(),
            wrapped: wrapped.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.front.next().or_else(|| self.wrapped.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.wrapped.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.wrapped.next_back().or_else(|| self.front.next_back())
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator, pops elements from the front of the queue.
#[derive(Clone)]
pub struct IntoIter<T, const N: usize> {
    queue: CacheQueue<T, N>,
}

impl<T, const N: usize> IntoIter<T, N> {
    pub(crate) fn new(queue: CacheQueue<T, N>) -> Self {
        Self { queue }
    }
}

impl<T: Default, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T: Default, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        self.queue.pop_back()
    }
}

impl<T: Default, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T: Default, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.queue).finish()
    }
}
