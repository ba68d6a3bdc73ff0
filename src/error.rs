use std::error::Error;
use std::{fmt, result};

pub type Result<T> = result::Result<T, CacheQueueError>;

/// Enum with possibles errors that can occur while building a [`CacheQueue`](crate::CacheQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheQueueError {
    /// More elements were given than the queue can hold without overwriting.
    CapacityExceeded { capacity: usize, requested: usize },
}

impl Error for CacheQueueError {}

impl fmt::Display for CacheQueueError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use CacheQueueError::*;

        match *self {
            CapacityExceeded { capacity, requested } => {
                write!(fmt, "cannot store {} elements in a queue with capacity {}", requested, capacity)
            }
        }
    }
}
