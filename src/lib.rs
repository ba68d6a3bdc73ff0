//! Fixed capacity double ended queue backed by an inline ring of `N` slots.
//!
//! Pushing into a full [`CacheQueue`] never fails: the element at the opposite
//! end is evicted and handed back to the caller. This makes it a good fit for
//! bounded lookback windows where only the `N` most recent insertions matter.
//!
//! ```
//! use cache_queue::CacheQueue;
//!
//! let mut window: CacheQueue<u32, 3> = CacheQueue::new();
//! window.extend([1, 2, 3]);
//! assert_eq!(window.push_back(4), Some(1));
//! assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
//! ```
mod error;
mod iter;
mod queue;

pub use error::{CacheQueueError, Result};
pub use iter::{IntoIter, Iter, IterMut};
pub use queue::CacheQueue;
