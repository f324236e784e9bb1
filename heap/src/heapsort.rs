//! Heapsort on top of the max-heap primitives.

use crate::max_heap::MaxHeap;

/// Sort `items` ascending, O(n log n).
///
/// Builds a max-heap over the items and lets [`MaxHeap::sort`] swap each
/// maximum behind the shrinking active range until the storage is sorted.
pub fn heapsort<T: Ord>(items: Vec<T>) -> Vec<T> {
    let mut heap = MaxHeap::from_vec(items);
    heap.sort();
    heap.into_vec()
}
