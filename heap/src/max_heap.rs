use core::fmt;

/// Failures reported by the heap operations.
///
/// All of these are ordinary recoverable outcomes for the caller to branch
/// on. A failed operation leaves the heap unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Access to a slot outside the underlying storage.
    IndexOutOfRange,
    /// `peek_max` or `extract_max` on a heap with no active items.
    EmptyHeap,
    /// `insert` on a heap whose capacity is exhausted.
    HeapFull,
    /// `increase_key` with a key smaller than the current one.
    KeyDecreaseRejected,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            HeapError::IndexOutOfRange => "index out of range",
            HeapError::EmptyHeap => "heap underflow",
            HeapError::HeapFull => "heap overflow",
            HeapError::KeyDecreaseRejected => "new key is smaller than current key",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for HeapError {}

/// A storage slot of the heap.
///
/// Variant order matters: the derived `Ord` puts `NegInf` below every key.
/// `insert` stages a new item as `NegInf` so that `increase_key` can sift
/// the real key into place, the sentinel never outlives that call.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Slot<T> {
    NegInf,
    Key(T),
}

impl<T> Slot<T> {
    fn key(&self) -> &T {
        match self {
            Slot::Key(key) => key,
            Slot::NegInf => unreachable!("staged slot escaped insert"),
        }
    }

    fn into_key(self) -> T {
        match self {
            Slot::Key(key) => key,
            Slot::NegInf => unreachable!("staged slot escaped insert"),
        }
    }
}

/// A binary max-heap packed into contiguous storage.
///
/// Items at `[0, heap_size)` take part in heap order, slots behind them
/// hold staged items or already sorted output. `build` activates the stored
/// items, after that the priority queue operations and `sort` restore the
/// order invariant on every call.
pub struct MaxHeap<T> {
    // INVARIANTS:
    //  * `heap_size <= slots.len() <= capacity`
    //  * every slot in `[0, slots.len())` is `Slot::Key`, except the one
    //    staged inside `insert` before `increase_key` fills it
    //  * for every `i` in `[1, heap_size)` between public calls:
    //    `slots[parent(i)] >= slots[i]`
    slots: Vec<Slot<T>>,
    heap_size: usize,
    capacity: usize,
}

impl<T> fmt::Debug for MaxHeap<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaxHeap")
            .field("heap_size", &self.heap_size)
            .field("capacity", &self.capacity)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<T> MaxHeap<T> {
    /// An empty heap that can hold up to `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            heap_size: 0,
            capacity,
        }
    }

    /// Take over an existing sequence without assuming anything about its
    /// order. No item is active until `build` is called.
    pub fn from_vec(items: Vec<T>) -> Self {
        let capacity = items.len();
        Self {
            slots: items.into_iter().map(Slot::Key).collect(),
            heap_size: 0,
            capacity,
        }
    }

    /// Number of items currently in heap order.
    pub fn len(&self) -> usize {
        self.heap_size
    }

    pub fn is_empty(&self) -> bool {
        self.heap_size == 0
    }

    /// Upper bound on `len`, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read the slot at `index`, active or not.
    pub fn get(&self, index: usize) -> Result<&T, HeapError> {
        match self.slots.get(index) {
            Some(slot) => Ok(slot.key()),
            None => Err(HeapError::IndexOutOfRange),
        }
    }

    /// Overwrite the slot at `index`.
    ///
    /// This is the raw mutator, it does not re-establish heap order. Run
    /// `build` before using the ordering operations again.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), HeapError> {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Slot::Key(value);
                Ok(())
            }
            None => Err(HeapError::IndexOutOfRange),
        }
    }

    /// Give up the storage. After `sort` this is the ascending output.
    pub fn into_vec(self) -> Vec<T> {
        self.slots.into_iter().map(Slot::into_key).collect()
    }

    fn left(index: usize) -> usize {
        2 * index + 1
    }

    fn right(index: usize) -> usize {
        2 * index + 2
    }

    fn parent(index: usize) -> usize {
        (index - 1) / 2
    }
}

impl<T> MaxHeap<T>
where
    T: Ord,
{
    /// Activate all stored items and establish max-heap order, O(n).
    pub fn build(&mut self) {
        self.heap_size = self.slots.len();
        if self.heap_size < 2 {
            // empty or single item, already a heap
            return;
        }

        // Sift down all parent nodes from the bottom up. A leaf is a proper
        // heap on its own, and by going bottom up both child trees are
        // proper heaps by the time their parent is processed.
        // The last parent sits at (last_index - 1) / 2.
        let last_parent = (self.heap_size - 2) / 2;
        for index in (0..=last_parent).rev() {
            self.sift_down(index);
        }
    }

    /// Move the item at `index` down the tree until heap order below it is
    /// restored.
    ///
    /// Both child trees of `index` must already be proper max-heaps.
    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut largest = index;

            let left = Self::left(index);
            if left < self.heap_size && self.slots[left] > self.slots[largest] {
                largest = left;
            }

            let right = Self::right(index);
            if right < self.heap_size && self.slots[right] > self.slots[largest] {
                largest = right;
            }

            if largest == index {
                // no child is larger, order holds from here down
                break;
            }

            self.slots.swap(index, largest);
            index = largest;
        }
    }

    /// The largest active item, O(1).
    pub fn peek_max(&self) -> Result<&T, HeapError> {
        if self.heap_size == 0 {
            return Err(HeapError::EmptyHeap);
        }
        Ok(self.slots[0].key())
    }

    /// Remove and return the largest active item, O(log n).
    pub fn extract_max(&mut self) -> Result<T, HeapError> {
        if self.heap_size == 0 {
            return Err(HeapError::EmptyHeap);
        }

        // Move the last active item to the root, take the old root out of
        // the storage, then sift the new root down over the shrunk range.
        self.heap_size -= 1;
        self.slots.swap(0, self.heap_size);
        let max = self.slots.remove(self.heap_size).into_key();
        self.sift_down(0);
        Ok(max)
    }

    /// Raise the key of the active item at `index` to `key`, O(log n).
    ///
    /// Lowering a key is not supported and is rejected without touching
    /// the heap.
    pub fn increase_key(&mut self, index: usize, key: T) -> Result<(), HeapError> {
        if index >= self.heap_size {
            return Err(HeapError::IndexOutOfRange);
        }
        // a slot staged by `insert` compares below every key and never
        // rejects
        if let Slot::Key(current) = &self.slots[index] {
            if &key < current {
                return Err(HeapError::KeyDecreaseRejected);
            }
        }
        self.slots[index] = Slot::Key(key);

        // The new key may outgrow its ancestors, swap it up until the
        // parent is at least as large or the root is reached.
        let mut index = index;
        while index > 0 {
            let parent = Self::parent(index);
            if self.slots[parent] >= self.slots[index] {
                break;
            }
            self.slots.swap(index, parent);
            index = parent;
        }
        Ok(())
    }

    /// Add a new active item, O(log n).
    ///
    /// Capacity is fixed at construction, a full heap rejects the insert.
    pub fn insert(&mut self, key: T) -> Result<(), HeapError> {
        if self.heap_size == self.capacity {
            return Err(HeapError::HeapFull);
        }

        // Stage a slot that compares below every key, then let increase_key
        // sift the real key into place. Sift-up logic exists only there.
        if self.heap_size == self.slots.len() {
            self.slots.push(Slot::NegInf);
        } else {
            self.slots[self.heap_size] = Slot::NegInf;
        }
        self.heap_size += 1;
        self.increase_key(self.heap_size - 1, key)
    }

    /// Sort the stored items ascending in place, O(n log n).
    ///
    /// Repeatedly swaps the maximum behind the shrinking active range, the
    /// storage doubles as the heap and as the growing sorted suffix.
    /// Afterwards no item is active, `build` re-activates them.
    pub fn sort(&mut self) {
        self.build();

        for index in (1..self.slots.len()).rev() {
            // slots[..heap_size] is a max-heap, slots[index..] holds the
            // largest items in ascending order
            self.slots.swap(0, index);
            self.heap_size -= 1;
            self.sift_down(0);
        }
        // the smallest item alone at the root is trivially in place
        self.heap_size = 0;
    }
}
