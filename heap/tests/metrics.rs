//! Comparison-count metrics for the heap operations, printed on demand.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use heap::heapsort::heapsort;
use heap::max_heap::MaxHeap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

struct Cmps<T> {
    inner: T,
    cmps: Rc<AtomicU64>,
}

impl<T> Cmps<T> {
    fn cmps(&self) -> u64 {
        self.cmps.load(Ordering::SeqCst)
    }
}

impl<T> PartialEq for Cmps<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmps.fetch_add(1, Ordering::SeqCst);
        self.inner == other.inner
    }
}

impl<T> PartialOrd for Cmps<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.cmps.fetch_add(1, Ordering::SeqCst);
        self.inner.partial_cmp(&other.inner)
    }
}

impl<T> Eq for Cmps<T> where T: Eq {}
impl<T> Ord for Cmps<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmps.fetch_add(1, Ordering::SeqCst);
        self.inner.cmp(&other.inner)
    }
}

fn gen_random(count: usize, key_max: i32) -> Vec<Cmps<i32>> {
    let counter = Rc::new(AtomicU64::new(0));
    let mut vec = Vec::with_capacity(count);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..count {
        let val = rng.gen_range(0..key_max);
        vec.push(Cmps {
            inner: val,
            cmps: Rc::clone(&counter),
        })
    }
    assert_eq!(vec.len(), count);
    vec
}

#[test]
#[ignore = "not a test, prints metrics"]
fn print_metrics() {
    fn print(name: &str, run: fn(Vec<Cmps<i32>>) -> Vec<Cmps<i32>>) {
        for count in [100, 1000, 10000] {
            let data = gen_random(count, i32::MAX);
            let out = run(data);
            println!("{name}_{count} = {}", out[0].cmps());
        }
    }

    fn build_heap(items: Vec<Cmps<i32>>) -> Vec<Cmps<i32>> {
        let mut heap = MaxHeap::from_vec(items);
        heap.build();
        heap.into_vec()
    }

    fn insert_one_by_one(items: Vec<Cmps<i32>>) -> Vec<Cmps<i32>> {
        let mut heap = MaxHeap::with_capacity(items.len());
        for it in items {
            heap.insert(it).unwrap();
        }
        heap.into_vec()
    }

    fn extract_all(items: Vec<Cmps<i32>>) -> Vec<Cmps<i32>> {
        let mut heap = MaxHeap::from_vec(items);
        heap.build();
        let mut out = Vec::with_capacity(heap.len());
        while let Ok(max) = heap.extract_max() {
            out.push(max);
        }
        out
    }

    fn std_sort(mut items: Vec<Cmps<i32>>) -> Vec<Cmps<i32>> {
        items.sort();
        items
    }

    // build is O(n) while n inserts are O(n log n), the counts show it
    print("build_heap", build_heap);
    print("insert_one_by_one", insert_one_by_one);
    print("extract_all", extract_all);
    print("heapsort", heapsort);
    print("std_sort", std_sort);
}
