//! Benchmarks for the indirect container family.
//!
//! Compares Heap against std's BinaryHeap and measures how MultiTop's
//! full-rescan maintenance and SortedQueue's bubbling scale with size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::cell::Cell;
use std::collections::BinaryHeap;
use std::rc::Rc;

use intruq::{Heap, MultiTop, PosSlot, Slotted, SortedQueue};

struct Job {
    cost: Cell<i64>,
    pos: PosSlot,
}

impl Job {
    fn new(cost: i64) -> Rc<Self> {
        Rc::new(Self {
            cost: Cell::new(cost),
            pos: PosSlot::new(),
        })
    }
}

impl Slotted for Job {
    fn slot(&self) -> &PosSlot {
        &self.pos
    }
}

fn ascending(a: &Job, b: &Job) -> bool {
    a.cost.get() < b.cost.get()
}

fn descending(a: &Job, b: &Job) -> bool {
    a.cost.get() > b.cost.get()
}

fn by_parity(a: &Job, b: &Job) -> bool {
    let (a, b) = (a.cost.get(), b.cost.get());
    match (a % 2 == 0, b % 2 == 0) {
        (true, false) => true,
        (false, true) => false,
        _ => a > b,
    }
}

type Cmp = fn(&Job, &Job) -> bool;

// Deterministic scrambled keys, no RNG dependency.
fn keys(n: usize) -> Vec<i64> {
    (0..n).map(|i| ((i * 7 + 13) % n) as i64).collect()
}

// ============================================================================
// Heap vs std BinaryHeap
// ============================================================================

fn bench_heap_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_push_pop");

    for n in [64usize, 1024, 16384] {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("intruq_heap", n), &n, |b, &n| {
            let keys = keys(n);
            b.iter(|| {
                let mut heap: Heap<Rc<Job>, Cmp> = Heap::new(ascending);
                for &k in &keys {
                    heap.push(Job::new(black_box(k)));
                }
                while let Some(job) = heap.pop() {
                    black_box(job.cost.get());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("std_binary_heap", n), &n, |b, &n| {
            let keys = keys(n);
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                for &k in &keys {
                    heap.push(std::cmp::Reverse(black_box(k)));
                }
                while let Some(std::cmp::Reverse(k)) = heap.pop() {
                    black_box(k);
                }
            });
        });
    }

    group.finish();
}

fn bench_heap_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_remove_by_handle");

    for n in [64usize, 1024, 16384] {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("intruq_heap", n), &n, |b, &n| {
            let keys = keys(n);
            b.iter(|| {
                let mut heap: Heap<Rc<Job>, Cmp> = Heap::new(ascending);
                let mut handles = Vec::with_capacity(n);
                for &k in &keys {
                    let job = Job::new(k);
                    handles.push(Rc::clone(&job));
                    heap.push(job);
                }
                for handle in &handles {
                    black_box(heap.remove(black_box(handle)));
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// MultiTop rescan scaling
// ============================================================================

fn bench_multi_top_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_top_adjust");

    for n in [64usize, 1024, 16384] {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("full_rescan", n), &n, |b, &n| {
            let mut q: MultiTop<Rc<Job>, Cmp, Cmp, Cmp> =
                MultiTop::new(ascending, descending, by_parity);
            let mut handles = Vec::with_capacity(n);
            for k in keys(n) {
                let job = Job::new(k);
                handles.push(Rc::clone(&job));
                q.push(job);
            }
            let mut i = 0usize;
            b.iter(|| {
                let job = &handles[i % handles.len()];
                job.cost.set(job.cost.get().wrapping_mul(31).wrapping_add(7));
                i += 1;
                q.adjust();
                black_box(q.top_resv().map(|j| j.cost.get()));
            });
        });
    }

    group.finish();
}

// ============================================================================
// SortedQueue bubbling
// ============================================================================

fn bench_sorted_queue_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_queue_push");

    for n in [64usize, 1024, 4096] {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("scrambled", n), &n, |b, &n| {
            let keys = keys(n);
            b.iter(|| {
                let mut q: SortedQueue<Rc<Job>, Cmp> = SortedQueue::new(ascending);
                for &k in &keys {
                    q.push(Job::new(black_box(k)));
                }
                black_box(q.len());
            });
        });

        // Nondecreasing keys land in place, one comparison each.
        group.bench_with_input(BenchmarkId::new("presorted", n), &n, |b, &n| {
            b.iter(|| {
                let mut q: SortedQueue<Rc<Job>, Cmp> = SortedQueue::new(ascending);
                for k in 0..n as i64 {
                    q.push(Job::new(black_box(k)));
                }
                black_box(q.len());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_heap_push_pop,
    bench_heap_remove,
    bench_multi_top_adjust,
    bench_sorted_queue_push
);
criterion_main!(benches);
