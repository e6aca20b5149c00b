use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_multiset::RbTree;
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
    limit: u32,
}
impl KeyGenerator {
    fn new() -> Self {
        const LIMIT: u32 = 1_000_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> u32 {
        self.rng.gen_range(0..self.limit)
    }
}

// insert helper fn
fn tree_insert(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut tree = RbTree::new();
        for &key in &keys {
            black_box(tree.insert(key));
        }
    });
}

// insert and remove helper fn
fn tree_insert_remove(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut tree = RbTree::new();
        for &key in &keys {
            black_box(tree.insert(key));
        }
        for key in &keys {
            black_box(tree.remove(key));
        }
    });
}

// search helper fn
fn tree_search(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut tree = RbTree::new();
    for &key in &keys {
        tree.insert(key);
    }
    bench.iter(|| {
        for key in &keys {
            black_box(tree.contains(key));
        }
    });
}

// in-order traversal helper fn
fn tree_in_order(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut tree = RbTree::new();
    for &key in &keys {
        tree.insert(key);
    }
    bench.iter(|| {
        black_box(tree.in_order());
    });
}

fn bench_tree_insert(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_100", |b| tree_insert(100, b));
    c.bench_function("bench_tree_insert_1000", |b| tree_insert(1000, b));
    c.bench_function("bench_tree_insert_10,000", |b| tree_insert(10_000, b));
    c.bench_function("bench_tree_insert_100,000", |b| tree_insert(100_000, b));
}

fn bench_tree_insert_remove(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_remove_100", |b| {
        tree_insert_remove(100, b)
    });
    c.bench_function("bench_tree_insert_remove_1000", |b| {
        tree_insert_remove(1000, b)
    });
    c.bench_function("bench_tree_insert_remove_10,000", |b| {
        tree_insert_remove(10_000, b)
    });
    c.bench_function("bench_tree_insert_remove_100,000", |b| {
        tree_insert_remove(100_000, b)
    });
}

fn bench_tree_search(c: &mut Criterion) {
    c.bench_function("bench_tree_search_1000", |b| tree_search(1000, b));
    c.bench_function("bench_tree_search_10,000", |b| tree_search(10_000, b));
}

fn bench_tree_in_order(c: &mut Criterion) {
    c.bench_function("bench_tree_in_order_1000", |b| tree_in_order(1000, b));
    c.bench_function("bench_tree_in_order_10,000", |b| tree_in_order(10_000, b));
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_tree_insert, bench_tree_insert_remove,
}

criterion_group! {
    name = benches_query;
    config = criterion_config();
    targets = bench_tree_search, bench_tree_in_order
}

criterion_main!(benches_basic_op, benches_query);
