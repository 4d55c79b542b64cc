mod common;

use cachefront::builder::{PolicyKind, StoreBuilder};
use cachefront::store::{CacheAddressedStore, MemoryStore};
use common::{Workload, keys};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const UNIVERSE: u64 = 8192;
const OPS: usize = 4096;

type Store = CacheAddressedStore<u64, u64, MemoryStore<u64, u64>>;

fn populated(capacity: usize, kinds: &[PolicyKind]) -> Store {
    let mut builder = StoreBuilder::new(capacity);
    for &kind in kinds {
        builder = builder.policy(kind);
    }
    let mut store = builder.build(MemoryStore::new("root"));
    for key in 0..UNIVERSE {
        // cache capacity is far below the universe, so most entries end up cold
        let _ = store.create(key, key);
    }
    store
}

fn bench_read_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_read");
    group.throughput(Throughput::Elements(OPS as u64));

    let stream = keys(
        Workload::Hotset {
            hot_fraction: 0.05,
            hot_prob: 0.9,
        },
        UNIVERSE,
        OPS,
        7,
    );
    let compositions: [(&str, &[PolicyKind]); 3] = [
        ("recency", &[PolicyKind::Recency]),
        ("frequency", &[PolicyKind::Frequency]),
        ("recency+frequency", &[PolicyKind::Recency, PolicyKind::Frequency]),
    ];

    for (label, kinds) in compositions {
        group.bench_with_input(BenchmarkId::new("hotset", label), &stream, |b, stream| {
            b.iter_batched(
                || populated(512, kinds),
                |mut store| {
                    for key in stream {
                        let _ = std::hint::black_box(store.read(key));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_write_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_write");
    group.throughput(Throughput::Elements(OPS as u64));
    let stream = keys(Workload::Uniform, UNIVERSE, OPS, 11);

    group.bench_function("default_pair", |b| {
        b.iter_batched(
            || populated(512, &[]),
            |mut store| {
                for &key in &stream {
                    let _ = std::hint::black_box(store.write(&key, key + 1));
                }
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_create_delete_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_churn");
    group.throughput(Throughput::Elements(2 * 1024));
    group.bench_function("create_delete", |b| {
        b.iter_batched(
            || CacheAddressedStore::new(MemoryStore::new("root"), 256),
            |mut store: Store| {
                for key in 0..1024u64 {
                    let _ = store.create(key, key);
                }
                for key in 0..1024u64 {
                    let _ = std::hint::black_box(store.delete(&key));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_read_mix,
    bench_write_through,
    bench_create_delete_churn
);
criterion_main!(benches);
