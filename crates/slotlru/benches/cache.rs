use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use slotlru::{LruCache, SharedLruCache};

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for capacity in [100usize, 10_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut cache = LruCache::new(capacity).unwrap();
            for key in 0..capacity as u64 {
                cache.put(key, vec![b'x'; 64]);
            }

            let mut counter = 0u64;
            b.iter(|| {
                black_box(cache.get(&(counter % capacity as u64)).is_some());
                counter += 1;
            });
        });
    }

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for key in 0..100u64 {
            cache.put(key, key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter.is_multiple_of(2) {
                black_box(cache.get(&(counter % 100)));
            } else {
                cache.put(counter % 2000, counter);
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_always_evicts", |b| {
        let mut cache = LruCache::new(10).unwrap(); // Small cache

        let mut counter = 0u64;
        b.iter(|| {
            // Every key is new, so every put past warmup evicts
            cache.put(black_box(counter), counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_shared_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("uncontended", |b| {
        let cache = SharedLruCache::new(1000).unwrap();
        for key in 0..100u64 {
            cache.put(key, key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_eviction_churn,
    bench_shared_get
);
criterion_main!(benches);
