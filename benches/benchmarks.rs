//! Cuckoo哈希映射性能基准测试

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
    PlotConfiguration, Throughput,
};

use cuckoo_map::{types::ByteKey, CuckooMap, RandomMultipliers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// 基准测试配置
const SEED: u64 = 42;
const ITEM_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];
const KEY_SIZE: usize = 16; // 128位键
const VALUE_SIZE: usize = 8;

/// 生成随机键值对
fn generate_items(count: usize) -> Vec<(ByteKey, Vec<u8>)> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count)
        .map(|_| {
            let mut key = vec![0u8; KEY_SIZE];
            let mut value = vec![0u8; VALUE_SIZE];
            rng.fill(&mut key[..]);
            rng.fill(&mut value[..]);
            (ByteKey(key), value)
        })
        .collect()
}

fn new_map(initial_capacity: usize) -> CuckooMap<ByteKey, Vec<u8>> {
    CuckooMap::with_source(initial_capacity, RandomMultipliers::seeded(SEED))
}

fn filled_map(items: &[(ByteKey, Vec<u8>)]) -> CuckooMap<ByteKey, Vec<u8>> {
    let mut map = new_map(16);
    for (key, value) in items {
        map.insert(key.clone(), value.clone()).unwrap();
    }
    map
}

/// 插入操作基准测试，从小容量开始以覆盖重哈希开销
fn bench_insert(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Insert");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let items = generate_items(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter_batched(
                || new_map(16),
                |mut map| {
                    for (key, value) in items {
                        map.insert(key.clone(), value.clone()).unwrap();
                    }
                    map
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

/// 查询操作基准测试
fn bench_get(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Get");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let items = generate_items(count);
        let keys: Vec<ByteKey> = items.iter().map(|(k, _)| k.clone()).collect();
        let map = filled_map(&items);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    black_box(map.get(key));
                }
            });
        });
    }
    group.finish();
}

/// 删除操作基准测试
fn bench_remove(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic);
    let mut group = c.benchmark_group("Remove");
    group.plot_config(plot_config);

    for &count in ITEM_COUNTS.iter() {
        let items = generate_items(count);
        let keys: Vec<ByteKey> = items.iter().map(|(k, _)| k.clone()).collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter_batched(
                || filled_map(&items),
                |mut map| {
                    for key in keys {
                        black_box(map.remove(key));
                    }
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

/// 预分配与逐步扩容的对比
fn bench_presized(c: &mut Criterion) {
    let mut group = c.benchmark_group("Presized Insert");
    let count = 10_000;
    let items = generate_items(count);

    for &initial_capacity in [16, count].iter() {
        group.bench_with_input(
            BenchmarkId::new("initial_capacity", initial_capacity),
            &items,
            |b, items| {
                b.iter_batched(
                    || new_map(initial_capacity),
                    |mut map| {
                        map.insert_all(items.iter().cloned()).unwrap();
                        map
                    },
                    BatchSize::PerIteration,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05);
    targets =
        bench_insert,
        bench_get,
        bench_remove,
        bench_presized
);
criterion_main!(benches);
