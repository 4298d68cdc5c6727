use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use llmap::{LongLongMap, RawMemory, SliceMemory};
use rand::{rngs::StdRng, Rng, SeedableRng};

const CAPACITY: u64 = 1 << 20;

fn filled_map(load_factor: f64) -> (LongLongMap<SliceMemory<Vec<u8>>>, Vec<i64>) {
    let size = CAPACITY * llmap::SLOT_SIZE;
    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; size as usize]), 0, size).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let count = (CAPACITY as f64 * load_factor) as usize;

    let keys = (0..count)
        .map(|_| rng.random_range(1..i64::MAX))
        .collect::<Vec<_>>();

    for &key in &keys {
        map.put(key, key).unwrap();
    }

    (map, keys)
}

fn map_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("map get hit");

    for load_factor in [0.25, 0.5, 0.75, 0.9] {
        let (map, keys) = filled_map(load_factor);
        let mut rng = StdRng::seed_from_u64(2);

        group.bench_with_input(
            BenchmarkId::from_parameter(load_factor),
            &load_factor,
            |b, _| {
                b.iter(|| {
                    let key = keys[rng.random_range(0..keys.len())];
                    assert_eq!(key, map.get(key));
                });
            },
        );
    }
}

fn map_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("map get miss");

    for load_factor in [0.25, 0.5, 0.75, 0.9] {
        let (map, _) = filled_map(load_factor);
        let mut rng = StdRng::seed_from_u64(3);

        group.bench_with_input(
            BenchmarkId::from_parameter(load_factor),
            &load_factor,
            |b, _| {
                b.iter(|| {
                    // Negative keys are never inserted
                    let key = rng.random_range(i64::MIN..0);
                    assert_eq!(0, map.get(key));
                });
            },
        );
    }
}

fn map_put_update(c: &mut Criterion) {
    let (mut map, keys) = filled_map(0.5);
    let mut rng = StdRng::seed_from_u64(4);

    c.bench_function("map put update", |b| {
        b.iter(|| {
            let key = keys[rng.random_range(0..keys.len())];
            map.put(key, key).unwrap();
        });
    });
}

fn map_put_raw_memory(c: &mut Criterion) {
    let mut region = vec![0u64; (CAPACITY * 2) as usize];
    let base = region.as_mut_ptr().expose_provenance() as u64;
    let size = CAPACITY * llmap::SLOT_SIZE;

    // SAFETY: `region` outlives the map and is not touched while it is in use
    let memory = unsafe { RawMemory::new() };

    let mut map = LongLongMap::new(memory, base, size).unwrap();
    let mut key = 1;

    c.bench_function("map put raw memory", |b| {
        b.iter(|| {
            // Stay well below capacity, keys repeat after that
            key = key % (CAPACITY as i64 / 2) + 1;
            map.put(key, key).unwrap();
        });
    });

    drop(map);
    drop(region);
}

fn map_open(c: &mut Criterion) {
    let size = CAPACITY * llmap::SLOT_SIZE;
    let mut memory = SliceMemory::new(vec![0u8; size as usize]);

    c.bench_function("map open (16 MiB)", |b| {
        b.iter(|| LongLongMap::new(&mut memory, 0, size).unwrap().capacity());
    });
}

criterion_group!(
    benches,
    map_get_hit,
    map_get_miss,
    map_put_update,
    map_put_raw_memory,
    map_open,
);
criterion_main!(benches);
