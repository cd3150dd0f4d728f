use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use loadout_core::ItemId;
use loadout_inventory::{InventorySnapshot, InventoryStore, NewItem};

fn filled_store(count: usize) -> (InventoryStore, Vec<ItemId>) {
    let mut store = InventoryStore::new();
    let ids = (0..count)
        .filter_map(|i| store.create(NewItem::named(format!("item-{i}"))).ok())
        .collect();
    (store, ids)
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder_within_storage");
    for count in [10usize, 100, 1_000] {
        let (store, ids) = filled_store(count);
        let first = ids[0].clone();
        let last = ids[count - 1].to_string();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter_batched(
                || store.clone(),
                |mut store| black_box(store.resolve_move(&first, &last)),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_equip_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("equip_with_displacement");
    for count in [10usize, 100, 1_000] {
        let (mut store, ids) = filled_store(count);
        store.resolve_move(&ids[0], "mainHand");
        let middle = ids[count / 2].clone();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter_batched(
                || store.clone(),
                |mut store| black_box(store.resolve_move(&middle, "mainHand")),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_snapshot_load(c: &mut Criterion) {
    let (store, _) = filled_store(1_000);
    let json = store.to_snapshot().to_json_pretty().unwrap_or_default();
    c.bench_function("snapshot_load_1000", |b| {
        b.iter(|| black_box(InventoryStore::from_snapshot(InventorySnapshot::from_json(&json))))
    });
}

criterion_group!(benches, bench_reorder, bench_equip_swap, bench_snapshot_load);
criterion_main!(benches);
