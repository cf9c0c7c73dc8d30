use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use signet::prelude::*;

#[derive(Component)]
struct A(#[expect(unused)] u32);

#[derive(Component)]
struct B(#[expect(unused)] u64);

#[derive(System, Default)]
struct Both;

const COUNT: usize = 10_000;

fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove");

    group
        .bench_function("no_systems", |bencher| add_remove(bencher, 0))
        .bench_function("one_system", |bencher| add_remove(bencher, 1));
}

fn add_remove(bencher: &mut Bencher<'_>, systems: usize) {
    let mut world = World::new();

    world.register_component::<A>().unwrap();
    world.register_component::<B>().unwrap();

    if systems > 0 {
        world.register_system_with::<Both, (A, B)>().unwrap();
    }

    let entities: Vec<_> = (0..COUNT)
        .map(|_| {
            let entity = world.new_entity().unwrap();

            world.add_component(entity, B(321)).unwrap();

            entity
        })
        .collect();

    bencher.iter(|| {
        for &entity in &entities {
            world.add_component(entity, black_box(A(123))).unwrap();
        }

        // front to back, so every removal moves the last value
        for &entity in &entities {
            black_box(world.remove_component::<A>(entity).unwrap());
        }
    });
}

criterion_group!(
    name = this;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(4));
    targets = benchmark,
);
criterion_main!(this);
