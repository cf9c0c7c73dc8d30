use std::time::Duration;

use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use signet::prelude::*;

#[derive(Component)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component)]
struct Velocity {
    x: f32,
    y: f32,
}

#[derive(Default)]
struct Movement;

impl System for Movement {
    fn update(&mut self, world: &mut World, entities: &[Entity]) {
        for &entity in entities {
            let Ok(&Velocity { x, y }) = world.get_component::<Velocity>(entity) else {
                continue;
            };

            if let Ok(position) = world.get_component_mut::<Position>(entity) {
                position.x += x;
                position.y += y;
            }
        }
    }
}

const COUNT: usize = 10_000;

fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    group
        .bench_function("run_system", run_system)
        .bench_function("packed_store", packed_store);
}

fn world() -> World {
    let mut world = World::new();

    world.register_system_with::<Movement, (Position, Velocity)>().unwrap();

    for _ in 0..COUNT {
        let entity = world.new_entity().unwrap();

        world.add_component(entity, Position { x: 1.0, y: -1.0 }).unwrap();
        world.add_component(entity, Velocity { x: 1.0, y: -1.0 }).unwrap();
    }

    world
}

fn run_system(bencher: &mut Bencher<'_>) {
    let mut world = world();

    bencher.iter(|| world.run_system::<Movement>().unwrap());
}

fn packed_store(bencher: &mut Bencher<'_>) {
    let mut world = world();

    bencher.iter(|| {
        for position in world.store_mut::<Position>().unwrap().values_mut() {
            position.x += 1.0;
            position.y -= 1.0;
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
