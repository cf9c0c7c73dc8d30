use std::error::Error;

use signet::prelude::*;

#[derive(Component, Debug)]
struct Foo {
    a: f32,
}

#[derive(Component, Debug)]
struct Bar {
    a: i32,
}

/// Prints every entity holding both a `Foo` and a `Bar`.
#[derive(Default)]
struct Report;

impl System for Report {
    fn update(&mut self, world: &mut World, entities: &[Entity]) {
        for &entity in entities {
            if let (Ok(foo), Ok(bar)) =
                (world.get_component::<Foo>(entity), world.get_component::<Bar>(entity))
            {
                println!("{entity}: foo = {}, bar = {}", foo.a, bar.a);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut world = World::new();

    world.register_component::<Foo>()?;
    world.register_component::<Bar>()?;
    world.register_system_with::<Report, (Foo, Bar)>()?;

    let mut entities = Vec::new();

    for i in 1..=100 {
        let entity = world.new_entity()?;

        world.add_component(entity, Foo { a: i as f32 })?;
        world.add_component(entity, Bar { a: i % 10 })?;
        entities.push((i, entity));
    }

    for (i, entity) in entities {
        if i % 3 == 0 {
            world.remove_component::<Foo>(entity)?;
        }
    }

    println!("{} entities match", world.members::<Report>()?.len());

    world.run_system::<Report>()?;

    Ok(())
}
