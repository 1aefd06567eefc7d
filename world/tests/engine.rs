use autodrive_core::{Event, Heading, Position, VehicleId};
use autodrive_world::{self as world, query, World};

fn field() -> World {
    World::new(10, 10).expect("valid field")
}

fn add(world: &mut World, name: &str, x: i32, y: i32, heading: Heading, commands: &str) {
    let _ = world
        .add_vehicle(name, Position::new(x, y), heading)
        .expect("vehicle placed");
    world.set_commands(name, commands).expect("valid commands");
}

fn run(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::run(world, &mut events);
    events
}

fn collision_of<'w>(world: &'w World, name: &str) -> Option<(usize, &'w str)> {
    query::vehicle(world, name)
        .and_then(|vehicle| vehicle.collision())
        .map(|record| (record.step(), record.peer()))
}

#[test]
fn single_vehicle_follows_its_script() {
    let mut world = field();
    add(&mut world, "A", 5, 5, Heading::North, "FFLFF");

    let _ = run(&mut world);

    let vehicle = query::vehicle(&world, "A").expect("vehicle present");
    assert_eq!(vehicle.position(), Position::new(3, 7));
    assert_eq!(vehicle.heading(), Heading::West);
    assert!(!vehicle.is_collided());
}

#[test]
fn advance_past_the_edge_keeps_vehicle_in_place() {
    let mut world = field();
    add(&mut world, "A", 5, 9, Heading::North, "F");

    let events = run(&mut world);

    let vehicle = query::vehicle(&world, "A").expect("vehicle present");
    assert_eq!(vehicle.position(), Position::new(5, 9));
    assert_eq!(vehicle.heading(), Heading::North);
    assert!(!vehicle.is_collided());
    assert_eq!(
        events,
        vec![
            Event::AdvanceBlocked {
                vehicle: VehicleId::new(0),
                position: Position::new(5, 9),
                heading: Heading::North,
            },
            Event::StepCompleted { step: 1 },
        ]
    );
}

#[test]
fn head_on_vehicles_collide_on_shared_cell() {
    let mut world = field();
    add(&mut world, "Car1", 5, 5, Heading::North, "FF");
    add(&mut world, "Car2", 5, 9, Heading::South, "FF");

    let events = run(&mut world);

    for (name, peer) in [("Car1", "Car2"), ("Car2", "Car1")] {
        let vehicle = query::vehicle(&world, name).expect("vehicle present");
        let record = vehicle.collision().expect("collision recorded");
        assert_eq!(vehicle.position(), Position::new(5, 7));
        assert_eq!(record.step(), 2);
        assert_eq!(record.peer(), peer);
    }
    assert!(events.contains(&Event::CollisionDetected {
        step: 2,
        vehicle: VehicleId::new(1),
        other: VehicleId::new(0),
        position: Position::new(5, 7),
    }));
}

#[test]
fn collided_vehicles_stop_executing_commands() {
    let mut world = field();
    add(&mut world, "A", 1, 2, Heading::North, "FFRFFFFRRL");
    add(&mut world, "B", 7, 8, Heading::West, "FFLFFFFFFF");

    let _ = run(&mut world);

    for (name, peer) in [("A", "B"), ("B", "A")] {
        let vehicle = query::vehicle(&world, name).expect("vehicle present");
        let record = vehicle.collision().expect("collision recorded");
        assert_eq!(vehicle.position(), Position::new(5, 4));
        assert_eq!(record.step(), 7);
        assert_eq!(record.peer(), peer);
    }
    let a = query::vehicle(&world, "A").expect("vehicle present");
    assert_eq!(a.heading(), Heading::East);
}

#[test]
fn crossing_paths_without_sharing_a_final_cell_is_not_a_collision() {
    let mut world = field();
    add(&mut world, "A", 4, 5, Heading::East, "F");
    add(&mut world, "B", 5, 5, Heading::West, "F");

    let _ = run(&mut world);

    let a = query::vehicle(&world, "A").expect("vehicle present");
    let b = query::vehicle(&world, "B").expect("vehicle present");
    assert_eq!(a.position(), Position::new(5, 5));
    assert_eq!(b.position(), Position::new(4, 5));
    assert!(!a.is_collided());
    assert!(!b.is_collided());
}

#[test]
fn third_arrival_is_frozen_against_first_claimant() {
    let mut world = field();
    add(&mut world, "A", 4, 5, Heading::East, "F");
    add(&mut world, "B", 6, 5, Heading::West, "F");
    add(&mut world, "C", 5, 4, Heading::North, "F");

    let events = run(&mut world);

    let record = |name: &str| {
        query::vehicle(&world, name)
            .and_then(|vehicle| vehicle.collision().cloned())
            .expect("collision recorded")
    };
    assert_eq!(record("A").peer(), "B");
    assert_eq!(record("B").peer(), "A");
    assert_eq!(record("C").peer(), "A");
    assert_eq!(record("C").step(), 1);

    let collisions = events
        .iter()
        .filter(|event| matches!(event, Event::CollisionDetected { .. }))
        .count();
    assert_eq!(collisions, 2);
}

#[test]
fn frozen_vehicle_does_not_block_later_arrivals() {
    let mut world = field();
    add(&mut world, "A", 5, 5, Heading::North, "F");
    add(&mut world, "B", 5, 7, Heading::South, "F");
    add(&mut world, "C", 3, 6, Heading::East, "RLFF");

    let _ = run(&mut world);

    let c = query::vehicle(&world, "C").expect("vehicle present");
    assert_eq!(c.position(), Position::new(5, 6));
    assert!(!c.is_collided());
    let a = query::vehicle(&world, "A").expect("vehicle present");
    assert_eq!(a.collision().map(|record| record.step()), Some(1));
}

#[test]
fn parked_vehicle_can_be_driven_through() {
    let mut world = field();
    add(&mut world, "Parked", 5, 6, Heading::North, "");
    add(&mut world, "Mover", 5, 5, Heading::North, "F");

    let _ = run(&mut world);

    let parked = query::vehicle(&world, "Parked").expect("vehicle present");
    let mover = query::vehicle(&world, "Mover").expect("vehicle present");
    assert_eq!(mover.position(), Position::new(5, 6));
    assert!(!parked.is_collided());
    assert!(!mover.is_collided());
}

#[test]
fn vehicle_with_finished_script_is_not_an_obstacle() {
    let mut world = field();
    add(&mut world, "Short", 0, 0, Heading::East, "F");
    add(&mut world, "Long", 3, 1, Heading::West, "LFRFF");

    let _ = run(&mut world);

    let short = query::vehicle(&world, "Short").expect("vehicle present");
    let long = query::vehicle(&world, "Long").expect("vehicle present");
    assert_eq!(short.position(), Position::new(1, 0));
    assert_eq!(long.position(), Position::new(1, 0));
    assert!(!short.is_collided());
    assert!(!long.is_collided());
}

#[test]
fn blocked_vehicle_still_claims_its_cell() {
    let mut world = field();
    add(&mut world, "Wall", 9, 5, Heading::East, "F");
    add(&mut world, "Arrival", 8, 5, Heading::East, "F");

    let _ = run(&mut world);

    let arrival = query::vehicle(&world, "Arrival").expect("vehicle present");
    assert_eq!(collision_of(&world, "Wall"), Some((1, "Arrival")));
    assert_eq!(collision_of(&world, "Arrival"), Some((1, "Wall")));
    assert_eq!(arrival.position(), Position::new(9, 5));
}

#[test]
fn turning_vehicle_still_claims_its_cell() {
    let mut world = field();
    add(&mut world, "Turner", 5, 5, Heading::North, "L");
    add(&mut world, "Arrival", 4, 5, Heading::East, "F");

    let _ = run(&mut world);

    let turner = query::vehicle(&world, "Turner").expect("vehicle present");
    let arrival = query::vehicle(&world, "Arrival").expect("vehicle present");
    assert_eq!(collision_of(&world, "Turner"), Some((1, "Arrival")));
    assert_eq!(collision_of(&world, "Arrival"), Some((1, "Turner")));
    assert_eq!(turner.position(), Position::new(5, 5));
    assert_eq!(turner.heading(), Heading::West);
    assert_eq!(arrival.position(), Position::new(5, 5));
}

#[test]
fn vehicles_sharing_a_start_cell_collide_on_first_step() {
    let mut world = field();
    add(&mut world, "S1", 0, 0, Heading::North, "R");
    add(&mut world, "S2", 0, 0, Heading::North, "L");

    let _ = run(&mut world);

    assert_eq!(collision_of(&world, "S1"), Some((1, "S2")));
    assert_eq!(collision_of(&world, "S2"), Some((1, "S1")));
    let s1 = query::vehicle(&world, "S1").expect("vehicle present");
    assert_eq!(s1.position(), Position::new(0, 0));
}

#[test]
fn empty_scripts_never_move_or_collide() {
    let mut world = field();
    add(&mut world, "Idle", 2, 2, Heading::South, "");

    let events = run(&mut world);

    let idle = query::vehicle(&world, "Idle").expect("vehicle present");
    assert!(events.is_empty());
    assert_eq!(idle.position(), Position::new(2, 2));
    assert_eq!(idle.heading(), Heading::South);
    assert!(!idle.is_collided());
}

#[test]
fn run_without_vehicles_completes_quietly() {
    let mut world = field();

    let events = run(&mut world);

    assert!(events.is_empty());
    assert!(query::vehicle_view(&world).is_empty());
    assert!(query::has_run(&world));
}

#[test]
fn step_events_follow_longest_script() {
    let mut world = field();
    add(&mut world, "A", 0, 0, Heading::North, "LRL");
    add(&mut world, "B", 9, 9, Heading::South, "F");

    let events = run(&mut world);

    let steps: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::StepCompleted { step } => Some(*step),
            _ => None,
        })
        .collect();
    assert_eq!(steps, [1, 2, 3]);
    assert_eq!(query::step_count(&world), 3);
}
