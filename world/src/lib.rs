#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for autodrive.
//!
//! The [`World`] owns the field and every vehicle. Adapters populate it while
//! it is being set up, call [`run`] once to execute all command scripts in
//! lock-step, and then inspect the frozen outcome through [`query`].

use std::collections::{hash_map::Entry, HashMap};

use autodrive_core::{
    Command, CommandScript, Event, Grid, Heading, Position, SimulationError, VehicleId,
};

mod vehicle;

pub use vehicle::Vehicle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Setup,
    Finished,
}

/// Represents the authoritative simulation state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    vehicles: Vec<Vehicle>,
    phase: Phase,
}

impl World {
    /// Creates an empty world over a field of the provided dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, SimulationError> {
        Ok(Self::with_grid(Grid::new(width, height)?))
    }

    /// Creates an empty world over an already validated field.
    #[must_use]
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            vehicles: Vec::new(),
            phase: Phase::Setup,
        }
    }

    /// Places a new vehicle on the field with an empty command script.
    ///
    /// Names are unique and case-sensitive, and the starting cell must lie
    /// within the field.
    pub fn add_vehicle(
        &mut self,
        name: impl Into<String>,
        position: Position,
        heading: Heading,
    ) -> Result<&Vehicle, SimulationError> {
        self.ensure_setup()?;

        let name = name.into();
        if self.vehicle_index(&name).is_some() {
            return Err(SimulationError::DuplicateName { name });
        }
        if !self.grid.contains(position) {
            return Err(SimulationError::OutOfBounds {
                position,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }

        let index = self.vehicles.len();
        let id = u32::try_from(index)
            .map(VehicleId::new)
            .map_err(|_| SimulationError::TooManyVehicles)?;
        let vehicle = Vehicle::new(id, name, position, heading);
        self.vehicles.push(vehicle);
        Ok(&self.vehicles[index])
    }

    /// Parses `codes` and assigns the resulting script to the named vehicle.
    pub fn set_commands(&mut self, name: &str, codes: &str) -> Result<(), SimulationError> {
        let script = CommandScript::parse(codes)?;
        self.assign_script(name, script)
    }

    /// Replaces the command script of the named vehicle.
    pub fn assign_script(
        &mut self,
        name: &str,
        script: CommandScript,
    ) -> Result<(), SimulationError> {
        self.ensure_setup()?;

        let index = self
            .vehicle_index(name)
            .ok_or_else(|| SimulationError::UnknownVehicle {
                name: name.to_owned(),
            })?;
        self.vehicles[index].assign_script(script);
        Ok(())
    }

    fn ensure_setup(&self) -> Result<(), SimulationError> {
        match self.phase {
            Phase::Setup => Ok(()),
            Phase::Finished => Err(SimulationError::SimulationFinished),
        }
    }

    fn vehicle_index(&self, name: &str) -> Option<usize> {
        self.vehicles
            .iter()
            .position(|vehicle| vehicle.name() == name)
    }

    fn step_count(&self) -> usize {
        self.vehicles
            .iter()
            .map(|vehicle| vehicle.commands().len())
            .max()
            .unwrap_or(0)
    }
}

/// Executes every command script to completion, mutating the world in place.
///
/// Vehicles act in lock-step: during step `s` each vehicle that is still
/// intact and has a command at index `s` executes it, in insertion order. A
/// vehicle that ends the step on a cell already claimed during the same step
/// is frozen together with the claimant. Only vehicles that acted during the
/// step claim cells, so frozen and idle vehicles can be driven through.
///
/// The world runs at most once; later calls leave it untouched.
pub fn run(world: &mut World, out_events: &mut Vec<Event>) {
    if world.phase == Phase::Finished {
        return;
    }
    world.phase = Phase::Finished;

    let grid = world.grid;
    let mut occupancy = OccupancyFrame::default();

    for step in 0..world.step_count() {
        occupancy.clear();

        for index in 0..world.vehicles.len() {
            let vehicle = &mut world.vehicles[index];
            if vehicle.is_collided() {
                continue;
            }
            let Some(command) = vehicle.commands().get(step) else {
                continue;
            };

            execute(vehicle, command, &grid, out_events);

            let position = vehicle.position();
            if let Some(occupant) = occupancy.claim(position, index) {
                resolve_collision(
                    &mut world.vehicles,
                    step + 1,
                    index,
                    occupant,
                    position,
                    out_events,
                );
            }
        }

        out_events.push(Event::StepCompleted { step: step + 1 });
    }
}

fn execute(vehicle: &mut Vehicle, command: Command, grid: &Grid, out_events: &mut Vec<Event>) {
    let from = vehicle.position();
    let moved = vehicle.apply_command(command, grid);

    let event = match command {
        Command::TurnLeft | Command::TurnRight => Event::VehicleTurned {
            vehicle: vehicle.id(),
            heading: vehicle.heading(),
        },
        Command::Advance if moved => Event::VehicleAdvanced {
            vehicle: vehicle.id(),
            from,
            to: vehicle.position(),
        },
        Command::Advance => Event::AdvanceBlocked {
            vehicle: vehicle.id(),
            position: from,
            heading: vehicle.heading(),
        },
    };
    out_events.push(event);
}

/// Freezes `arriving` against `occupant`.
///
/// The occupant may already be frozen when three or more vehicles meet on the
/// same cell; it keeps its first record in that case.
fn resolve_collision(
    vehicles: &mut [Vehicle],
    step: usize,
    arriving: usize,
    occupant: usize,
    position: Position,
    out_events: &mut Vec<Event>,
) {
    let arriving_name = vehicles[arriving].name().to_owned();
    let occupant_name = vehicles[occupant].name().to_owned();

    vehicles[arriving].mark_collision(step, occupant_name);
    if !vehicles[occupant].is_collided() {
        vehicles[occupant].mark_collision(step, arriving_name);
    }

    out_events.push(Event::CollisionDetected {
        step,
        vehicle: vehicles[arriving].id(),
        other: vehicles[occupant].id(),
        position,
    });
}

/// Cells claimed by the vehicles that acted during the current step.
#[derive(Debug, Default)]
struct OccupancyFrame {
    cells: HashMap<Position, usize>,
}

impl OccupancyFrame {
    fn clear(&mut self) {
        self.cells.clear();
    }

    /// Claims `position` for `index`, returning the earlier claimant if any.
    fn claim(&mut self, position: Position, index: usize) -> Option<usize> {
        match self.cells.entry(position) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                let _ = entry.insert(index);
                None
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use autodrive_core::{Grid, VehicleView};

    use super::{Phase, Vehicle, World};

    /// Provides the field the world was created with.
    #[must_use]
    pub fn grid(world: &World) -> Grid {
        world.grid
    }

    /// Vehicles in insertion order.
    #[must_use]
    pub fn vehicles(world: &World) -> &[Vehicle] {
        &world.vehicles
    }

    /// Looks up a vehicle by its exact name.
    #[must_use]
    pub fn vehicle<'world>(world: &'world World, name: &str) -> Option<&'world Vehicle> {
        world.vehicles.iter().find(|vehicle| vehicle.name() == name)
    }

    /// Captures a read-only view of every vehicle.
    #[must_use]
    pub fn vehicle_view(world: &World) -> VehicleView {
        VehicleView::from_snapshots(world.vehicles.iter().map(Vehicle::snapshot).collect())
    }

    /// Number of lock-step rounds a run executes: the longest script length.
    #[must_use]
    pub fn step_count(world: &World) -> usize {
        world.step_count()
    }

    /// Reports whether the world already ran its scripts.
    #[must_use]
    pub fn has_run(world: &World) -> bool {
        world.phase == Phase::Finished
    }
}
