use autodrive_core::{
    CollisionRecord, Command, CommandScript, Grid, Heading, Position, VehicleId, VehicleSnapshot,
};

/// Vehicle driving across the field under the control of a command script.
#[derive(Clone, Debug)]
pub struct Vehicle {
    id: VehicleId,
    name: String,
    position: Position,
    heading: Heading,
    commands: CommandScript,
    collision: Option<CollisionRecord>,
}

impl Vehicle {
    pub(crate) fn new(id: VehicleId, name: String, position: Position, heading: Heading) -> Self {
        Self {
            id,
            name,
            position,
            heading,
            commands: CommandScript::default(),
            collision: None,
        }
    }

    /// Identifier assigned to the vehicle when it joined the world.
    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    /// Unique, case-sensitive name of the vehicle.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell currently occupied by the vehicle.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Heading the vehicle currently faces.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Commands assigned to the vehicle.
    #[must_use]
    pub fn commands(&self) -> &CommandScript {
        &self.commands
    }

    /// Collision the vehicle took part in, if any.
    #[must_use]
    pub fn collision(&self) -> Option<&CollisionRecord> {
        self.collision.as_ref()
    }

    /// Reports whether the vehicle is frozen after a collision.
    #[must_use]
    pub fn is_collided(&self) -> bool {
        self.collision.is_some()
    }

    pub(crate) fn assign_script(&mut self, commands: CommandScript) {
        self.commands = commands;
    }

    /// Executes a single command, returning whether it took effect.
    ///
    /// An advance that would leave the grid is dropped and leaves the vehicle
    /// untouched.
    pub(crate) fn apply_command(&mut self, command: Command, grid: &Grid) -> bool {
        debug_assert!(
            !self.is_collided(),
            "collided vehicles never receive commands"
        );

        match command {
            Command::TurnLeft => {
                self.heading = self.heading.rotate_left();
                true
            }
            Command::TurnRight => {
                self.heading = self.heading.rotate_right();
                true
            }
            Command::Advance => {
                let candidate = self.position.ahead(self.heading);
                if !grid.contains(candidate) {
                    return false;
                }
                self.position = candidate;
                true
            }
        }
    }

    pub(crate) fn mark_collision(&mut self, step: usize, peer: String) {
        assert!(
            self.collision.is_none(),
            "vehicle '{}' was marked as collided twice",
            self.name
        );
        self.collision = Some(CollisionRecord::new(step, peer));
    }

    pub(crate) fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            heading: self.heading,
            commands: self.commands.clone(),
            collision: self.collision.clone(),
        }
    }
}
