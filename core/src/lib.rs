#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the autodrive simulation.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and pure systems. Adapters validate raw input into [`Grid`],
//! [`Position`], [`Heading`] and [`CommandScript`] values, the world executes
//! the scripts step by step and reports what happened as [`Event`] values, and
//! systems render immutable [`VehicleView`] snapshots without touching state.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Auto Driving Car Simulation!";

/// Location of a single grid cell expressed as x and y coordinates.
///
/// The origin sits in the lower-left corner: x grows toward the east and y
/// grows toward the north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position shifted by the provided displacement.
    #[must_use]
    pub const fn offset(self, displacement: (i32, i32)) -> Self {
        Self::new(
            self.x.saturating_add(displacement.0),
            self.y.saturating_add(displacement.1),
        )
    }

    /// Returns the neighbouring cell one step away in the provided heading.
    #[must_use]
    pub const fn ahead(self, heading: Heading) -> Self {
        self.offset(heading.displacement())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal orientations a vehicle may face.
///
/// Variants are declared in clockwise order; rotation and displacement are
/// looked up by ordinal in fixed tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward increasing y.
    North,
    /// Facing toward increasing x.
    East,
    /// Facing toward decreasing y.
    South,
    /// Facing toward decreasing x.
    West,
}

const HEADINGS: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];
const HEADING_CODES: [char; 4] = ['N', 'E', 'S', 'W'];
const DISPLACEMENTS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl Heading {
    /// Every heading in clockwise order starting at north.
    pub const ALL: [Heading; 4] = HEADINGS;

    const fn ordinal(self) -> usize {
        self as usize
    }

    /// Heading obtained by turning 90 degrees counter-clockwise.
    #[must_use]
    pub const fn rotate_left(self) -> Self {
        HEADINGS[(self.ordinal() + 3) % 4]
    }

    /// Heading obtained by turning 90 degrees clockwise.
    #[must_use]
    pub const fn rotate_right(self) -> Self {
        HEADINGS[(self.ordinal() + 1) % 4]
    }

    /// Unit displacement `(dx, dy)` covered by a single advance.
    #[must_use]
    pub const fn displacement(self) -> (i32, i32) {
        DISPLACEMENTS[self.ordinal()]
    }

    /// Single-character code used in adapter input and rendered output.
    #[must_use]
    pub const fn code(self) -> char {
        HEADING_CODES[self.ordinal()]
    }

    /// Resolves a heading from its single-character code.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        HEADINGS.into_iter().find(|heading| heading.code() == code)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Heading {
    type Err = SimulationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut chars = value.chars();
        let heading = match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => None,
        };
        heading.ok_or_else(|| SimulationError::InvalidHeadingCode {
            code: value.to_owned(),
        })
    }
}

/// Instructions a vehicle executes one per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Rotate 90 degrees counter-clockwise in place.
    TurnLeft,
    /// Rotate 90 degrees clockwise in place.
    TurnRight,
    /// Move one cell in the current heading if the field allows it.
    Advance,
}

impl Command {
    /// Single-character code used to spell the command in a script.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::TurnLeft => 'L',
            Self::TurnRight => 'R',
            Self::Advance => 'F',
        }
    }

    /// Resolves a command from its single-character code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Self::TurnLeft),
            'R' => Some(Self::TurnRight),
            'F' => Some(Self::Advance),
            _ => None,
        }
    }
}

/// Validated, ordered sequence of commands assigned to a vehicle.
///
/// A script can only be built from valid commands, so the engine never has to
/// decode raw characters while stepping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandScript {
    commands: Vec<Command>,
}

impl CommandScript {
    /// Wraps an already-decoded command sequence.
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Parses a script spelled with the codes `L`, `R` and `F`.
    ///
    /// Codes are case-sensitive. The first unknown character is reported
    /// together with its zero-based index.
    pub fn parse(codes: &str) -> Result<Self, SimulationError> {
        codes
            .chars()
            .enumerate()
            .map(|(index, code)| {
                Command::from_code(code).ok_or(SimulationError::InvalidCommandCode { code, index })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Number of commands contained in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Reports whether the script contains no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command scheduled for the provided zero-based step, if any.
    #[must_use]
    pub fn get(&self, step: usize) -> Option<Command> {
        self.commands.get(step).copied()
    }

    /// Commands in execution order.
    #[must_use]
    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }
}

impl FromStr for CommandScript {
    type Err = SimulationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for CommandScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.commands
            .iter()
            .try_for_each(|command| write!(f, "{}", command.code()))
    }
}

/// Immutable rectangular field that bounds every vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Creates a field with the provided dimensions.
    ///
    /// Both dimensions must be strictly positive.
    pub fn new(width: i32, height: i32) -> Result<Self, SimulationError> {
        if width <= 0 || height <= 0 {
            return Err(SimulationError::InvalidDimensions { width, height });
        }

        Ok(Self { width, height })
    }

    /// Number of columns in the field.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows in the field.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the position lies within `0..width` by `0..height`.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() >= 0
            && position.x() < self.width
            && position.y() >= 0
            && position.y() < self.height
    }

    /// Upper-right cell of the field.
    #[must_use]
    pub const fn max_position(&self) -> Position {
        Position::new(self.width - 1, self.height - 1)
    }
}

/// Identifier assigned to a vehicle in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(u32);

impl VehicleId {
    /// Creates a new vehicle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Terminal record describing the first collision a vehicle took part in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionRecord {
    step: usize,
    peer: String,
}

impl CollisionRecord {
    /// Creates a record for a collision at the provided one-based step.
    #[must_use]
    pub fn new(step: usize, peer: impl Into<String>) -> Self {
        Self {
            step,
            peer: peer.into(),
        }
    }

    /// One-based step at which the collision happened.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Name of the vehicle this vehicle collided with.
    #[must_use]
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

/// Events reported by the world while executing a simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A vehicle rotated in place.
    VehicleTurned {
        /// Vehicle that executed the turn.
        vehicle: VehicleId,
        /// Heading the vehicle faces after the turn.
        heading: Heading,
    },
    /// A vehicle moved to a neighbouring cell.
    VehicleAdvanced {
        /// Vehicle that moved.
        vehicle: VehicleId,
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// A vehicle tried to advance past the edge of the field and stayed put.
    AdvanceBlocked {
        /// Vehicle whose advance had no effect.
        vehicle: VehicleId,
        /// Cell the vehicle still occupies.
        position: Position,
        /// Heading the vehicle kept facing.
        heading: Heading,
    },
    /// A vehicle ended a step on a cell already claimed during that step.
    CollisionDetected {
        /// One-based step at which the collision happened.
        step: usize,
        /// Vehicle that arrived on the claimed cell.
        vehicle: VehicleId,
        /// Vehicle that claimed the cell first during the step.
        other: VehicleId,
        /// Cell on which both vehicles are frozen.
        position: Position,
    },
    /// Every active vehicle executed its command for the step.
    StepCompleted {
        /// One-based number of the completed step.
        step: usize,
    },
}

/// Immutable representation of a single vehicle's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VehicleSnapshot {
    /// Identifier assigned to the vehicle on insertion.
    pub id: VehicleId,
    /// Unique, case-sensitive name of the vehicle.
    pub name: String,
    /// Cell currently occupied by the vehicle.
    pub position: Position,
    /// Heading the vehicle currently faces.
    pub heading: Heading,
    /// Commands assigned to the vehicle.
    pub commands: CommandScript,
    /// Collision the vehicle took part in, if any.
    pub collision: Option<CollisionRecord>,
}

/// Read-only snapshot describing every vehicle in the simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VehicleView {
    snapshots: Vec<VehicleSnapshot>,
}

impl VehicleView {
    /// Creates a new view, ordering snapshots by insertion.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<VehicleSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of the vehicle with the provided name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&VehicleSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.name == name)
    }

    /// Reports whether the view captured no vehicles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Validation failures reported while setting up a simulation.
///
/// Every variant is detected synchronously when the offending value is
/// supplied; a running simulation never produces one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The field was given a non-positive width or height.
    #[error("field dimensions must be positive, got {width} x {height}")]
    InvalidDimensions {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
    },
    /// Another vehicle already uses the requested name.
    #[error("a car named '{name}' already exists")]
    DuplicateName {
        /// Name that is already taken.
        name: String,
    },
    /// The requested starting cell lies outside the field.
    #[error("position {position} lies outside the {width} x {height} field")]
    OutOfBounds {
        /// Rejected position.
        position: Position,
        /// Width of the field.
        width: i32,
        /// Height of the field.
        height: i32,
    },
    /// A command script contained a character other than `L`, `R` or `F`.
    #[error("invalid command code '{code}' at index {index}, expected L, R or F")]
    InvalidCommandCode {
        /// Offending character.
        code: char,
        /// Zero-based index of the character within the script.
        index: usize,
    },
    /// A heading was spelled with something other than `N`, `S`, `E` or `W`.
    #[error("invalid heading '{code}', expected N, S, E or W")]
    InvalidHeadingCode {
        /// Offending input.
        code: String,
    },
    /// No vehicle with the requested name exists.
    #[error("no car named '{name}' exists")]
    UnknownVehicle {
        /// Name that was looked up.
        name: String,
    },
    /// Vehicle identifiers are exhausted.
    #[error("no more cars can be added to the field")]
    TooManyVehicles,
    /// The simulation already ran, so its vehicles can no longer change.
    #[error("the simulation has already run")]
    SimulationFinished,
}
