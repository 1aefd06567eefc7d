//! Parsing of the lines typed at each prompt.

use autodrive_core::{CommandScript, Grid, Heading, Position, SimulationError};
use thiserror::Error;

/// Reasons a line is rejected; the session re-prompts after reporting one.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("expected {expected} values separated by spaces")]
    WrongFieldCount { expected: usize },
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),
    #[error("car name must not be empty")]
    BlankName,
    #[error("unknown option '{0}', expected 1 or 2")]
    UnknownOption(String),
    #[error("position {position} must be within (0,0) to {max}")]
    OutsideField { position: Position, max: Position },
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Entry picked from a two-option menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    First,
    Second,
}

pub(crate) fn parse_choice(line: &str) -> Result<MenuChoice, InputError> {
    match line.trim() {
        "1" => Ok(MenuChoice::First),
        "2" => Ok(MenuChoice::Second),
        other => Err(InputError::UnknownOption(other.to_owned())),
    }
}

/// Parses `width height` into a validated field.
pub(crate) fn parse_dimensions(line: &str) -> Result<Grid, InputError> {
    let [width, height] = fields::<2>(line)?;
    Ok(Grid::new(parse_int(width)?, parse_int(height)?)?)
}

pub(crate) fn parse_name(line: &str) -> Result<String, InputError> {
    let name = line.trim();
    if name.is_empty() {
        return Err(InputError::BlankName);
    }
    Ok(name.to_owned())
}

/// Parses `x y Direction`, accepting the direction in either case, and checks
/// that the cell lies within `grid`.
pub(crate) fn parse_placement(line: &str, grid: Grid) -> Result<(Position, Heading), InputError> {
    let [x, y, heading] = fields::<3>(line)?;
    let position = Position::new(parse_int(x)?, parse_int(y)?);
    let heading = heading.to_ascii_uppercase().parse::<Heading>()?;

    if !grid.contains(position) {
        return Err(InputError::OutsideField {
            position,
            max: grid.max_position(),
        });
    }

    Ok((position, heading))
}

/// Parses a command script, accepting codes in either case.
pub(crate) fn parse_commands(line: &str) -> Result<CommandScript, InputError> {
    Ok(CommandScript::parse(&line.trim().to_ascii_uppercase())?)
}

fn fields<const N: usize>(line: &str) -> Result<[&str; N], InputError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    <[&str; N]>::try_from(parts).map_err(|_| InputError::WrongFieldCount { expected: N })
}

fn parse_int(value: &str) -> Result<i32, InputError> {
    value
        .parse()
        .map_err(|_| InputError::NotAnInteger(value.to_owned()))
}
