//! Prompt loop that walks the player through configuring and running a
//! simulation.

use std::io::{BufRead, Write};

use anyhow::Result;
use autodrive_core::{Event, Grid, VehicleId};
use autodrive_system_report::Report;
use autodrive_world::{self as world, query, Vehicle, World};
use log::{debug, info};

use crate::input::{self, InputError, MenuChoice};

const FIELD_PROMPT: &str =
    "\nPlease enter the width and height of the simulation field in x y format:";
const SETUP_MENU: &str =
    "\nPlease choose from the following options:\n[1] Add a car to field\n[2] Run simulation";
const FINAL_MENU: &str = "\nPlease choose from the following options:\n[1] Start over\n[2] Exit";
const GOODBYE: &str = "\nThank you for running the simulation. Goodbye!";

/// Interactive session reading answers from `input` and writing prompts and
/// results to `output`.
///
/// Every prompt returns `None` once the input is exhausted, which ends the
/// session without an error.
pub(crate) struct Session<R, W> {
    input: R,
    output: W,
    report: Report,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            report: Report::default(),
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            let Some(mut world) = self.create_field()? else {
                return Ok(());
            };
            if !self.simulate(&mut world)? {
                return Ok(());
            }

            self.say(FINAL_MENU)?;
            match self.read_choice()? {
                Some(MenuChoice::First) => info!("starting over"),
                Some(MenuChoice::Second) => {
                    self.say(GOODBYE)?;
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    fn create_field(&mut self) -> Result<Option<World>> {
        self.say(self.report.welcome_banner())?;
        self.say(FIELD_PROMPT)?;

        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match input::parse_dimensions(&line) {
                Ok(grid) => {
                    info!("created {} x {} field", grid.width(), grid.height());
                    let confirmation = self.report.field_created(grid);
                    self.say(&confirmation)?;
                    return Ok(Some(World::with_grid(grid)));
                }
                Err(error) => self.reject(&error)?,
            }
        }
    }

    /// Runs the setup menu until the simulation has run. Returns `false` when
    /// the input ended first.
    fn simulate(&mut self, world: &mut World) -> Result<bool> {
        loop {
            self.say(SETUP_MENU)?;
            let Some(choice) = self.read_choice()? else {
                return Ok(false);
            };

            match choice {
                MenuChoice::First => {
                    if !self.add_car(world)? {
                        return Ok(false);
                    }
                }
                MenuChoice::Second if query::vehicles(world).is_empty() => {
                    self.say(
                        "No cars have been added to the simulation. Please add at least one car.",
                    )?;
                }
                MenuChoice::Second => {
                    self.show_roster(world)?;

                    let mut events = Vec::new();
                    world::run(world, &mut events);
                    log_events(world, &events);
                    info!(
                        "simulation finished after {} steps",
                        query::step_count(world)
                    );

                    self.say("\nAfter simulation, the result is:")?;
                    for line in self.report.results(&query::vehicle_view(world)) {
                        self.say(&line)?;
                    }
                    return Ok(true);
                }
            }
        }
    }

    /// Prompts for a new car. Returns `false` when the input ended first.
    fn add_car(&mut self, world: &mut World) -> Result<bool> {
        self.say("Please enter the name of the car:")?;
        let name = loop {
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match input::parse_name(&line) {
                Ok(name) => break name,
                Err(error) => self.reject(&error)?,
            }
        };

        if query::vehicle(world, &name).is_some() {
            self.say(&format!(
                "Car {name} already exists. Please choose a different name."
            ))?;
            return Ok(true);
        }

        self.say(&format!(
            "Please enter initial position of car {name} in x y Direction format:"
        ))?;
        let grid: Grid = query::grid(world);
        let (position, heading) = loop {
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match input::parse_placement(&line, grid) {
                Ok(placement) => break placement,
                Err(error) => self.reject(&error)?,
            }
        };

        self.say(&format!("Please enter the commands for car {name}:"))?;
        let script = loop {
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match input::parse_commands(&line) {
                Ok(script) => break script,
                Err(error) => self.reject(&error)?,
            }
        };

        let _ = world.add_vehicle(name.as_str(), position, heading)?;
        world.assign_script(&name, script)?;
        info!("added car {name} at {position} facing {heading}");

        self.show_roster(world)?;
        Ok(true)
    }

    fn show_roster(&mut self, world: &World) -> Result<()> {
        self.say("\nYour current list of cars are:")?;
        for line in self.report.roster(&query::vehicle_view(world)) {
            self.say(&line)?;
        }
        Ok(())
    }

    fn read_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match input::parse_choice(&line) {
                Ok(choice) => return Ok(Some(choice)),
                Err(error) => self.reject(&error)?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            info!("input closed, ending session");
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn reject(&mut self, error: &InputError) -> Result<()> {
        debug!("rejected input: {error:?}");
        self.say(&format!("Invalid input: {error}. Please try again."))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

fn log_events(world: &World, events: &[Event]) {
    let name = |id: VehicleId| {
        query::vehicles(world)
            .get(id.get() as usize)
            .map_or("<unknown>", Vehicle::name)
    };

    for event in events {
        match event {
            Event::VehicleTurned { vehicle, heading } => {
                debug!("{} turned to face {heading}", name(*vehicle));
            }
            Event::VehicleAdvanced { vehicle, from, to } => {
                debug!("{} advanced from {from} to {to}", name(*vehicle));
            }
            Event::AdvanceBlocked {
                vehicle,
                position,
                heading,
            } => {
                debug!(
                    "{} stayed at {position}, the field ends to the {heading}",
                    name(*vehicle)
                );
            }
            Event::CollisionDetected {
                step,
                vehicle,
                other,
                position,
            } => {
                debug!(
                    "{} collided with {} at {position} on step {step}",
                    name(*vehicle),
                    name(*other)
                );
            }
            Event::StepCompleted { step } => debug!("step {step} completed"),
        }
    }
}
