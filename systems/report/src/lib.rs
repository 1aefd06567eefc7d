#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure reporting system that renders vehicle snapshots as text.
//!
//! Nothing here touches the world: every function reads a [`VehicleView`] or
//! a single [`VehicleSnapshot`] and returns freshly formatted lines, so the
//! same snapshot always renders identically.

use autodrive_core::{Grid, VehicleSnapshot, VehicleView, WELCOME_BANNER};

/// Produces the text shown to the player before and after a run.
#[derive(Debug, Default)]
pub struct Report;

impl Report {
    /// Banner that greets the player when a session starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Confirms the field the player configured.
    #[must_use]
    pub fn field_created(&self, grid: Grid) -> String {
        format!(
            "You have created a field of {} x {}.",
            grid.width(),
            grid.height()
        )
    }

    /// Describes a vehicle as it was configured, including its script.
    ///
    /// Renders `- A, (1,2) N, FFRFFFFRRL`.
    #[must_use]
    pub fn roster_line(&self, snapshot: &VehicleSnapshot) -> String {
        format!(
            "- {}, {} {}, {}",
            snapshot.name, snapshot.position, snapshot.heading, snapshot.commands
        )
    }

    /// Describes the final state of a vehicle after a run.
    ///
    /// Intact vehicles render as `- A, (5,4) S`; collided vehicles render as
    /// `- A, collides with B at (5,4) at step 7`.
    #[must_use]
    pub fn describe(&self, snapshot: &VehicleSnapshot) -> String {
        match &snapshot.collision {
            Some(record) => format!(
                "- {}, collides with {} at {} at step {}",
                snapshot.name,
                record.peer(),
                snapshot.position,
                record.step()
            ),
            None => format!(
                "- {}, {} {}",
                snapshot.name, snapshot.position, snapshot.heading
            ),
        }
    }

    /// Roster lines for every vehicle in insertion order.
    #[must_use]
    pub fn roster(&self, view: &VehicleView) -> Vec<String> {
        view.iter()
            .map(|snapshot| self.roster_line(snapshot))
            .collect()
    }

    /// Result lines for every vehicle in insertion order.
    #[must_use]
    pub fn results(&self, view: &VehicleView) -> Vec<String> {
        view.iter()
            .map(|snapshot| self.describe(snapshot))
            .collect()
    }
}
