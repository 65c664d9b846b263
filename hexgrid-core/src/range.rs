//! Budget-bounded range queries and action target validation
//!
//! A range query scans the square `[-budget, budget]` of column/row offsets
//! around the origin (a superset of the true hex range) and runs one full
//! path search per in-bounds candidate. Cost grows as
//! `(2B + 1)^2 * search`, each search including its own full-grid reset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coord::GridCoordinate;
use crate::error::GridError;
use crate::pathfinding::{PathEngine, PathGrid};

/// Candidates around `origin` whose path length is at most `budget`
///
/// Unreachable candidates report a path length of 0 and are kept. Use
/// [`reachable_within`] when the target must actually be reachable.
/// Results are ordered by column offset, then row offset.
pub fn cells_within_path_length<G: PathGrid + ?Sized>(
    grid: &mut G,
    engine: &PathEngine,
    origin: GridCoordinate,
    budget: i32,
) -> Vec<GridCoordinate> {
    scan(grid, origin, budget, |grid, candidate| {
        engine.path_length(grid, origin, candidate) <= budget
    })
}

/// Candidates around `origin` with a path of length at most `budget`
pub fn reachable_within<G: PathGrid + ?Sized>(
    grid: &mut G,
    engine: &PathEngine,
    origin: GridCoordinate,
    budget: i32,
) -> Vec<GridCoordinate> {
    scan(grid, origin, budget, |grid, candidate| {
        engine
            .find_path(grid, origin, candidate)
            .is_some_and(|path| path.length <= budget)
    })
}

fn scan<G, F>(grid: &mut G, origin: GridCoordinate, budget: i32, mut keep: F) -> Vec<GridCoordinate>
where
    G: PathGrid + ?Sized,
    F: FnMut(&mut G, GridCoordinate) -> bool,
{
    let mut accepted = Vec::new();
    if budget < 0 || !grid.contains(origin) {
        return accepted;
    }

    // Offsets clamped to the grid so the scan never exceeds width * height
    let columns = (-budget).max(-origin.column)..=budget.min(grid.width() - 1 - origin.column);
    let rows = (-budget).max(-origin.row)..=budget.min(grid.height() - 1 - origin.row);

    for dc in columns {
        for dr in rows.clone() {
            let candidate = origin + GridCoordinate::new(dc, dr);
            if keep(grid, candidate) {
                accepted.push(candidate);
            }
        }
    }

    tracing::debug!(
        "range query at {} with budget {}: {} cells",
        origin,
        budget,
        accepted.len()
    );
    accepted
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Unit action kinds that need target validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Spin,
    Shoot,
    Grenade,
    Sword,
    Interact,
    Rock,
}

/// Throw distance for grenades and rocks
pub const MAX_THROW_DISTANCE: i32 = 7;

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Move,
        ActionKind::Spin,
        ActionKind::Shoot,
        ActionKind::Grenade,
        ActionKind::Sword,
        ActionKind::Interact,
        ActionKind::Rock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Move => "Move",
            ActionKind::Spin => "Spin",
            ActionKind::Shoot => "Shoot",
            ActionKind::Grenade => "Grenade",
            ActionKind::Sword => "Sword",
            ActionKind::Interact => "Interact",
            ActionKind::Rock => "Rock",
        }
    }

    /// Built-in range, `None` when the caller must supply one
    pub fn default_range(&self) -> Option<i32> {
        match self {
            ActionKind::Spin => Some(0),
            ActionKind::Grenade | ActionKind::Rock => Some(MAX_THROW_DISTANCE),
            ActionKind::Move | ActionKind::Shoot | ActionKind::Sword | ActionKind::Interact => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownAction(s.to_string()))
    }
}

/// Target cells for an action performed from `origin`
///
/// Spin only targets the origin, and nothing for an origin off the grid.
/// Move requires a real path within range; the other kinds accept any
/// candidate whose path length is within range.
pub fn valid_targets<G: PathGrid + ?Sized>(
    grid: &mut G,
    engine: &PathEngine,
    origin: GridCoordinate,
    kind: ActionKind,
    range: i32,
) -> Vec<GridCoordinate> {
    match kind {
        ActionKind::Spin if grid.contains(origin) => vec![origin],
        ActionKind::Spin => Vec::new(),
        ActionKind::Move => reachable_within(grid, engine, origin, range),
        ActionKind::Grenade
        | ActionKind::Rock
        | ActionKind::Shoot
        | ActionKind::Sword
        | ActionKind::Interact => cells_within_path_length(grid, engine, origin, range),
    }
}
