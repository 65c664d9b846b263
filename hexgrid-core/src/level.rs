//! Level - one spatial index, one planning grid, and their engines
//!
//! Levels are created through [`LevelRegistry`], which refuses a second
//! level under a name already in use instead of relying on a global
//! instance.

use rustc_hash::FxHashMap;

use crate::coord::GridCoordinate;
use crate::error::GridError;
use crate::index::SpatialIndex;
use crate::level_layout::LevelLayout;
use crate::pathfinding::{Path, PathEngine};
use crate::planning::PlanningGrid;
use crate::range::{valid_targets, ActionKind};

/// Everything spatial about one loaded level
#[derive(Clone, Debug)]
pub struct Level {
    name: String,
    pub index: SpatialIndex,
    pub planner: PlanningGrid,
    engine: PathEngine,
    planning_engine: PathEngine,
}

impl Level {
    /// Build both grids from a layout and place its occupants and interactables
    pub fn from_layout(layout: &LevelLayout) -> Result<Self, GridError> {
        layout.validate()?;

        let probe = layout.probe();
        let mut index = SpatialIndex::with_probe(layout.config, &probe)?;
        let planner = PlanningGrid::with_probe(layout.config, &probe)?;

        for placement in &layout.occupants {
            index.add_occupant(placement.at, placement.entity);
        }
        for placement in &layout.interactables {
            index.set_interactable(placement.at, placement.id);
        }

        tracing::debug!(
            "level '{}' loaded: {}x{}, {} blocked, {} occupants",
            layout.name,
            layout.config.width,
            layout.config.height,
            layout.blocked.len(),
            layout.occupants.len()
        );

        Ok(Self {
            name: layout.name.clone(),
            index,
            planner,
            engine: PathEngine::level(),
            planning_engine: PathEngine::planning(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &PathEngine {
        &self.engine
    }

    pub fn planning_engine(&self) -> &PathEngine {
        &self.planning_engine
    }

    // ========================================================================
    // GAMEPLAY QUERIES
    // ========================================================================

    pub fn find_path(&mut self, start: GridCoordinate, goal: GridCoordinate) -> Option<Path> {
        self.engine.find_path(&mut self.index, start, goal)
    }

    pub fn has_path(&mut self, start: GridCoordinate, goal: GridCoordinate) -> bool {
        self.engine.has_path(&mut self.index, start, goal)
    }

    pub fn path_length(&mut self, start: GridCoordinate, goal: GridCoordinate) -> i32 {
        self.engine.path_length(&mut self.index, start, goal)
    }

    /// Target cells for an action
    ///
    /// Without an explicit range the action's default is used, and kinds
    /// without a default fall back to 0.
    pub fn valid_targets(
        &mut self,
        origin: GridCoordinate,
        kind: ActionKind,
        range: Option<i32>,
    ) -> Vec<GridCoordinate> {
        let range = range.or(kind.default_range()).unwrap_or(0);
        valid_targets(&mut self.index, &self.engine, origin, kind, range)
    }

    // ========================================================================
    // PLANNING QUERIES
    // ========================================================================

    pub fn plan_path(&mut self, start: GridCoordinate, goal: GridCoordinate) -> Option<Path> {
        self.planning_engine.find_path(&mut self.planner, start, goal)
    }

    // ========================================================================
    // WORLD EVENTS
    // ========================================================================

    /// A destructible obstacle at `coord` is gone; the cell opens on both grids
    pub fn obstacle_destroyed(&mut self, coord: GridCoordinate) {
        self.index.set_walkable(coord, true);
        self.planner.set_walkable(coord, true);
        tracing::debug!("obstacle at {} destroyed in level '{}'", coord, self.name);
    }
}

/// Guarded factory for levels, one per name
#[derive(Debug, Default)]
pub struct LevelRegistry {
    levels: FxHashMap<String, Level>,
}

impl LevelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a level
    ///
    /// A second level under an existing name is a configuration error: it is
    /// logged, not built, and the existing level is left untouched.
    pub fn register(&mut self, layout: &LevelLayout) -> Result<&mut Level, GridError> {
        if self.levels.contains_key(&layout.name) {
            tracing::error!("there is already a level named '{}'", layout.name);
            return Err(GridError::DuplicateLevel(layout.name.clone()));
        }

        let level = Level::from_layout(layout)?;
        Ok(self.levels.entry(layout.name.clone()).or_insert(level))
    }

    pub fn get(&self, name: &str) -> Option<&Level> {
        self.levels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Level> {
        self.levels.get_mut(name)
    }

    /// Unload a level, freeing its name
    pub fn remove(&mut self, name: &str) -> Option<Level> {
        self.levels.remove(name)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
