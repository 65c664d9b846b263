//! LevelLayout - serialisable level description

use std::path::Path;

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cell::{EntityId, InteractableId};
use crate::config::GridConfig;
use crate::coord::GridCoordinate;
use crate::error::GridError;
use crate::layout::WorldPosition;

/// An entity placed at level setup
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupantPlacement {
    pub entity: EntityId,
    pub at: GridCoordinate,
}

/// An interactable placed at level setup
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractablePlacement {
    pub id: InteractableId,
    pub at: GridCoordinate,
}

/// Grid dimensions plus initial obstacles, occupants and interactables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    pub config: GridConfig,
    #[serde(default)]
    pub blocked: Vec<GridCoordinate>,
    #[serde(default)]
    pub occupants: Vec<OccupantPlacement>,
    #[serde(default)]
    pub interactables: Vec<InteractablePlacement>,
}

impl LevelLayout {
    /// Open level with no obstacles
    pub fn open(name: &str, config: GridConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            blocked: Vec::new(),
            occupants: Vec::new(),
            interactables: Vec::new(),
        }
    }

    pub fn with_blocked(mut self, blocked: impl IntoIterator<Item = GridCoordinate>) -> Self {
        self.blocked.extend(blocked);
        self
    }

    pub fn with_occupant(mut self, entity: EntityId, at: GridCoordinate) -> Self {
        self.occupants.push(OccupantPlacement { entity, at });
        self
    }

    pub fn with_interactable(mut self, id: InteractableId, at: GridCoordinate) -> Self {
        self.interactables.push(InteractablePlacement { id, at });
        self
    }

    /// Check the config and that every placement is inside the grid
    pub fn validate(&self) -> Result<(), GridError> {
        self.config.validate()?;

        let placements = self
            .blocked
            .iter()
            .copied()
            .chain(self.occupants.iter().map(|o| o.at))
            .chain(self.interactables.iter().map(|i| i.at));

        for coord in placements {
            let in_bounds = coord.column >= 0
                && coord.row >= 0
                && coord.column < self.config.width
                && coord.row < self.config.height;
            if !in_bounds {
                return Err(GridError::OutOfBounds {
                    coordinate: coord,
                    width: self.config.width,
                    height: self.config.height,
                });
            }
        }
        Ok(())
    }

    /// Obstacle probe: blocked when the world position falls in a blocked cell
    pub fn probe(&self) -> impl Fn(WorldPosition) -> bool {
        let layout = self.config.layout();
        let blocked: FxHashSet<GridCoordinate> = self.blocked.iter().copied().collect();
        move |position| blocked.contains(&layout.to_grid(position))
    }

    /// Load from JSON file (blocked cells as objects or "column,row" strings)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse JSON (blocked cells as objects or "column,row" strings)
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        if let Ok(layout) = serde_json::from_str::<LevelLayout>(content) {
            return Ok(layout);
        }

        #[derive(Deserialize)]
        struct StringLayout {
            name: Option<String>,
            config: GridConfig,
            #[serde(default)]
            blocked: Vec<String>,
            #[serde(default)]
            occupants: Vec<OccupantPlacement>,
            #[serde(default)]
            interactables: Vec<InteractablePlacement>,
        }

        // Try the compact format, else report the object-format error
        match serde_json::from_str::<StringLayout>(content) {
            Ok(sl) => {
                let blocked = sl
                    .blocked
                    .iter()
                    .map(|s| s.parse::<GridCoordinate>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(LevelLayout {
                    name: sl.name.unwrap_or_else(|| "unnamed".to_string()),
                    config: sl.config,
                    blocked,
                    occupants: sl.occupants,
                    interactables: sl.interactables,
                })
            }
            Err(_) => {
                let layout: LevelLayout = serde_json::from_str(content)?;
                Ok(layout)
            }
        }
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Random obstacles, each cell blocked with probability `density`
    ///
    /// `(0, 0)` is never blocked so there is always a known open cell.
    pub fn random<R: Rng>(rng: &mut R, name: &str, config: GridConfig, density: f64) -> Self {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let mut blocked = Vec::new();
        for column in 0..config.width {
            for row in 0..config.height {
                if (column, row) == (0, 0) {
                    continue;
                }
                if rng.gen_bool(density) {
                    blocked.push(GridCoordinate::new(column, row));
                }
            }
        }

        Self {
            blocked,
            ..Self::open(name, config)
        }
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::open("default", GridConfig::default())
    }
}
