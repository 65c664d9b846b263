//! Integration tests for the HEXGRID spatial core
//!
//! Tests the full stack: layout conversion, spatial index, both path
//! engines, range queries and level loading

use hexgrid_core::{
    cells_within_path_length, reachable_within, ActionKind, EntityId, GridConfig, GridCoordinate, GridError,
    HexLayout, Level, LevelLayout, LevelRegistry, PathEngine, PlanningGrid, SpatialIndex, WorldPosition,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn random_level(seed: u64, width: i32, height: i32, density: f64) -> Level {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let layout = LevelLayout::random(&mut rng, &format!("random-{}", seed), GridConfig::new(width, height, 2.0), density);
    Level::from_layout(&layout).unwrap()
}

fn random_cell(rng: &mut ChaCha8Rng, width: i32, height: i32) -> GridCoordinate {
    GridCoordinate::new(rng.gen_range(0..width), rng.gen_range(0..height))
}

// ============================================================================
// COORDINATE CONVERSION
// ============================================================================

#[test]
fn test_world_round_trip_every_cell() {
    for cell_size in [0.5_f32, 1.0, 2.0, 3.25] {
        let layout = HexLayout::new(cell_size);
        for column in 0..20 {
            for row in 0..20 {
                let c = GridCoordinate::new(column, row);
                assert_eq!(layout.to_grid(layout.to_world(c)), c, "cell_size {} at {}", cell_size, c);
            }
        }
    }
}

#[test]
fn test_to_grid_picks_nearest_center() {
    let layout = HexLayout::new(2.0);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..500 {
        let p = WorldPosition::ground(rng.gen_range(1.0..30.0), rng.gen_range(1.0..20.0));
        let chosen = layout.to_grid(p);
        let best = layout.to_world(chosen).distance(p);
        for n in chosen.hex_neighbors() {
            assert!(best <= layout.to_world(n).distance(p) + 1e-4, "{:?} -> {}", p, chosen);
        }
    }
}

// ============================================================================
// PATHFINDING
// ============================================================================

#[test]
fn test_paths_are_valid_on_random_levels() {
    for seed in 0..20 {
        let mut level = random_level(seed, 12, 12, 0.25);
        let mut rng = ChaCha8Rng::seed_from_u64(seed + 100);

        for _ in 0..20 {
            let start = random_cell(&mut rng, 12, 12);
            let goal = random_cell(&mut rng, 12, 12);
            let Some(path) = level.find_path(start, goal) else {
                assert_eq!(level.path_length(start, goal), 0);
                continue;
            };

            assert_eq!(path.start(), Some(start));
            assert_eq!(path.goal(), Some(goal));
            for pair in path.coordinates.windows(2) {
                assert!(pair[1].is_neighbor_of(pair[0]), "{} -> {} in seed {}", pair[0], pair[1], seed);
            }
            for &c in &path.coordinates[1..] {
                assert!(level.index.is_walkable(c), "{} unwalkable in seed {}", c, seed);
            }
            assert_eq!(path.length, path.steps() as i32);
        }
    }
}

#[test]
fn test_open_grid_scenarios() {
    let mut index = SpatialIndex::new(GridConfig::new(5, 5, 2.0)).unwrap();
    let engine = PathEngine::level();

    let path = engine.find_path(&mut index, GridCoordinate::new(0, 0), GridCoordinate::new(2, 2)).unwrap();
    assert_eq!(
        path.coordinates,
        vec![
            GridCoordinate::new(0, 0),
            GridCoordinate::new(0, 1),
            GridCoordinate::new(1, 1),
            GridCoordinate::new(2, 2),
        ]
    );
    assert_eq!(path.length, 3);

    index.set_walkable(GridCoordinate::new(1, 1), false);
    index.set_walkable(GridCoordinate::new(1, 2), false);
    let path = engine.find_path(&mut index, GridCoordinate::new(0, 0), GridCoordinate::new(2, 2)).unwrap();
    assert_eq!(path.length, 4);
    assert!(!path.coordinates.contains(&GridCoordinate::new(1, 1)));
}

#[test]
fn test_blocked_row_has_no_path() {
    let mut index = SpatialIndex::new(GridConfig::new(4, 3, 2.0)).unwrap();
    for column in 0..4 {
        index.set_walkable(GridCoordinate::new(column, 2), false);
    }
    let engine = PathEngine::level();
    let goal = GridCoordinate::new(0, 2);
    assert!(engine.find_path(&mut index, GridCoordinate::new(0, 0), goal).is_none());
    assert_eq!(engine.path_length(&mut index, GridCoordinate::new(0, 0), goal), 0);
}

#[test]
fn test_engines_agree_on_matching_grids() {
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = LevelLayout::random(&mut rng, "pair", GridConfig::new(10, 8, 1.0), 0.2);
        let probe = layout.probe();
        let mut index = SpatialIndex::with_probe(layout.config, &probe).unwrap();
        let mut planner = PlanningGrid::with_probe(layout.config, &probe).unwrap();

        for engine in [PathEngine::level(), PathEngine::planning()] {
            for _ in 0..10 {
                let start = random_cell(&mut rng, 10, 8);
                let goal = random_cell(&mut rng, 10, 8);
                assert_eq!(
                    engine.find_path(&mut index, start, goal),
                    engine.find_path(&mut planner, start, goal),
                    "seed {} {} -> {}",
                    seed,
                    start,
                    goal
                );
            }
        }
    }
}

#[test]
fn test_planning_lengths_scale_by_ten() {
    let mut level = random_level(3, 10, 10, 0.0);
    let start = GridCoordinate::new(0, 0);
    for goal in [GridCoordinate::new(2, 0), GridCoordinate::new(4, 4), GridCoordinate::new(9, 9)] {
        let gameplay = level.find_path(start, goal).unwrap();
        let planned = level.plan_path(start, goal).unwrap();
        assert_eq!(planned.steps(), gameplay.steps());
        assert_eq!(planned.length, gameplay.length * 10);
    }
}

// ============================================================================
// RANGE QUERIES
// ============================================================================

#[test]
fn test_reachable_range_is_monotonic() {
    let mut level = random_level(9, 12, 12, 0.2);
    let engine = PathEngine::level();
    let origin = GridCoordinate::new(0, 0);

    let mut previous = Vec::new();
    for budget in 0..6 {
        let cells = reachable_within(&mut level.index, &engine, origin, budget);
        assert!(cells.contains(&origin));
        for c in &previous {
            assert!(cells.contains(c), "budget {} dropped {}", budget, c);
        }
        previous = cells;
    }
}

#[test]
fn test_path_length_range_keeps_unreachable_cells() {
    let mut index = SpatialIndex::new(GridConfig::new(5, 5, 1.0)).unwrap();
    let engine = PathEngine::level();
    let walled = GridCoordinate::new(4, 4);
    for n in walled.hex_neighbors() {
        if index.is_valid(n) {
            index.set_walkable(n, false);
        }
    }
    let origin = GridCoordinate::new(2, 2);
    assert!(cells_within_path_length(&mut index, &engine, origin, 2).contains(&walled));
    assert!(!reachable_within(&mut index, &engine, origin, 2).contains(&walled));
}

#[test]
fn test_action_targets_through_level() {
    let layout = LevelLayout::open("arena", GridConfig::new(7, 7, 2.0)).with_blocked([GridCoordinate::new(4, 3)]);
    let mut level = Level::from_layout(&layout).unwrap();
    let origin = GridCoordinate::new(3, 3);

    assert_eq!(level.valid_targets(origin, ActionKind::Spin, None), vec![origin]);

    let moves = level.valid_targets(origin, ActionKind::Move, Some(1));
    assert!(!moves.contains(&GridCoordinate::new(4, 3)));
    assert_eq!(moves.len(), 6);

    // Grenade default range covers the whole level
    assert_eq!(level.valid_targets(origin, ActionKind::Grenade, None).len(), 49);
}

// ============================================================================
// OCCUPANCY
// ============================================================================

#[test]
fn test_occupancy_is_idempotent() {
    let mut index = SpatialIndex::new(GridConfig::default()).unwrap();
    let c = GridCoordinate::new(3, 4);
    let unit = EntityId(1);

    index.add_occupant(c, unit);
    index.add_occupant(c, unit);
    assert_eq!(index.occupants(c), &[unit]);

    index.remove_occupant(c, EntityId(2));
    assert_eq!(index.occupants(c), &[unit]);

    index.remove_occupant(c, unit);
    index.remove_occupant(c, unit);
    assert!(!index.has_any_occupant(c));
}

#[test]
fn test_unit_walks_its_path() {
    let mut level = random_level(21, 10, 10, 0.1);
    let unit = EntityId(7);
    let start = GridCoordinate::new(0, 0);
    level.index.add_occupant(start, unit);

    let goal = level
        .index
        .coordinates()
        .filter(|&c| c != start && level.index.is_walkable(c))
        .last()
        .unwrap();
    if let Some(path) = level.find_path(start, goal) {
        for pair in path.coordinates.windows(2) {
            level.index.move_occupant(unit, pair[0], pair[1]);
        }
        assert_eq!(level.index.first_occupant(goal), Some(unit));
        assert!(!level.index.has_any_occupant(start));
    }
}

// ============================================================================
// LEVELS
// ============================================================================

#[test]
fn test_registry_guards_names() {
    let mut registry = LevelRegistry::new();
    let layout = LevelLayout::open("one", GridConfig::new(4, 4, 1.0));
    registry.register(&layout).unwrap();
    assert!(matches!(registry.register(&layout), Err(GridError::DuplicateLevel(name)) if name == "one"));

    registry
        .register(&LevelLayout::open("two", GridConfig::new(3, 3, 1.0)))
        .unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_layout_file_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let layout = LevelLayout::random(&mut rng, "file", GridConfig::new(9, 7, 1.5), 0.3)
        .with_occupant(EntityId(4), GridCoordinate::new(0, 0));
    let path = std::env::temp_dir().join(format!("hexgrid_integration_{}.json", std::process::id()));
    layout.save(&path).unwrap();
    let loaded = LevelLayout::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, layout);

    let mut a = Level::from_layout(&layout).unwrap();
    let mut b = Level::from_layout(&loaded).unwrap();
    let goal = GridCoordinate::new(8, 6);
    assert_eq!(a.find_path(GridCoordinate::new(0, 0), goal), b.find_path(GridCoordinate::new(0, 0), goal));
}
