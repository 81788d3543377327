//! # Dungeon Generation
//!
//! Floor layout and population.
//!
//! A floor is built in three passes:
//! 1. Lay out walls with the configured [`LayoutStrategy`]
//! 2. Seal every pocket the entry tile cannot reach, so reachability holds
//!    for the whole grid rather than by coincidence
//! 3. Place boxes, the stairs and the enemy roster by resampling random
//!    tiles until each lands on free floor away from the entry

use crate::game::{entity_id, Entity, Grid, Position, TileKind, ENTRY_POSITION};
use crate::utils::{reachable_from, RandomSource};
use crate::{
    spawn_enemy, EncounterGenerator, GeneratedFloor, GenerationConfig, Generator, ReckoningError,
    ReckoningResult,
};
use std::collections::HashSet;

/// How walls are laid out before population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Start from open floor and scatter walls at random tiles
    WallScatter,
    /// Start from solid rock and carve floor along a random walk from the entry
    RandomWalk,
}

/// Standard floor generator.
#[derive(Debug, Clone)]
pub struct FloorGenerator {
    pub layout: LayoutStrategy,
    encounters: EncounterGenerator,
}

impl FloorGenerator {
    /// Creates a generator using wall scatter.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{FloorGenerator, GenerationConfig, Generator, SeededRng, TileKind, ENTRY_POSITION};
    ///
    /// let floor = FloorGenerator::new()
    ///     .generate(&GenerationConfig::default(), &mut SeededRng::new(42))
    ///     .unwrap();
    /// assert_eq!(floor.grid.kind_at(ENTRY_POSITION), Some(TileKind::Floor));
    /// ```
    pub fn new() -> Self {
        Self::with_layout(LayoutStrategy::WallScatter)
    }

    pub fn with_layout(layout: LayoutStrategy) -> Self {
        Self {
            layout,
            encounters: EncounterGenerator::new(),
        }
    }

    /// Lays out walls, retrying until enough open tiles stay reachable.
    fn build_layout(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> ReckoningResult<Grid> {
        let required = config.required_open_tiles();

        for attempt in 1..=config.max_layout_attempts.max(1) {
            let mut grid = match self.layout {
                LayoutStrategy::WallScatter => scatter_walls(config, rng)?,
                LayoutStrategy::RandomWalk => carve_walk(config, rng)?,
            };
            let open = seal_unreachable(&mut grid)?;

            // The entry tile itself can never hold a placement.
            if open.saturating_sub(1) >= required {
                log::debug!(
                    "Floor {} layout accepted on attempt {} with {} open tiles",
                    config.floor,
                    attempt,
                    open
                );
                return Ok(grid);
            }
            log::debug!(
                "Floor {} layout attempt {} left {} open tiles, {} needed",
                config.floor,
                attempt,
                open,
                required + 1
            );
        }

        Err(ReckoningError::GenerationFailed(format!(
            "no {}x{} layout for floor {} leaves {} reachable tiles after {} attempts",
            config.width,
            config.height,
            config.floor,
            required + 1,
            config.max_layout_attempts
        )))
    }
}

impl Default for FloorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn random_position(grid: &Grid, rng: &mut dyn RandomSource) -> Position {
    Position::new(
        rng.roll_range(0, grid.width() - 1),
        rng.roll_range(0, grid.height() - 1),
    )
}

fn scatter_walls(config: &GenerationConfig, rng: &mut dyn RandomSource) -> ReckoningResult<Grid> {
    let mut grid = Grid::new(config.width, config.height);
    for _ in 0..config.wall_count {
        let pos = random_position(&grid, rng);
        if pos != ENTRY_POSITION {
            grid.set_kind(pos, TileKind::Wall)?;
        }
    }
    Ok(grid)
}

fn carve_walk(config: &GenerationConfig, rng: &mut dyn RandomSource) -> ReckoningResult<Grid> {
    let mut grid = Grid::new(config.width, config.height);
    for pos in grid.positions().collect::<Vec<_>>() {
        grid.set_kind(pos, TileKind::Wall)?;
    }

    let total = (config.width * config.height).max(0) as usize;
    let target = total.saturating_sub(config.wall_count as usize).max(1);
    let mut cursor = ENTRY_POSITION;
    grid.set_kind(cursor, TileKind::Floor)?;
    let mut carved = 1;

    for _ in 0..total * 20 {
        if carved >= target {
            break;
        }
        let options: Vec<Position> = cursor
            .cardinal_adjacent_positions()
            .into_iter()
            .filter(|pos| grid.in_bounds(*pos))
            .collect();
        if options.is_empty() {
            break;
        }
        cursor = options[rng.pick_index(options.len())];
        if grid.kind_at(cursor) == Some(TileKind::Wall) {
            grid.set_kind(cursor, TileKind::Floor)?;
            carved += 1;
        }
    }
    Ok(grid)
}

/// Walls off every open tile the entry cannot reach. Returns the number of
/// open tiles left.
fn seal_unreachable(grid: &mut Grid) -> ReckoningResult<usize> {
    let reachable = reachable_from(grid, ENTRY_POSITION);
    let pockets: Vec<Position> = grid
        .positions()
        .filter(|pos| {
            grid.kind_at(*pos).map_or(false, |kind| kind.is_traversable())
                && !reachable.contains(pos)
        })
        .collect();
    if !pockets.is_empty() {
        log::debug!("Sealing {} unreachable tiles", pockets.len());
    }
    for pos in pockets {
        grid.set_kind(pos, TileKind::Wall)?;
    }
    Ok(reachable.len())
}

/// Resamples random tiles until one is free floor away from the entry.
fn place(
    grid: &Grid,
    occupied: &HashSet<Position>,
    what: &'static str,
    attempts: u32,
    rng: &mut dyn RandomSource,
) -> ReckoningResult<Position> {
    for _ in 0..attempts {
        let pos = random_position(grid, rng);
        if pos != ENTRY_POSITION
            && grid.kind_at(pos) == Some(TileKind::Floor)
            && !occupied.contains(&pos)
        {
            return Ok(pos);
        }
    }
    Err(ReckoningError::PlacementExhausted { what, attempts })
}

impl Generator<GeneratedFloor> for FloorGenerator {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> ReckoningResult<GeneratedFloor> {
        let mut grid = self.build_layout(config, rng)?;
        let attempts = config.max_placement_attempts;
        let mut occupied = HashSet::new();

        for _ in 0..config.box_count {
            let pos = place(&grid, &occupied, "box", attempts, rng)?;
            grid.set_kind(
                pos,
                TileKind::Box {
                    durability: config.box_durability,
                },
            )?;
        }

        let stairs = if config.place_stairs {
            let pos = place(&grid, &occupied, "stairs", attempts, rng)?;
            grid.set_kind(pos, TileKind::Stairs)?;
            Some(pos)
        } else {
            None
        };

        let roster = self.encounters.generate(config, rng)?;
        self.encounters.validate(&roster, config)?;

        let mut enemies: Vec<Entity> = Vec::with_capacity(roster.len());
        for (index, kind) in roster.into_iter().enumerate() {
            let pos = place(&grid, &occupied, "enemy", attempts, rng)?;
            occupied.insert(pos);
            let id = entity_id(config.floor as u64, index as u64);
            enemies.push(spawn_enemy(id, kind, config.floor, pos, &config.enemies));
        }

        let floor = GeneratedFloor {
            floor: config.floor,
            grid,
            enemies,
            entry: ENTRY_POSITION,
            stairs,
        };
        self.validate(&floor, config)?;

        log::info!(
            "Generated floor {} with {} enemies{}",
            floor.floor,
            floor.enemies.len(),
            if floor.stairs.is_some() { " and stairs" } else { "" }
        );
        Ok(floor)
    }

    fn validate(&self, floor: &GeneratedFloor, config: &GenerationConfig) -> ReckoningResult<()> {
        let grid = &floor.grid;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(ReckoningError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }
        if grid.kind_at(floor.entry) != Some(TileKind::Floor) {
            return Err(ReckoningError::GenerationFailed(
                "entry tile is not floor".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for enemy in &floor.enemies {
            if enemy.position == floor.entry {
                return Err(ReckoningError::GenerationFailed(format!(
                    "{} spawned on the entry tile",
                    enemy.name
                )));
            }
            if grid.kind_at(enemy.position) != Some(TileKind::Floor) {
                return Err(ReckoningError::GenerationFailed(format!(
                    "{} spawned off floor at {}",
                    enemy.name, enemy.position
                )));
            }
            if !seen.insert(enemy.position) {
                return Err(ReckoningError::GenerationFailed(format!(
                    "two enemies share {}",
                    enemy.position
                )));
            }
        }

        let reachable = reachable_from(grid, floor.entry);
        let open = grid.count(|kind| kind.is_traversable());
        if reachable.len() != open {
            return Err(ReckoningError::GenerationFailed(format!(
                "{} of {} open tiles are unreachable from the entry",
                open - reachable.len(),
                open
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        match self.layout {
            LayoutStrategy::WallScatter => "FloorGenerator(wall scatter)",
            LayoutStrategy::RandomWalk => "FloorGenerator(random walk)",
        }
    }
}
