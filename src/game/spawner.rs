use super::constants::{
    AMMO_LEVEL_INTERVAL, BOMB_LEVEL_INTERVAL, CLEAR_HAZARDS_EVERY_LEVEL, GHOST_SPAWN_CHANCE,
    GHOST_SPAWN_MIN_LEVEL, SAFE_ZONE_TILES, SHIELD_SPAWN_CHANCE,
};
use super::grid::{Grid, TileMask};
use super::snake::Snake;
use super::types::Tile;
use rand::Rng;

/// Everything placed on the board besides the snakes themselves.
#[derive(Debug, Clone, Default)]
pub struct WorldObjects {
    pub apple: Option<Tile>,
    pub shield_powerup: Option<Tile>,
    pub ghost_powerup: Option<Tile>,
    pub bomb_powerup: Option<Tile>,
    pub ammo_powerup: Option<Tile>,
    pub enemies: Vec<Tile>,
    pub poisons: Vec<Tile>,
}

/// Cumulative hazard removals (bombs and bullet hits). Regeneration deducts
/// these from the level-derived targets so destroyed hazards stay gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovalCounters {
    pub enemies: u32,
    pub poisons: u32,
}

pub fn target_enemy_count(level: u32, removed: &RemovalCounters) -> usize {
    (level / 2).saturating_sub(removed.enemies) as usize
}

pub fn target_poison_count(level: u32, removed: &RemovalCounters) -> usize {
    level.saturating_sub(1).saturating_sub(removed.poisons) as usize
}

pub fn should_spawn_shield(level: u32, rng: &mut impl Rng) -> bool {
    level % 2 == 0 && rng.gen_bool(SHIELD_SPAWN_CHANCE)
}

pub fn should_spawn_ghost(level: u32, rng: &mut impl Rng) -> bool {
    level > GHOST_SPAWN_MIN_LEVEL && level % 2 == 1 && rng.gen_bool(GHOST_SPAWN_CHANCE)
}

pub fn should_spawn_bomb(level: u32) -> bool {
    level % BOMB_LEVEL_INTERVAL == 0
}

pub fn should_spawn_ammo(level: u32) -> bool {
    level % AMMO_LEVEL_INTERVAL == 0
}

/// Re-rolls the object set for the given level. Power-ups are always
/// cleared; hazards persist across levels (unless the clear policy says
/// otherwise) and are reconciled to the level-derived targets, truncating
/// the most recently added tiles first when shrinking.
pub fn regenerate(
    objects: &mut WorldObjects,
    grid: &Grid,
    snakes: &[Snake],
    level: u32,
    removed: &RemovalCounters,
    rng: &mut impl Rng,
) {
    let mut taken = grid.tile_mask();

    for snake in snakes {
        for segment in snake.body() {
            taken.mark(*segment);
        }
    }
    if CLEAR_HAZARDS_EVERY_LEVEL {
        objects.enemies.clear();
        objects.poisons.clear();
    } else {
        for tile in objects.enemies.iter().chain(objects.poisons.iter()) {
            taken.mark(*tile);
        }
    }

    objects.shield_powerup = None;
    objects.ghost_powerup = None;
    objects.bomb_powerup = None;
    objects.ammo_powerup = None;

    objects.apple = Some(claim_free_tile(grid, &mut taken, rng));

    if should_spawn_shield(level, rng) {
        objects.shield_powerup = Some(claim_free_tile(grid, &mut taken, rng));
    }
    if should_spawn_ghost(level, rng) {
        objects.ghost_powerup = Some(claim_free_tile(grid, &mut taken, rng));
    }
    if should_spawn_bomb(level) {
        objects.bomb_powerup = Some(claim_free_tile(grid, &mut taken, rng));
    }
    if should_spawn_ammo(level) {
        objects.ammo_powerup = Some(claim_free_tile(grid, &mut taken, rng));
    }

    // Keep the wrapped run ahead of each live snake clear of hazards so a
    // level transition never produces an unavoidable collision.
    for snake in snakes {
        if !snake.is_alive() {
            continue;
        }
        let Some(mut tile) = snake.head() else {
            continue;
        };
        for _ in 0..SAFE_ZONE_TILES {
            tile = grid.next_tile(tile, snake.direction());
            taken.mark(tile);
        }
    }

    let enemy_target = target_enemy_count(level, removed);
    while objects.enemies.len() < enemy_target {
        objects.enemies.push(claim_free_tile(grid, &mut taken, rng));
    }
    objects.enemies.truncate(enemy_target);

    let poison_target = target_poison_count(level, removed);
    while objects.poisons.len() < poison_target {
        objects.poisons.push(claim_free_tile(grid, &mut taken, rng));
    }
    objects.poisons.truncate(poison_target);
}

fn claim_free_tile(grid: &Grid, taken: &mut TileMask, rng: &mut impl Rng) -> Tile {
    let tile = grid.random_free_tile(taken, rng);
    taken.mark(tile);
    tile
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_grid() -> Grid {
        Grid::new(30, 30, 20)
    }

    fn make_snakes() -> Vec<Snake> {
        vec![Snake::new("Test".to_string(), Tile { x: 0, y: 0 }, 3.0)]
    }

    fn regenerate_at(level: u32, removed: &RemovalCounters, seed: u64) -> WorldObjects {
        let grid = make_grid();
        let snakes = make_snakes();
        let mut objects = WorldObjects::default();
        let mut rng = StdRng::seed_from_u64(seed);
        regenerate(&mut objects, &grid, &snakes, level, removed, &mut rng);
        objects
    }

    #[test]
    fn bomb_spawns_exactly_on_every_twentieth_level() {
        let removed = RemovalCounters::default();
        for seed in 0..4 {
            assert!(regenerate_at(19, &removed, seed).bomb_powerup.is_none());
            assert!(regenerate_at(20, &removed, seed).bomb_powerup.is_some());
            assert!(regenerate_at(21, &removed, seed).bomb_powerup.is_none());
            assert!(regenerate_at(40, &removed, seed).bomb_powerup.is_some());
        }
    }

    #[test]
    fn ammo_spawns_exactly_on_every_tenth_level() {
        let removed = RemovalCounters::default();
        for seed in 0..4 {
            assert!(regenerate_at(10, &removed, seed).ammo_powerup.is_some());
            assert!(regenerate_at(30, &removed, seed).ammo_powerup.is_some());
            assert!(regenerate_at(9, &removed, seed).ammo_powerup.is_none());
            assert!(regenerate_at(25, &removed, seed).ammo_powerup.is_none());
        }
    }

    #[test]
    fn shield_and_ghost_respect_level_parity() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            assert!(!should_spawn_shield(3, &mut rng));
            assert!(!should_spawn_ghost(12, &mut rng));
            // Odd but not past the minimum level.
            assert!(!should_spawn_ghost(9, &mut rng));
        }
    }

    #[test]
    fn apple_is_always_placed_off_the_snake() {
        for seed in 0..16 {
            let objects = regenerate_at(1, &RemovalCounters::default(), seed);
            let apple = objects.apple.expect("apple present");
            let snakes = make_snakes();
            assert!(!snakes[0].body().contains(&apple));
        }
    }

    #[test]
    fn hazard_counts_match_level_targets() {
        let removed = RemovalCounters::default();
        let objects = regenerate_at(7, &removed, 3);
        assert_eq!(objects.enemies.len(), 3);
        assert_eq!(objects.poisons.len(), 6);
        // All placements are distinct tiles.
        let mut all: Vec<Tile> = objects.enemies.iter().chain(objects.poisons.iter()).copied().collect();
        all.sort_by_key(|tile| (tile.x, tile.y));
        all.dedup();
        assert_eq!(all.len(), 9);
    }

    #[test]
    fn removal_counters_suppress_replenishment() {
        let removed = RemovalCounters {
            enemies: 2,
            poisons: 4,
        };
        let objects = regenerate_at(8, &removed, 5);
        assert_eq!(objects.enemies.len(), 2);
        assert_eq!(objects.poisons.len(), 3);

        // Removals beyond the target floor at zero.
        let removed = RemovalCounters {
            enemies: 99,
            poisons: 99,
        };
        let objects = regenerate_at(8, &removed, 5);
        assert!(objects.enemies.is_empty());
        assert!(objects.poisons.is_empty());
    }

    #[test]
    fn shrinking_truncates_most_recent_hazards_first() {
        let grid = make_grid();
        let snakes = make_snakes();
        let mut objects = WorldObjects::default();
        objects.enemies = vec![
            Tile { x: 10, y: 10 },
            Tile { x: 11, y: 10 },
            Tile { x: 12, y: 10 },
        ];
        let removed = RemovalCounters {
            enemies: 1,
            poisons: 99,
        };
        let mut rng = StdRng::seed_from_u64(2);
        // Level 4 targets 2 enemies after one removal.
        regenerate(&mut objects, &grid, &snakes, 4, &removed, &mut rng);
        assert_eq!(
            objects.enemies,
            vec![Tile { x: 10, y: 10 }, Tile { x: 11, y: 10 }]
        );
    }

    #[test]
    fn powerups_are_cleared_on_every_regeneration() {
        let grid = make_grid();
        let snakes = make_snakes();
        let mut objects = WorldObjects::default();
        objects.shield_powerup = Some(Tile { x: 4, y: 4 });
        objects.ghost_powerup = Some(Tile { x: 5, y: 5 });
        let mut rng = StdRng::seed_from_u64(9);
        regenerate(&mut objects, &grid, &snakes, 1, &RemovalCounters::default(), &mut rng);
        assert!(objects.shield_powerup.is_none());
        assert!(objects.ghost_powerup.is_none());
    }

    #[test]
    fn hazards_avoid_the_run_ahead_of_the_snake() {
        // Snake at (0, 0) moving Right: its whole row wraps around and must
        // stay clear of hazards.
        for seed in 0..8 {
            let objects = regenerate_at(9, &RemovalCounters::default(), seed);
            for tile in objects.enemies.iter().chain(objects.poisons.iter()) {
                assert_ne!(tile.y, 0, "hazard in the safe row: {:?}", tile);
            }
        }
    }
}
