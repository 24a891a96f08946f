pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_LENGTH: usize = 3;

/// Tiles marked taken in front of each snake's head during regeneration.
/// Deliberately larger than any grid axis so the whole wrapped row/column
/// ahead stays clear of hazards right after a level transition.
pub const SAFE_ZONE_TILES: usize = 999;

pub const GHOST_POWERUP_MS: f64 = 10_000.0;
/// Spawn protection for multiplayer sessions, long enough for stacked
/// starting bodies to unstack at the base cadence.
pub const SPAWN_GHOST_MS: f64 = 3_000.0;

pub const BOOST_BONUS_MOVES_PER_SEC: f64 = 6.0;

pub const BULLET_TILES_PER_SEC: f64 = 30.0;
pub const AMMO_PER_PICKUP: u32 = 5;

pub const SHIELD_SPAWN_CHANCE: f64 = 0.5;
pub const GHOST_SPAWN_CHANCE: f64 = 0.5;
pub const GHOST_SPAWN_MIN_LEVEL: u32 = 10;
pub const BOMB_LEVEL_INTERVAL: u32 = 20;
pub const AMMO_LEVEL_INTERVAL: u32 = 10;

/// Hazards carry over between levels; power-ups never do.
pub const CLEAR_HAZARDS_EVERY_LEVEL: bool = false;

pub const MAX_PLAYERS: usize = 4;
pub const MIN_GRID_TILES: u32 = 8;

pub const TICK_MS: u64 = 50;
