use super::constants::{MAX_PLAYERS, MIN_GRID_TILES};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("grid {x}x{y} is too small, both sides must be at least {MIN_GRID_TILES} tiles")]
    GridTooSmall { x: u32, y: u32 },
    #[error("tile size must be at least one pixel")]
    ZeroTileSize,
    #[error("base speed must be positive, got {0}")]
    NonPositiveSpeed(f64),
    #[error("per-level acceleration must not be negative, got {0}")]
    NegativeAcceleration(f64),
    #[error("player count {count} is outside 1..={MAX_PLAYERS}")]
    BadPlayerCount { count: usize },
}

/// Session parameters, validated once up front so the simulation itself can
/// assume a sane world.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub tile_px: u32,
    pub base_moves_per_sec: f64,
    pub acceleration_per_level: f64,
    pub players: Vec<String>,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tiles_x: 30,
            tiles_y: 30,
            tile_px: 20,
            base_moves_per_sec: 3.0,
            acceleration_per_level: 0.2,
            players: vec!["Player-1".to_string()],
            rng_seed: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tiles_x < MIN_GRID_TILES || self.tiles_y < MIN_GRID_TILES {
            return Err(SettingsError::GridTooSmall {
                x: self.tiles_x,
                y: self.tiles_y,
            });
        }
        if self.tile_px == 0 {
            return Err(SettingsError::ZeroTileSize);
        }
        if self.base_moves_per_sec <= 0.0 {
            return Err(SettingsError::NonPositiveSpeed(self.base_moves_per_sec));
        }
        if self.acceleration_per_level < 0.0 {
            return Err(SettingsError::NegativeAcceleration(
                self.acceleration_per_level,
            ));
        }
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(SettingsError::BadPlayerCount {
                count: self.players.len(),
            });
        }
        Ok(())
    }
}
