use serde::Serialize;

/// One discrete cell of the toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
}

/// Continuous sub-tile position, used by projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SnakeSnapshot {
    pub name: String,
    pub body: Vec<Tile>,
    pub alive: bool,
    pub length: usize,
    pub max_length: usize,
    pub ammo: u32,
    pub ghost_ms: f64,
    pub shield_on: bool,
}

/// Read-only view of the whole session, rebuilt per query. Rendering
/// collaborators consume this; nothing here can mutate the session.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub snakes: Vec<SnakeSnapshot>,
    pub apple: Option<Tile>,
    pub shield_powerup: Option<Tile>,
    pub ghost_powerup: Option<Tile>,
    pub bomb_powerup: Option<Tile>,
    pub ammo_powerup: Option<Tile>,
    pub enemies: Vec<Tile>,
    pub poisons: Vec<Tile>,
    pub projectiles: Vec<PixelPos>,
}

/// Final per-snake record handed to the scoring collaborator. `at` is
/// assigned once when the session ends and is identical across all records
/// from that session.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    pub name: String,
    pub max_length: usize,
    pub level_reached: u32,
    pub at: i64,
}

impl ScoreRecord {
    pub fn score(&self) -> i64 {
        self.max_length as i64 + self.level_reached as i64
    }
}
