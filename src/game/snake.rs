use super::constants::STARTING_LENGTH;
use super::grid::Grid;
use super::types::{Direction, Tile};

/// One player's snake: head-first body, direction state machine, movement
/// cadence, and timed status effects.
#[derive(Debug, Clone)]
pub struct Snake {
    name: String,
    body: Vec<Tile>,
    direction: Direction,
    last_direction_moved: Direction,
    base_moves_per_sec: f64,
    boost_moves_per_sec: f64,
    idle_ms: f64,
    shield_on: bool,
    ghost_ms: f64,
    bullets: u32,
    max_length_reached: usize,
    alive: bool,
}

impl Snake {
    pub fn new(name: String, spawn: Tile, base_moves_per_sec: f64) -> Self {
        Self {
            name,
            body: vec![spawn; STARTING_LENGTH],
            direction: Direction::Right,
            last_direction_moved: Direction::Right,
            base_moves_per_sec,
            boost_moves_per_sec: 0.0,
            idle_ms: 0.0,
            shield_on: false,
            ghost_ms: 0.0,
            bullets: 0,
            max_length_reached: STARTING_LENGTH,
            alive: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A zero-length snake has no head; it is conceptually dead.
    pub fn head(&self) -> Option<Tile> {
        self.body.first().copied()
    }

    pub fn body(&self) -> &[Tile] {
        &self.body
    }

    /// Everything behind the head.
    pub fn tail(&self) -> &[Tile] {
        if self.body.len() > 1 {
            &self.body[1..]
        } else {
            &[]
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn max_length_reached(&self) -> usize {
        self.max_length_reached
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_direction_moved(&self) -> Direction {
        self.last_direction_moved
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the snake dead. The body stays readable for a final frame but
    /// receives no further movement.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_ghost_on(&self) -> bool {
        self.ghost_ms > 0.0
    }

    pub fn ghost_ms(&self) -> f64 {
        self.ghost_ms
    }

    pub fn is_shield_on(&self) -> bool {
        self.shield_on
    }

    pub fn set_shield(&mut self, on: bool) {
        self.shield_on = on;
    }

    /// Overwrites the ghost timer; pickups do not stack.
    pub fn set_ghost(&mut self, ghost_ms: f64) {
        self.ghost_ms = ghost_ms;
    }

    pub fn bullets(&self) -> u32 {
        self.bullets
    }

    pub fn has_bullets(&self) -> bool {
        self.bullets > 0
    }

    pub fn add_bullets(&mut self, count: u32) {
        self.bullets += count;
    }

    /// Precondition: `has_bullets()`. Firing with zero ammo is a caller bug.
    pub fn use_bullet(&mut self) {
        assert!(self.bullets > 0, "use_bullet called with no ammo");
        self.bullets -= 1;
    }

    pub fn set_base_speed(&mut self, moves_per_sec: f64) {
        self.base_moves_per_sec = moves_per_sec;
    }

    pub fn set_boost(&mut self, moves_per_sec: f64) {
        self.boost_moves_per_sec = moves_per_sec;
    }

    /// Queues a turn, checked against the last direction actually moved so a
    /// U-turn cannot be smuggled in with two key presses inside one move
    /// interval. Same-direction input is a rejected no-op.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.last_direction_moved
            || new_direction == self.last_direction_moved.opposite()
        {
            return false;
        }
        self.direction = new_direction;
        true
    }

    pub fn ms_per_move(&self) -> f64 {
        1000.0 / (self.base_moves_per_sec + self.boost_moves_per_sec)
    }

    /// Accumulates idle time and counts the ghost timer down, floored at 0.
    pub fn move_time(&mut self, dt_ms: f64) {
        self.idle_ms += dt_ms;
        if self.ghost_ms > 0.0 {
            self.ghost_ms = (self.ghost_ms - dt_ms).max(0.0);
        }
    }

    pub fn can_move(&self) -> bool {
        self.idle_ms >= self.ms_per_move()
    }

    /// Executes one queued move: consumes one interval of idle time, wraps
    /// the head forward, drops the tail tip. Length is preserved.
    pub fn advance(&mut self, grid: &Grid) {
        self.idle_ms -= self.ms_per_move();
        let Some(head) = self.head() else {
            return;
        };
        let new_head = grid.next_tile(head, self.direction);
        self.body.insert(0, new_head);
        self.body.pop();
        self.last_direction_moved = self.direction;
    }

    /// Duplicates the tail tip, extending length by one.
    pub fn grow_by_one(&mut self) {
        let Some(tip) = self.body.last().copied() else {
            return;
        };
        self.body.push(tip);
        if self.body.len() > self.max_length_reached {
            self.max_length_reached = self.body.len();
        }
    }

    /// Truncates the tail by `count` segments, stopping at length 0. The
    /// caller owns the follow-up death check.
    pub fn shrink(&mut self, count: usize) {
        let new_len = self.body.len().saturating_sub(count);
        self.body.truncate(new_len);
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: Vec<Tile>) {
        self.max_length_reached = self.max_length_reached.max(body.len());
        self.body = body;
    }
}
