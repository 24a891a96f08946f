use super::types::{Direction, PixelPos};

/// Straight-line sub-tile integrator. Position advances in whole pixels,
/// with the fractional time remainder carried across calls so long sessions
/// never drift.
#[derive(Debug, Clone)]
pub struct Projectile {
    pos: PixelPos,
    direction: Direction,
    ms_per_pixel: f64,
    time_ms: f64,
}

impl Projectile {
    pub fn new(pos: PixelPos, direction: Direction, tiles_per_sec: f64, tile_px: u32) -> Self {
        let pixels_per_ms = tiles_per_sec / 1000.0 * tile_px as f64;
        Self {
            pos,
            direction,
            ms_per_pixel: 1.0 / pixels_per_ms,
            time_ms: 0.0,
        }
    }

    pub fn position(&self) -> PixelPos {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.time_ms += dt_ms;

        let mut pixels = 0i64;
        while self.time_ms > self.ms_per_pixel {
            self.time_ms -= self.ms_per_pixel;
            pixels += 1;
        }
        if pixels == 0 {
            return;
        }

        match self.direction {
            Direction::Up => self.pos.y -= pixels,
            Direction::Down => self.pos.y += pixels,
            Direction::Left => self.pos.x -= pixels,
            Direction::Right => self.pos.x += pixels,
        }
    }
}
