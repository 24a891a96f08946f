use super::types::{Direction, PixelPos, Tile};
use rand::Rng;

/// Toroidal tile grid plus the pixel-space bridge used by projectiles.
#[derive(Debug, Clone)]
pub struct Grid {
    tiles_x: u32,
    tiles_y: u32,
    tile_px: u32,
}

impl Grid {
    pub fn new(tiles_x: u32, tiles_y: u32, tile_px: u32) -> Self {
        Self {
            tiles_x,
            tiles_y,
            tile_px,
        }
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    pub fn next_tile(&self, tile: Tile, direction: Direction) -> Tile {
        match direction {
            Direction::Up => Tile {
                x: tile.x,
                y: (tile.y + self.tiles_y - 1) % self.tiles_y,
            },
            Direction::Down => Tile {
                x: tile.x,
                y: (tile.y + 1) % self.tiles_y,
            },
            Direction::Left => Tile {
                x: (tile.x + self.tiles_x - 1) % self.tiles_x,
                y: tile.y,
            },
            Direction::Right => Tile {
                x: (tile.x + 1) % self.tiles_x,
                y: tile.y,
            },
        }
    }

    pub fn random_tile(&self, rng: &mut impl Rng) -> Tile {
        Tile {
            x: rng.gen_range(0..self.tiles_x),
            y: rng.gen_range(0..self.tiles_y),
        }
    }

    /// Uniform rejection sampling over free cells. The caller guarantees the
    /// mask has at least one free tile; a saturated mask would never return.
    pub fn random_free_tile(&self, taken: &TileMask, rng: &mut impl Rng) -> Tile {
        loop {
            let tile = self.random_tile(rng);
            if !taken.is_taken(tile) {
                return tile;
            }
        }
    }

    pub fn tile_mask(&self) -> TileMask {
        TileMask::new(self.tiles_x, self.tiles_y)
    }

    pub fn tile_to_pixel_center(&self, tile: Tile) -> PixelPos {
        let half = self.tile_px / 2;
        PixelPos {
            x: (tile.x * self.tile_px + half) as i64,
            y: (tile.y * self.tile_px + half) as i64,
        }
    }

    pub fn pixel_to_tile(&self, pos: PixelPos) -> Option<Tile> {
        if !self.pixel_in_bounds(pos) {
            return None;
        }
        Some(Tile {
            x: (pos.x / self.tile_px as i64) as u32,
            y: (pos.y / self.tile_px as i64) as u32,
        })
    }

    pub fn pixel_in_bounds(&self, pos: PixelPos) -> bool {
        let width = (self.tiles_x * self.tile_px) as i64;
        let height = (self.tiles_y * self.tile_px) as i64;
        pos.x >= 0 && pos.x < width && pos.y >= 0 && pos.y < height
    }
}

/// Occupancy mask over the grid, owned and mutated by spawning callers.
#[derive(Debug, Clone)]
pub struct TileMask {
    tiles_x: u32,
    taken: Vec<bool>,
}

impl TileMask {
    fn new(tiles_x: u32, tiles_y: u32) -> Self {
        Self {
            tiles_x,
            taken: vec![false; (tiles_x * tiles_y) as usize],
        }
    }

    fn index(&self, tile: Tile) -> usize {
        (tile.y * self.tiles_x + tile.x) as usize
    }

    pub fn mark(&mut self, tile: Tile) {
        let index = self.index(tile);
        self.taken[index] = true;
    }

    pub fn is_taken(&self, tile: Tile) -> bool {
        self.taken[self.index(tile)]
    }

    pub fn free_count(&self) -> usize {
        self.taken.iter().filter(|taken| !**taken).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_grid() -> Grid {
        Grid::new(30, 30, 20)
    }

    #[test]
    fn next_tile_wraps_on_every_edge() {
        let grid = make_grid();
        assert_eq!(
            grid.next_tile(Tile { x: 29, y: 5 }, Direction::Right),
            Tile { x: 0, y: 5 }
        );
        assert_eq!(
            grid.next_tile(Tile { x: 0, y: 5 }, Direction::Left),
            Tile { x: 29, y: 5 }
        );
        assert_eq!(
            grid.next_tile(Tile { x: 7, y: 0 }, Direction::Up),
            Tile { x: 7, y: 29 }
        );
        assert_eq!(
            grid.next_tile(Tile { x: 7, y: 29 }, Direction::Down),
            Tile { x: 7, y: 0 }
        );
    }

    #[test]
    fn next_tile_moves_one_step_inside_the_grid() {
        let grid = make_grid();
        let tile = Tile { x: 10, y: 10 };
        assert_eq!(grid.next_tile(tile, Direction::Up), Tile { x: 10, y: 9 });
        assert_eq!(grid.next_tile(tile, Direction::Down), Tile { x: 10, y: 11 });
        assert_eq!(grid.next_tile(tile, Direction::Left), Tile { x: 9, y: 10 });
        assert_eq!(grid.next_tile(tile, Direction::Right), Tile { x: 11, y: 10 });
    }

    #[test]
    fn random_free_tile_never_lands_on_taken_cells() {
        let grid = Grid::new(4, 4, 20);
        let mut taken = grid.tile_mask();
        // Leave a single free tile.
        for x in 0..4 {
            for y in 0..4 {
                if (x, y) != (2, 3) {
                    taken.mark(Tile { x, y });
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(grid.random_free_tile(&taken, &mut rng), Tile { x: 2, y: 3 });
        }
    }

    #[test]
    fn pixel_and_tile_conversions_round_trip() {
        let grid = make_grid();
        let tile = Tile { x: 3, y: 17 };
        let center = grid.tile_to_pixel_center(tile);
        assert_eq!(center, PixelPos { x: 70, y: 350 });
        assert_eq!(grid.pixel_to_tile(center), Some(tile));
    }

    #[test]
    fn out_of_bounds_pixels_have_no_tile() {
        let grid = make_grid();
        assert_eq!(grid.pixel_to_tile(PixelPos { x: -1, y: 5 }), None);
        assert_eq!(grid.pixel_to_tile(PixelPos { x: 5, y: 600 }), None);
        assert!(!grid.pixel_in_bounds(PixelPos { x: 600, y: 0 }));
        assert!(grid.pixel_in_bounds(PixelPos { x: 599, y: 599 }));
    }

    #[test]
    fn mask_tracks_marked_tiles() {
        let grid = Grid::new(5, 5, 20);
        let mut taken = grid.tile_mask();
        assert_eq!(taken.free_count(), 25);
        taken.mark(Tile { x: 1, y: 2 });
        taken.mark(Tile { x: 1, y: 2 });
        assert!(taken.is_taken(Tile { x: 1, y: 2 }));
        assert!(!taken.is_taken(Tile { x: 2, y: 1 }));
        assert_eq!(taken.free_count(), 24);
    }
}
