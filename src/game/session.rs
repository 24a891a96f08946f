use super::collision;
use super::constants::{BOOST_BONUS_MOVES_PER_SEC, BULLET_TILES_PER_SEC, SPAWN_GHOST_MS};
use super::effects::EffectsSink;
use super::grid::Grid;
use super::input::Intent;
use super::projectile::Projectile;
use super::settings::{Settings, SettingsError};
use super::snake::Snake;
use super::spawner::{self, RemovalCounters, WorldObjects};
use super::types::{GameSnapshot, ScoreRecord, SnakeSnapshot, Tile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    GameOver,
}

/// Owns one full game: the grid, every snake, the object set, in-flight
/// projectiles, and the level progression. Drivers feed it wall-clock deltas
/// through `tick` and per-player intents through `handle_intent`.
pub struct GameSession {
    settings: Settings,
    grid: Grid,
    snakes: Vec<Snake>,
    objects: WorldObjects,
    projectiles: Vec<Projectile>,
    level: u32,
    removed: RemovalCounters,
    state: SessionState,
    rng: StdRng,
    final_scores: Option<Vec<ScoreRecord>>,
}

impl GameSession {
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let grid = Grid::new(settings.tiles_x, settings.tiles_y, settings.tile_px);
        let mut rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let player_count = settings.players.len() as u32;
        let base_speed = settings.base_moves_per_sec;
        let mut snakes: Vec<Snake> = settings
            .players
            .iter()
            .enumerate()
            .map(|(index, name)| {
                // Spawn rows spread evenly down the left edge, everyone
                // heading right.
                let spawn = Tile {
                    x: 0,
                    y: index as u32 * settings.tiles_y / player_count,
                };
                Snake::new(name.clone(), spawn, base_speed)
            })
            .collect();
        if snakes.len() > 1 {
            for snake in &mut snakes {
                snake.set_ghost(SPAWN_GHOST_MS);
            }
        }

        let mut objects = WorldObjects::default();
        let level = super::constants::STARTING_LEVEL;
        let removed = RemovalCounters::default();
        spawner::regenerate(&mut objects, &grid, &snakes, level, &removed, &mut rng);

        tracing::debug!(
            players = snakes.len(),
            tiles_x = settings.tiles_x,
            tiles_y = settings.tiles_y,
            "session created"
        );

        Ok(Self {
            settings,
            grid,
            snakes,
            objects,
            projectiles: Vec::new(),
            level,
            removed,
            state: SessionState::Running,
            rng,
            final_scores: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Present only after the session has ended.
    pub fn score_records(&self) -> Option<&[ScoreRecord]> {
        self.final_scores.as_deref()
    }

    fn moves_per_sec(&self, level: u32) -> f64 {
        self.settings.base_moves_per_sec
            + self.settings.acceleration_per_level * (level - 1) as f64
    }

    /// Applies one player's intent. Returns whether the intent had any
    /// effect, so drivers can fall through alternate inputs.
    pub fn handle_intent(&mut self, player: usize, intent: Intent) -> bool {
        if self.state == SessionState::GameOver || player >= self.snakes.len() {
            return false;
        }

        if let Intent::PauseToggle = intent {
            self.state = match self.state {
                SessionState::Paused => SessionState::Running,
                _ => SessionState::Paused,
            };
            tracing::debug!(paused = self.is_paused(), "pause toggled");
            return true;
        }

        if !self.snakes[player].is_alive() {
            return false;
        }

        // Turns may queue while paused; boost and fire wait for a resume.
        match (intent, self.state) {
            (Intent::Direction(direction), _) => self.snakes[player].set_direction(direction),
            (Intent::BoostStart, SessionState::Running) => {
                self.snakes[player].set_boost(BOOST_BONUS_MOVES_PER_SEC);
                true
            }
            (Intent::BoostStop, SessionState::Running) => {
                self.snakes[player].set_boost(0.0);
                true
            }
            (Intent::Fire, SessionState::Running) => self.fire(player),
            _ => false,
        }
    }

    fn fire(&mut self, player: usize) -> bool {
        let snake = &mut self.snakes[player];
        if !snake.has_bullets() {
            return false;
        }
        let Some(head) = snake.head() else {
            return false;
        };
        snake.use_bullet();
        let direction = snake.last_direction_moved();
        self.projectiles.push(Projectile::new(
            self.grid.tile_to_pixel_center(head),
            direction,
            BULLET_TILES_PER_SEC,
            self.settings.tile_px,
        ));
        tracing::debug!(player, ?direction, "bullet fired");
        true
    }

    /// Advances the simulation by `dt_ms` of wall-clock time. A long delta
    /// is caught up with multiple moves per snake rather than skipped.
    pub fn tick(&mut self, dt_ms: f64, sink: &mut dyn EffectsSink) {
        if self.state != SessionState::Running {
            return;
        }

        let mut any_moved = false;
        for snake in &mut self.snakes {
            if !snake.is_alive() {
                continue;
            }
            snake.move_time(dt_ms);
            while snake.can_move() {
                snake.advance(&self.grid);
                any_moved = true;
            }
        }

        if any_moved {
            let mut level_up = false;
            for index in 0..self.snakes.len() {
                if !self.snakes[index].is_alive() {
                    continue;
                }
                let resolution = collision::resolve_head(
                    index,
                    &mut self.snakes,
                    &mut self.objects,
                    self.level,
                    &mut self.removed,
                    sink,
                );
                level_up |= resolution.level_up;
            }
            if level_up {
                self.advance_level(sink);
            }
        }

        // Step projectiles at most one tile at a time so a fast bullet
        // cannot tunnel through a hazard between two hit checks.
        let ms_per_bullet_tile = 1000.0 / BULLET_TILES_PER_SEC;
        let mut remaining = dt_ms;
        while remaining > 0.0 && !self.projectiles.is_empty() {
            let step = remaining.min(ms_per_bullet_tile);
            remaining -= step;
            for projectile in &mut self.projectiles {
                projectile.advance(step);
            }
            collision::resolve_projectiles(
                &mut self.projectiles,
                &self.grid,
                &mut self.snakes,
                &mut self.objects,
                &mut self.removed,
                sink,
            );
        }

        if self.snakes.iter().all(|snake| !snake.is_alive()) {
            self.finish();
        }
    }

    fn advance_level(&mut self, sink: &mut dyn EffectsSink) {
        self.level += 1;
        sink.on_level_up(self.level);
        let speed = self.moves_per_sec(self.level);
        for snake in &mut self.snakes {
            snake.set_base_speed(speed);
        }
        spawner::regenerate(
            &mut self.objects,
            &self.grid,
            &self.snakes,
            self.level,
            &self.removed,
            &mut self.rng,
        );
        tracing::debug!(level = self.level, moves_per_sec = speed, "level up");
    }

    fn finish(&mut self) {
        self.state = SessionState::GameOver;
        // One timestamp for the whole session, shared by every record.
        let at = current_time_millis();
        let records: Vec<ScoreRecord> = self
            .snakes
            .iter()
            .map(|snake| ScoreRecord {
                name: snake.name().to_string(),
                max_length: snake.max_length_reached(),
                level_reached: self.level,
                at,
            })
            .collect();
        tracing::info!(level = self.level, players = records.len(), "game over");
        self.final_scores = Some(records);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            level: self.level,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            snakes: self
                .snakes
                .iter()
                .map(|snake| SnakeSnapshot {
                    name: snake.name().to_string(),
                    body: snake.body().to_vec(),
                    alive: snake.is_alive(),
                    length: snake.len(),
                    max_length: snake.max_length_reached(),
                    ammo: snake.bullets(),
                    ghost_ms: snake.ghost_ms(),
                    shield_on: snake.is_shield_on(),
                })
                .collect(),
            apple: self.objects.apple,
            shield_powerup: self.objects.shield_powerup,
            ghost_powerup: self.objects.ghost_powerup,
            bomb_powerup: self.objects.bomb_powerup,
            ammo_powerup: self.objects.ammo_powerup,
            enemies: self.objects.enemies.clone(),
            poisons: self.objects.poisons.clone(),
            projectiles: self
                .projectiles
                .iter()
                .map(|projectile| projectile.position())
                .collect(),
        }
    }
}

fn current_time_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
