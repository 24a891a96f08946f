mod game;

use anyhow::Context;
use game::constants::TICK_MS;
use game::effects::NoopEffects;
use game::input::Intent;
use game::session::GameSession;
use game::settings::Settings;
use game::types::{Direction, GameSnapshot, Tile};
use tracing_subscriber::EnvFilter;

/// Headless demo driver: greedy apple-seeking players on a fixed tick, with
/// the final score records dumped as JSON. PLAYERS, SEED and MAX_TICKS come
/// from the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let player_count: usize = match std::env::var("PLAYERS") {
        Ok(value) => value.parse().context("PLAYERS must be a number")?,
        Err(_) => 1,
    };
    let rng_seed = match std::env::var("SEED") {
        Ok(value) => Some(value.parse().context("SEED must be a number")?),
        Err(_) => None,
    };
    let max_ticks: u64 = match std::env::var("MAX_TICKS") {
        Ok(value) => value.parse().context("MAX_TICKS must be a number")?,
        Err(_) => 20_000,
    };

    let settings = Settings {
        players: (1..=player_count)
            .map(|index| format!("Player-{index}"))
            .collect(),
        rng_seed,
        ..Settings::default()
    };
    let tiles_x = settings.tiles_x;
    let tiles_y = settings.tiles_y;
    let mut session = GameSession::new(settings)?;
    let mut sink = NoopEffects;

    let mut interval = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
    for _ in 0..max_ticks {
        interval.tick().await;
        let snapshot = session.snapshot();
        steer_players(&mut session, &snapshot, tiles_x, tiles_y);
        // Feed the nominal tick length rather than measured elapsed time so
        // seeded runs replay identically.
        session.tick(TICK_MS as f64, &mut sink);
        if session.is_game_over() {
            break;
        }
    }

    match session.score_records() {
        Some(records) => println!("{}", serde_json::to_string_pretty(records)?),
        None => tracing::info!(
            level = session.level(),
            "tick budget exhausted before game over"
        ),
    }
    Ok(())
}

fn steer_players(session: &mut GameSession, snapshot: &GameSnapshot, tiles_x: u32, tiles_y: u32) {
    let Some(apple) = snapshot.apple else {
        return;
    };
    for (index, snake) in snapshot.snakes.iter().enumerate() {
        if !snake.alive {
            continue;
        }
        let Some(head) = snake.body.first() else {
            continue;
        };
        for direction in greedy_directions(*head, apple, tiles_x, tiles_y) {
            if session.handle_intent(index, Intent::Direction(direction)) {
                break;
            }
        }
    }
}

/// Candidate turns that shorten the wrapped distance to the apple, dominant
/// axis first. Both may be rejected (already heading there, or a reversal);
/// the snake then just keeps going.
fn greedy_directions(head: Tile, apple: Tile, tiles_x: u32, tiles_y: u32) -> Vec<Direction> {
    let dx = toroidal_delta(head.x, apple.x, tiles_x);
    let dy = toroidal_delta(head.y, apple.y, tiles_y);
    let horizontal = if dx > 0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let vertical = if dy > 0 { Direction::Down } else { Direction::Up };

    let mut candidates = Vec::new();
    if dx.abs() >= dy.abs() {
        if dx != 0 {
            candidates.push(horizontal);
        }
        if dy != 0 {
            candidates.push(vertical);
        }
    } else {
        candidates.push(vertical);
        if dx != 0 {
            candidates.push(horizontal);
        }
    }
    candidates
}

/// Signed steps from `from` to `to` on a wrapped axis, whichever way is
/// shorter. Positive means the increasing direction.
fn toroidal_delta(from: u32, to: u32, size: u32) -> i64 {
    let forward = ((to + size - from) % size) as i64;
    if forward * 2 <= size as i64 {
        forward
    } else {
        forward - size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toroidal_delta_picks_the_short_way_around() {
        assert_eq!(toroidal_delta(5, 8, 30), 3);
        assert_eq!(toroidal_delta(8, 5, 30), -3);
        assert_eq!(toroidal_delta(28, 2, 30), 4);
        assert_eq!(toroidal_delta(2, 28, 30), -4);
        assert_eq!(toroidal_delta(7, 7, 30), 0);
    }

    #[test]
    fn greedy_directions_prefer_the_dominant_axis() {
        let head = Tile { x: 0, y: 0 };
        let apple = Tile { x: 6, y: 2 };
        assert_eq!(
            greedy_directions(head, apple, 30, 30),
            vec![Direction::Right, Direction::Down]
        );

        let apple = Tile { x: 1, y: 25 };
        assert_eq!(
            greedy_directions(head, apple, 30, 30),
            vec![Direction::Up, Direction::Right]
        );
    }

    #[test]
    fn aligned_axes_yield_no_pointless_turns() {
        let head = Tile { x: 4, y: 9 };
        let apple = Tile { x: 20, y: 9 };
        assert_eq!(greedy_directions(head, apple, 30, 30), vec![Direction::Right]);
        assert!(greedy_directions(head, head, 30, 30).is_empty());
    }
}
