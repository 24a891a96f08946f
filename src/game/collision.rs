use super::constants::{AMMO_PER_PICKUP, GHOST_POWERUP_MS};
use super::effects::EffectsSink;
use super::grid::Grid;
use super::projectile::Projectile;
use super::snake::Snake;
use super::spawner::{target_enemy_count, target_poison_count, RemovalCounters, WorldObjects};
use super::types::Tile;

/// What the session must follow up on after resolving one snake's head.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadResolution {
    /// The snake ate the apple: bump the level, recompute cadences, and
    /// regenerate the object set.
    pub level_up: bool,
}

/// Resolves one snake's head tile after it has moved this tick. The primary
/// chain (self, apple, power-ups, other snakes) is first-match-wins; the
/// enemy and poison checks then run in sequence. A death short-circuits
/// everything that remains.
pub fn resolve_head(
    index: usize,
    snakes: &mut [Snake],
    objects: &mut WorldObjects,
    level: u32,
    removed: &mut RemovalCounters,
    sink: &mut dyn EffectsSink,
) -> HeadResolution {
    let mut resolution = HeadResolution::default();
    let Some(head) = snakes[index].head() else {
        return resolution;
    };
    let ghosted = snakes[index].is_ghost_on();

    if !ghosted && snakes[index].tail().contains(&head) {
        kill_snake(index, snakes, sink);
        return resolution;
    } else if objects.apple == Some(head) {
        snakes[index].grow_by_one();
        objects.apple = None;
        resolution.level_up = true;
        sink.on_apple_eaten(index);
    } else if objects.shield_powerup == Some(head) {
        snakes[index].set_shield(true);
        objects.shield_powerup = None;
        sink.on_powerup_collected(index);
    } else if objects.ghost_powerup == Some(head) {
        snakes[index].set_ghost(GHOST_POWERUP_MS);
        objects.ghost_powerup = None;
        sink.on_powerup_collected(index);
    } else if objects.bomb_powerup == Some(head) {
        // Credit the counters with the current targets so the cleared
        // hazards are not replenished by the next regeneration.
        removed.enemies += target_enemy_count(level, removed) as u32;
        removed.poisons += target_poison_count(level, removed) as u32;
        objects.enemies.clear();
        objects.poisons.clear();
        objects.bomb_powerup = None;
        sink.on_powerup_collected(index);
    } else if objects.ammo_powerup == Some(head) {
        snakes[index].add_bullets(AMMO_PER_PICKUP);
        objects.ammo_powerup = None;
        sink.on_powerup_collected(index);
    } else if !ghosted {
        let hit_other = snakes.iter().enumerate().any(|(other_index, other)| {
            other_index != index && other.is_alive() && other.body().contains(&head)
        });
        if hit_other {
            kill_snake(index, snakes, sink);
            return resolution;
        }
    }

    // Hazard checks re-read the ghost flag: a ghost picked up this very
    // tick already protects.
    if !snakes[index].is_ghost_on() {
        if let Some(position) = objects.enemies.iter().position(|tile| *tile == head) {
            objects.enemies.remove(position);
            if snakes[index].is_shield_on() {
                snakes[index].set_shield(false);
                sink.on_shield_broken(index);
            } else {
                kill_snake(index, snakes, sink);
                return resolution;
            }
        }
    }

    if !snakes[index].is_ghost_on() {
        if let Some(position) = objects.poisons.iter().position(|tile| *tile == head) {
            objects.poisons.remove(position);
            if snakes[index].is_shield_on() {
                snakes[index].set_shield(false);
                sink.on_shield_broken(index);
            } else {
                snakes[index].shrink(1);
                if snakes[index].is_empty() {
                    kill_snake(index, snakes, sink);
                    return resolution;
                }
                sink.on_poison_hit(index);
            }
        }
    }

    resolution
}

/// Resolves projectiles against hazards and snake bodies. Out-of-bounds
/// projectiles are culled before hit testing; any hit consumes the
/// projectile. Head tiles are immune, which also keeps a freshly fired
/// bullet from striking its shooter.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    grid: &Grid,
    snakes: &mut [Snake],
    objects: &mut WorldObjects,
    removed: &mut RemovalCounters,
    sink: &mut dyn EffectsSink,
) {
    projectiles.retain(|projectile| grid.pixel_in_bounds(projectile.position()));

    let mut index = 0;
    while index < projectiles.len() {
        let tile = grid
            .pixel_to_tile(projectiles[index].position())
            .expect("in-bounds projectile maps to a tile");
        if bullet_hit(tile, snakes, objects, removed, sink) {
            projectiles.remove(index);
        } else {
            index += 1;
        }
    }
}

fn bullet_hit(
    tile: Tile,
    snakes: &mut [Snake],
    objects: &mut WorldObjects,
    removed: &mut RemovalCounters,
    sink: &mut dyn EffectsSink,
) -> bool {
    if let Some(position) = objects.enemies.iter().position(|enemy| *enemy == tile) {
        objects.enemies.remove(position);
        removed.enemies += 1;
        sink.on_bullet_hit_hazard();
        return true;
    }
    if let Some(position) = objects.poisons.iter().position(|poison| *poison == tile) {
        objects.poisons.remove(position);
        removed.poisons += 1;
        sink.on_bullet_hit_hazard();
        return true;
    }

    for (index, snake) in snakes.iter_mut().enumerate() {
        if !snake.is_alive() {
            continue;
        }
        if snake.tail().contains(&tile) {
            if snake.is_shield_on() {
                snake.set_shield(false);
                sink.on_shield_broken(index);
            } else {
                snake.shrink(1);
                sink.on_bullet_hit_snake(index);
            }
            return true;
        }
    }

    false
}

fn kill_snake(index: usize, snakes: &mut [Snake], sink: &mut dyn EffectsSink) {
    snakes[index].kill();
    tracing::debug!(snake = index, "snake died");
    sink.on_snake_died(index);
}
