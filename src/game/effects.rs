/// Narrow capability interface the simulation calls when something audible
/// or otherwise presentation-worthy happens. Collaborators (sound, particle
/// effects, haptics) implement the handlers they care about; the engine
/// never knows what is behind them.
pub trait EffectsSink {
    fn on_apple_eaten(&mut self, _snake: usize) {}
    fn on_level_up(&mut self, _level: u32) {}
    fn on_powerup_collected(&mut self, _snake: usize) {}
    fn on_shield_broken(&mut self, _snake: usize) {}
    fn on_poison_hit(&mut self, _snake: usize) {}
    fn on_snake_died(&mut self, _snake: usize) {}
    fn on_bullet_hit_hazard(&mut self) {}
    fn on_bullet_hit_snake(&mut self, _snake: usize) {}
}

/// Sink for headless runs and tests that do not observe effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffects;

impl EffectsSink for NoopEffects {}
