use super::types::Direction;

/// Discrete input intents. The session tags each with the originating
/// player index; pause is session-wide regardless of who pressed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Direction(Direction),
    PauseToggle,
    BoostStart,
    BoostStop,
    Fire,
}
