pub mod collision;
pub mod constants;
pub mod effects;
pub mod grid;
pub mod input;
pub mod projectile;
pub mod session;
pub mod settings;
pub mod snake;
pub mod spawner;
pub mod types;
