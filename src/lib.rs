//! Shovel Run - a side-scrolling obstacle dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `clock`: Fixed timestep driver fed by display-refresh timestamps
//! - `game`: Session controller that turns host input into simulation steps
//! - `highscores`: Weekly high score with LocalStorage persistence
//! - `settings`: Persisted mode/language/layout preferences
//! - `i18n`: On-canvas text lookup
//! - `renderer`: Draw list building and the 2D canvas backend
//! - `platform`: Browser/native platform abstraction (input, storage)

pub mod clock;
pub mod error;
pub mod game;
pub mod highscores;
pub mod i18n;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::Game;
pub use highscores::HighScores;
pub use i18n::{Language, TextProvider, Translations};
pub use settings::Settings;
pub use sim::GameMode;

/// Game configuration constants
pub mod consts {
    /// Target duration of one simulation step (60 Hz)
    pub const STEP_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 200.0;
    pub const GROUND_Y: f32 = 180.0;

    /// Player sprite
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 50.0;

    /// Vertical physics (per step)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = 12.8;

    /// Scroll speed
    pub const INITIAL_SPEED: f32 = 5.0;
    pub const SPEED_INCREMENT: f32 = 0.001;

    /// Insane mode horizontal dynamics
    pub const HORIZONTAL_SPEED: f32 = 5.0;
    pub const INITIAL_DRAG: f32 = 0.5;
    pub const DRAG_INCREMENT: f32 = 0.0002;

    /// Fixed hazard (police car) geometry
    pub const HAZARD_WIDTH: f32 = 110.0;
    pub const HAZARD_HEIGHT: f32 = PLAYER_HEIGHT * 2.0;
    /// Hazards sink slightly below the ground line
    pub const HAZARD_GROUND_OFFSET: f32 = 18.0;
    pub const HAZARD_CHANCE: f32 = 0.2;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_BASE_SIZE: f32 = 12.0;
    pub const PROJECTILE_SIZE_PER_POWER: f32 = 8.0;
    pub const SHOOT_COOLDOWN_MS: f64 = 350.0;
    pub const FULL_CHARGE_MS: f64 = 600.0;
    pub const MIN_POWER: f32 = 0.7;
    pub const MAX_POWER: f32 = 2.2;

    /// Frames per score point
    pub const SCORE_DIVISOR: u64 = 5;
}
