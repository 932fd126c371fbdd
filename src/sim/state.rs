//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; the high score record is
//! the only thing that outlives it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which rule set is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Jump only, every obstacle sits on the ground
    #[default]
    Basic,
    /// Drag, lateral movement, floating obstacles, hazards and projectiles
    Advanced,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Basic => "classic",
            GameMode::Advanced => "insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "basic" => Some(GameMode::Basic),
            "insane" | "advanced" => Some(GameMode::Advanced),
            _ => None,
        }
    }
}

/// Mode-dependent tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTuning {
    pub initial_speed: f32,
    pub speed_increment: f32,
    /// Frames between spawn checks at speed 5
    pub base_spawn_frequency: f32,
    /// A spawn roll must exceed this to place an obstacle
    pub spawn_threshold: f32,
    /// Minimum time after game over before input restarts the run
    pub restart_cooldown_ms: f64,
    pub drag_enabled: bool,
    pub projectiles_enabled: bool,
}

impl ModeTuning {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Basic => Self {
                initial_speed: INITIAL_SPEED,
                speed_increment: SPEED_INCREMENT,
                base_spawn_frequency: 100.0,
                spawn_threshold: 0.5,
                restart_cooldown_ms: 0.0,
                drag_enabled: false,
                projectiles_enabled: false,
            },
            GameMode::Advanced => Self {
                initial_speed: INITIAL_SPEED * 1.5,
                speed_increment: SPEED_INCREMENT * 2.0,
                base_spawn_frequency: 60.0,
                spawn_threshold: 0.3,
                restart_cooldown_ms: 1000.0,
                drag_enabled: true,
                projectiles_enabled: true,
            },
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// Player hitbox overlapped an obstacle hitbox
    Collision,
    /// Drag pushed the player completely off the left edge
    PushedOffscreen,
}

/// Notable things that happened during a tick, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { invincible: bool },
    ObstacleDestroyed,
    ProjectileHit { absorbed: bool },
    GameOver { cause: LossCause, score: u64, new_record: bool },
}

/// The player's sprite
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub jumping: bool,
    /// Leftward drag applied on the last step
    pub drag: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT),
            vy: 0.0,
            jumping: false,
            drag: 0.0,
        }
    }
}

impl Player {
    /// Top edge when standing on the ground
    #[inline]
    pub fn ground_top() -> f32 {
        GROUND_Y - PLAYER_HEIGHT
    }

    pub fn is_grounded(&self) -> bool {
        self.pos.y >= Self::ground_top()
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    /// Fixed top edge; `None` sits the obstacle on the ground
    pub y: Option<f32>,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    /// Fixed-size hazard that projectiles cannot damage
    pub invincible: bool,
}

impl Obstacle {
    /// Ground-aligned destructible obstacle
    pub fn grounded(x: f32, width: f32, height: f32, health: f32) -> Self {
        Self {
            x,
            y: None,
            width,
            height,
            health,
            max_health: health,
            invincible: false,
        }
    }

    /// Fixed hazard near the ground with unbounded health
    pub fn hazard(x: f32) -> Self {
        Self {
            x,
            y: Some(GROUND_Y - HAZARD_HEIGHT + HAZARD_GROUND_OFFSET),
            width: HAZARD_WIDTH,
            height: HAZARD_HEIGHT,
            health: f32::INFINITY,
            max_health: f32::INFINITY,
            invincible: true,
        }
    }

    /// Effective top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.y.unwrap_or(GROUND_Y - self.height)
    }

    /// Remaining health as a 0-1 fraction (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.invincible || self.max_health <= 0.0 {
            1.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    /// Apply projectile damage; invincible obstacles absorb it
    pub fn take_damage(&mut self, amount: f32) {
        if !self.invincible {
            self.health -= amount.max(0.0);
        }
    }

    /// Still on screen and not destroyed
    pub fn is_alive(&self) -> bool {
        self.x + self.width > 0.0 && self.health > 0.0
    }
}

/// A charged shot travelling right
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    /// Damage and size multiplier
    pub power: f32,
}

impl Projectile {
    /// Side length of the square projectile
    #[inline]
    pub fn size(&self) -> f32 {
        PROJECTILE_BASE_SIZE + PROJECTILE_SIZE_PER_POWER * self.power
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub phase: GamePhase,
    /// Simulation steps since the run started
    pub frame: u64,
    pub score: u64,
    pub speed: f32,
    /// Wall-clock time (ms) the last run ended
    pub game_over_at: f64,
    /// Set when the last run beat the stored high score
    pub new_record: bool,
    /// Best score the current run competes against
    pub high_score: u64,
    /// Wall-clock time (ms) of the last accepted shot
    pub last_shot_at: f64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(mode: GameMode, seed: u64, high_score: u64) -> Self {
        Self {
            mode,
            phase: GamePhase::Idle,
            frame: 0,
            score: 0,
            speed: ModeTuning::for_mode(mode).initial_speed,
            game_over_at: 0.0,
            new_record: false,
            high_score,
            last_shot_at: f64::NEG_INFINITY,
            player: Player::default(),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn tuning(&self) -> ModeTuning {
        ModeTuning::for_mode(self.mode)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Begin a fresh run, keeping mode, RNG stream and high score
    pub fn start(&mut self) {
        self.phase = GamePhase::Running;
        self.frame = 0;
        self.score = 0;
        self.speed = self.tuning().initial_speed;
        self.new_record = false;
        self.player = Player::default();
        self.obstacles.clear();
        self.projectiles.clear();
    }

    /// Return to the idle screen without starting a run
    pub fn reset_to_idle(&mut self) {
        self.start();
        self.phase = GamePhase::Idle;
    }

    /// End the run. Only the first loss of a run has any effect.
    pub fn end_game(&mut self, cause: LossCause, now_ms: f64) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_at = now_ms;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_record = true;
        }
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
            new_record: self.new_record,
        });
    }

    /// Whether a start input is allowed to restart right now
    pub fn can_restart(&self, now_ms: f64) -> bool {
        match self.phase {
            GamePhase::Idle => true,
            GamePhase::GameOver => now_ms - self.game_over_at >= self.tuning().restart_cooldown_ms,
            GamePhase::Running => false,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
