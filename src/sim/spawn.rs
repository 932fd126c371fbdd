//! Procedural obstacle generation and projectile firing

use rand::Rng;

use super::state::{GameEvent, GameMode, GameState, ModeTuning, Obstacle, Projectile};
use crate::consts::*;

/// Obstacle size families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleBand {
    ThinTall,
    WideShort,
    Big,
    Small,
}

impl ObstacleBand {
    /// Map a uniform roll in [0, 1) onto a band (equal quarters)
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.25 {
            ObstacleBand::ThinTall
        } else if roll < 0.5 {
            ObstacleBand::WideShort
        } else if roll < 0.75 {
            ObstacleBand::Big
        } else {
            ObstacleBand::Small
        }
    }

    /// (min, span) for width and height
    fn ranges(&self) -> ((f32, f32), (f32, f32)) {
        match self {
            ObstacleBand::ThinTall => ((15.0, 10.0), (40.0, 20.0)),
            ObstacleBand::WideShort => ((40.0, 30.0), (20.0, 15.0)),
            ObstacleBand::Big => ((40.0, 20.0), (40.0, 20.0)),
            ObstacleBand::Small => ((20.0, 10.0), (20.0, 10.0)),
        }
    }
}

/// Frames between spawn checks at the current speed, never below 1
pub fn spawn_interval(mode: GameMode, speed: f32) -> u64 {
    let base = ModeTuning::for_mode(mode).base_spawn_frequency;
    let interval = (base / (speed / INITIAL_SPEED)).floor();
    if interval.is_finite() && interval >= 1.0 {
        interval as u64
    } else {
        1
    }
}

/// Roll a new obstacle at the right edge, or `None` if the spawn check fails
pub fn roll_obstacle<R: Rng>(rng: &mut R, mode: GameMode) -> Option<Obstacle> {
    let tuning = ModeTuning::for_mode(mode);
    if rng.random::<f32>() <= tuning.spawn_threshold {
        return None;
    }

    let band = ObstacleBand::from_roll(rng.random::<f32>());
    let ((w_min, w_span), (h_min, h_span)) = band.ranges();
    let width = w_min + rng.random::<f32>() * w_span;
    let height = h_min + rng.random::<f32>() * h_span;

    if mode == GameMode::Basic {
        return Some(Obstacle::grounded(CANVAS_WIDTH, width, height, 1.0));
    }

    let health = rng.random_range(1..=3) as f32;
    if rng.random::<f32>() < HAZARD_CHANCE {
        return Some(Obstacle::hazard(CANVAS_WIDTH));
    }

    // Floating placement allows passing underneath
    let top = rng.random::<f32>() * (GROUND_Y - height);
    Some(Obstacle {
        x: CANVAS_WIDTH,
        y: Some(top),
        width,
        height,
        health,
        max_health: health,
        invincible: false,
    })
}

/// Run the spawn check for the current frame
pub fn maybe_spawn(state: &mut GameState) {
    let interval = spawn_interval(state.mode, state.speed);
    if state.frame % interval != 0 {
        return;
    }
    if let Some(obstacle) = roll_obstacle(&mut state.rng, state.mode) {
        log::debug!(
            "Spawned {}x{} obstacle at frame {} (invincible: {})",
            obstacle.width,
            obstacle.height,
            state.frame,
            obstacle.invincible
        );
        state.events.push(GameEvent::ObstacleSpawned {
            invincible: obstacle.invincible,
        });
        state.obstacles.push(obstacle);
    }
}

/// Power for a charge held `duration_ms`, clamped to [0.7, 2.2]
pub fn charge_power(duration_ms: f64) -> f32 {
    let power = MIN_POWER + (duration_ms.max(0.0) / FULL_CHARGE_MS) as f32;
    power.min(MAX_POWER)
}

/// Fire a projectile from the player's leading edge.
///
/// Rejected outside a live insane-mode run or within the shot cooldown.
pub fn fire_projectile(state: &mut GameState, power: f32, now_ms: f64) -> bool {
    if !state.tuning().projectiles_enabled || !state.is_running() {
        return false;
    }
    if now_ms - state.last_shot_at <= SHOOT_COOLDOWN_MS {
        return false;
    }

    let player = &state.player;
    let pos = glam::Vec2::new(
        player.pos.x + PLAYER_WIDTH,
        player.pos.y + PLAYER_HEIGHT / 2.0 - 10.0 * power,
    );
    state.projectiles.push(Projectile { pos, power });
    state.last_shot_at = now_ms;
    true
}

/// Move projectiles right and drop the ones past the right edge
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>) {
    projectiles.retain_mut(|p| {
        p.pos.x += PROJECTILE_SPEED;
        p.pos.x < CANVAS_WIDTH
    });
}
