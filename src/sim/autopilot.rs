//! Demo-mode autopilot
//!
//! Jumps when an obstacle that reaches the player's running height is about
//! to enter the hitbox. Used by the native headless runner and tests.

use super::collision::{obstacle_hitbox, player_hitbox};
use super::state::{GameState, Player};
use crate::consts::PLAYER_HEIGHT;

/// Steps of lookahead before an obstacle reaches the player
const LOOKAHEAD_STEPS: f32 = 8.0;

/// Whether a jump now would clear the nearest threatening obstacle
pub fn should_jump(state: &GameState) -> bool {
    if !state.is_running() || state.player.jumping {
        return false;
    }

    let player = player_hitbox(&state.player);
    let standing_top = Player::ground_top() + 5.0;
    let standing_bottom = standing_top + PLAYER_HEIGHT - 10.0;
    let window = state.speed * LOOKAHEAD_STEPS;

    state.obstacles.iter().any(|o| {
        let hb = obstacle_hitbox(o);
        let gap = hb.min.x - player.max().x;
        let in_lane = hb.min.y < standing_bottom && hb.max().y > standing_top;
        in_lane && gap >= 0.0 && gap <= window
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameMode, Obstacle};
    use crate::sim::{TickInput, physics::apply_jump_impulse, tick};

    #[test]
    fn test_jumps_for_close_obstacle() {
        let mut state = GameState::new(GameMode::Basic, 1, 0);
        state.start();
        state.obstacles.push(Obstacle::grounded(100.0, 20.0, 30.0, 1.0));
        assert!(should_jump(&state));

        state.obstacles[0].x = 600.0;
        assert!(!should_jump(&state));
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = GameState::new(GameMode::Basic, 31337, 0);
        state.start();
        for step in 0..3000 {
            if should_jump(&state) {
                apply_jump_impulse(&mut state);
            }
            tick(&mut state, &TickInput::default(), step as f64);
            if state.is_over() {
                break;
            }
        }
        assert!(state.score > 100, "autopilot died at score {}", state.score);
    }
}
